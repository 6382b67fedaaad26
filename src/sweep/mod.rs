//! Orphaned-volume sweep: list, report, confirm, delete.
//!
//! A run moves through `listed → (empty | reported) → (confirmed → deleting
//! → done) | (declined → done)`. The volumes handed to the deleter are exactly
//! the ones the reporter printed; nothing is re-queried in between, so a
//! volume attached by someone else in the meantime surfaces as a per-item
//! delete failure.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, SweepConfig};
use crate::confirm::{Confirmation, DELETE_PROMPT};
use crate::report::Reporter;
use crate::volume::{Volume, VolumeInventory};

/// Result of a successful inventory listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Listing {
    /// The provider reported no unattached volumes.
    Empty,
    /// Unattached volumes exist but none has the requested size.
    NoneAtSize(u32),
    /// Volumes selected for the sweep, in provider response order.
    Found(Vec<Volume>),
}

impl Listing {
    /// Volumes selected by the listing; empty for the two empty variants.
    #[must_use]
    pub fn volumes(&self) -> &[Volume] {
        match self {
            Self::Found(volumes) => volumes,
            Self::Empty | Self::NoneAtSize(_) => &[],
        }
    }

    /// Returns `true` when nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes().is_empty()
    }
}

/// A single volume the provider refused to delete.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeletionFailure<E> {
    /// Identifier of the volume that survived.
    pub volume_id: String,
    /// Provider error returned for the delete call.
    pub error: E,
}

/// Per-volume outcomes of a deletion pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeletionSummary<E> {
    /// Identifiers deleted successfully, in call order.
    pub deleted: Vec<String>,
    /// Deletions that failed, in call order.
    pub failed: Vec<DeletionFailure<E>>,
}

impl<E> Default for DeletionSummary<E> {
    fn default() -> Self {
        Self {
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<E> DeletionSummary<E> {
    /// Number of delete calls issued.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    /// Number of volumes deleted.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.deleted.len()
    }

    /// Number of volumes that could not be deleted.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Returns `true` when every deletion succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Terminal state of a sweep run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SweepOutcome<E> {
    /// Nothing matched, so no prompt was shown and nothing was deleted.
    NothingFound(Listing),
    /// The operator declined; the candidates were left untouched.
    Declined {
        /// Volumes that were reported but not deleted.
        candidates: Vec<Volume>,
    },
    /// Deletion ran; see the summary for per-volume results.
    Completed(DeletionSummary<E>),
}

impl<E> SweepOutcome<E> {
    /// Returns `true` unless a deletion failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        match self {
            Self::Completed(summary) => summary.is_clean(),
            Self::NothingFound(_) | Self::Declined { .. } => true,
        }
    }
}

/// Errors that end a sweep early.
#[derive(Debug, Error)]
pub enum SweepError<E> {
    /// The inventory query failed. Distinct from an empty inventory.
    #[error("volume inventory failed: {0}")]
    Provider(#[source] E),
    /// Writing the report or reading the confirmation failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The report could not be written during deletion. Every volume was
    /// still attempted; `summary` records what happened to each.
    #[error(
        "terminal I/O failed after {} deletion attempt(s): {source}",
        .summary.total()
    )]
    ReportInterrupted {
        /// Outcomes of every delete call issued.
        summary: DeletionSummary<E>,
        /// First write error raised by the report sink.
        source: io::Error,
    },
}

/// Lists unattached volumes in the configured region, applies the exact-size
/// filter, and reports the result.
///
/// Exactly one inventory query is issued. Provider errors are reported to
/// the operator and returned so callers can tell them apart from an empty
/// inventory.
///
/// # Errors
///
/// Returns [`SweepError::Provider`] when the inventory query fails, or
/// [`SweepError::Io`] when the report cannot be written.
pub fn list_orphaned<I, W>(
    inventory: &I,
    config: &SweepConfig,
    reporter: &mut Reporter<W>,
) -> Result<Listing, SweepError<I::Error>>
where
    I: VolumeInventory,
    W: Write,
{
    let listed = match inventory.list_available(&config.region) {
        Ok(volumes) => volumes,
        Err(err) => {
            warn!(
                event = "volsweep.sweep.list_failed",
                region = %config.region,
                error = %err,
            );
            reporter.provider_error(&err)?;
            return Err(SweepError::Provider(err));
        }
    };

    let available: Vec<Volume> = listed.into_iter().filter(Volume::is_available).collect();
    if available.is_empty() {
        reporter.no_volumes()?;
        return Ok(Listing::Empty);
    }

    let selected: Vec<Volume> = available
        .into_iter()
        .filter(|volume| volume.matches_size(config.size_filter_gib))
        .collect();
    if selected.is_empty() {
        if let Some(size) = config.size_filter_gib {
            reporter.none_at_size(size)?;
            return Ok(Listing::NoneAtSize(size));
        }
        reporter.no_volumes()?;
        return Ok(Listing::Empty);
    }

    info!(
        event = "volsweep.sweep.listed",
        region = %config.region,
        size_filter_gib = ?config.size_filter_gib,
        found = selected.len(),
    );
    reporter.volumes(&selected)?;
    Ok(Listing::Found(selected))
}

/// Deletes each volume in order, one call per volume. A failure is reported
/// and recorded but never stops the remaining deletions, and neither does a
/// failed report write.
///
/// # Errors
///
/// Returns [`SweepError::ReportInterrupted`] carrying the full summary when
/// any report line could not be written; provider failures are collected in
/// the summary.
pub fn delete_volumes<I, W>(
    inventory: &I,
    region: &str,
    volumes: &[Volume],
    reporter: &mut Reporter<W>,
) -> Result<DeletionSummary<I::Error>, SweepError<I::Error>>
where
    I: VolumeInventory,
    W: Write,
{
    let mut summary = DeletionSummary::default();
    let mut report_error: Option<io::Error> = None;
    for volume in volumes {
        let written = match inventory.delete_volume(region, &volume.id) {
            Ok(()) => {
                info!(
                    event = "volsweep.sweep.volume_deleted",
                    region = region,
                    volume_id = %volume.id,
                );
                summary.deleted.push(volume.id.clone());
                reporter.deleted(&volume.id)
            }
            Err(err) => {
                warn!(
                    event = "volsweep.sweep.delete_failed",
                    region = region,
                    volume_id = %volume.id,
                    error = %err,
                );
                let written = reporter.delete_failed(&volume.id, &err);
                summary.failed.push(DeletionFailure {
                    volume_id: volume.id.clone(),
                    error: err,
                });
                written
            }
        };
        if let Err(err) = written {
            warn!(
                event = "volsweep.sweep.report_failed",
                volume_id = %volume.id,
                error = %err,
            );
            if report_error.is_none() {
                report_error = Some(err);
            }
        }
    }

    if let Some(source) = report_error {
        return Err(SweepError::ReportInterrupted { summary, source });
    }
    Ok(summary)
}

/// Runs the full sweep against an inventory, writing the report to `W`.
#[derive(Debug)]
pub struct Sweeper<I, W> {
    config: SweepConfig,
    inventory: I,
    reporter: Reporter<W>,
}

impl<I: VolumeInventory, W: Write> Sweeper<I, W> {
    /// Creates a sweeper after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn new(config: SweepConfig, inventory: I, out: W) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            inventory,
            reporter: Reporter::new(out),
        })
    }

    /// Configuration the sweeper runs with.
    #[must_use]
    pub const fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Consumes the sweeper and returns the report sink.
    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }

    /// Lists and reports candidate volumes without deleting anything.
    ///
    /// # Errors
    ///
    /// See [`list_orphaned`].
    pub fn list(&mut self) -> Result<Listing, SweepError<I::Error>> {
        self.reporter.listing_started(&self.config.region)?;
        list_orphaned(&self.inventory, &self.config, &mut self.reporter)
    }

    /// Lists, reports, asks `gate` for consent, then deletes.
    ///
    /// An empty listing ends the run before any prompt. When
    /// [`SweepConfig::auto_delete`] is set the gate is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Provider`] when listing fails,
    /// [`SweepError::Io`] when the terminal cannot be used before deletion,
    /// or [`SweepError::ReportInterrupted`] when it fails once deletion has
    /// started.
    pub fn run<C: Confirmation>(
        &mut self,
        gate: &mut C,
    ) -> Result<SweepOutcome<I::Error>, SweepError<I::Error>> {
        let candidates = match self.list()? {
            Listing::Found(candidates) => candidates,
            listing @ (Listing::Empty | Listing::NoneAtSize(_)) => {
                return Ok(SweepOutcome::NothingFound(listing));
            }
        };

        let confirmed = if self.config.auto_delete {
            info!(
                event = "volsweep.sweep.confirmation_skipped",
                candidates = candidates.len(),
            );
            true
        } else {
            gate.confirm(DELETE_PROMPT)?
        };

        if !confirmed {
            info!(
                event = "volsweep.sweep.declined",
                candidates = candidates.len(),
            );
            self.reporter.declined()?;
            return Ok(SweepOutcome::Declined { candidates });
        }

        let summary = delete_volumes(
            &self.inventory,
            &self.config.region,
            &candidates,
            &mut self.reporter,
        )?;
        if let Err(source) = self
            .reporter
            .deletion_summary(summary.succeeded(), summary.failed_count())
        {
            return Err(SweepError::ReportInterrupted { summary, source });
        }
        Ok(SweepOutcome::Completed(summary))
    }
}
