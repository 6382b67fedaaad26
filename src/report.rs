//! Human-readable report written to the operator's terminal.

use std::fmt::Display;
use std::io::{self, Write};

use crate::volume::Volume;

const RULE_WIDTH: usize = 40;

/// Writes sweep progress and volume details to a text sink.
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter and returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Announces the start of a listing.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn listing_started(&mut self, region: &str) -> io::Result<()> {
        writeln!(self.out, "Checking for available EBS volumes in {region}...\n")
    }

    /// Reports that the provider returned no unattached volumes.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn no_volumes(&mut self) -> io::Result<()> {
        writeln!(self.out, "No available (unattached) EBS volumes found.")
    }

    /// Reports that the size filter removed every volume.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn none_at_size(&mut self, size_gib: u32) -> io::Result<()> {
        writeln!(
            self.out,
            "No available EBS volumes found with size {size_gib} GiB."
        )
    }

    /// Prints the summary count followed by one block per volume, in the
    /// order given.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn volumes(&mut self, volumes: &[Volume]) -> io::Result<()> {
        writeln!(
            self.out,
            "Found {} available EBS volume(s):\n",
            volumes.len()
        )?;
        for volume in volumes {
            self.volume(volume)?;
        }
        Ok(())
    }

    fn volume(&mut self, volume: &Volume) -> io::Result<()> {
        writeln!(self.out, "Volume ID: {}", volume.id)?;
        writeln!(self.out, "  Size (GiB): {}", volume.size_gib)?;
        writeln!(self.out, "  Availability Zone: {}", volume.availability_zone)?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }

    /// Reports a failed inventory query.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn provider_error(&mut self, err: &impl Display) -> io::Result<()> {
        writeln!(self.out, "AWS error: {err}")
    }

    /// Reports one successful deletion.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn deleted(&mut self, volume_id: &str) -> io::Result<()> {
        writeln!(self.out, "Deleted volume: {volume_id}")
    }

    /// Reports one failed deletion.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn delete_failed(&mut self, volume_id: &str, err: &impl Display) -> io::Result<()> {
        writeln!(self.out, "Could not delete {volume_id}: {err}")
    }

    /// Reports that the operator declined deletion.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn declined(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nNo volumes deleted. Exiting safely.")
    }

    /// Prints the outcome counts of a deletion pass.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the sink.
    pub fn deletion_summary(&mut self, deleted: usize, failed: usize) -> io::Result<()> {
        writeln!(
            self.out,
            "\nDeleted {deleted} of {} volume(s); {failed} failed.",
            deleted + failed
        )
    }
}
