//! Volume records and the provider inventory abstraction.

/// Provider status for a volume that is not attached to any instance.
pub const AVAILABLE_STATUS: &str = "available";

/// Snapshot of a block-storage volume as reported at list time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Volume {
    /// Provider-assigned identifier, unique within the account.
    pub id: String,
    /// Capacity in whole gibibytes.
    pub size_gib: u32,
    /// Availability zone hosting the volume.
    pub availability_zone: String,
    /// Lifecycle state reported by the provider.
    pub status: String,
}

impl Volume {
    /// Creates a volume record, trimming string fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        size_gib: u32,
        availability_zone: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into().trim().to_owned(),
            size_gib,
            availability_zone: availability_zone.into().trim().to_owned(),
            status: status.into().trim().to_owned(),
        }
    }

    /// Returns `true` when the volume is unattached.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == AVAILABLE_STATUS
    }

    /// Returns `true` when the volume passes the optional exact-size filter.
    #[must_use]
    pub fn matches_size(&self, size_filter_gib: Option<u32>) -> bool {
        size_filter_gib.is_none_or(|size| self.size_gib == size)
    }
}

/// Provider operations required to sweep orphaned volumes.
///
/// Implementations block until the provider answers. No retries are made.
pub trait VolumeInventory {
    /// Error type returned by provider calls.
    type Error: std::error::Error;

    /// Lists volumes in `available` status within `region`, in provider
    /// response order.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the provider call fails or its response
    /// cannot be understood.
    fn list_available(&self, region: &str) -> Result<Vec<Volume>, Self::Error>;

    /// Deletes a single volume by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] when the provider rejects the deletion.
    fn delete_volume(&self, region: &str, volume_id: &str) -> Result<(), Self::Error>;
}
