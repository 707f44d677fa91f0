//! Application-level configuration.
//!
//! Values that change how the tool adapter behaves, as opposed to where it
//! connects (the gateway's concern).

use biznisweb_domain::StatusExclusion;

/// Tool adapter behavior configuration.
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Statuses left out of order statistics
    pub status_exclusion: StatusExclusion,
}

impl AdapterConfig {
    pub fn with_status_exclusion(mut self, exclusion: StatusExclusion) -> Self {
        self.status_exclusion = exclusion;
        self
    }
}
