//! TTL Tier Module
//!
//! Named time-to-live tiers callers pick from when storing entries.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// == TTL Tier ==
/// Named expiry horizon for a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlTier {
    /// 1 minute, for volatile listings and search results
    Short,
    /// 5 minutes, used when no TTL is given
    #[default]
    Medium,
    /// 15 minutes
    Long,
    /// 1 hour, for content that changes only through admin edits
    ExtraLong,
}

impl TtlTier {
    /// Returns the tier's duration.
    pub const fn duration(self) -> Duration {
        match self {
            TtlTier::Short => Duration::from_secs(60),
            TtlTier::Medium => Duration::from_secs(5 * 60),
            TtlTier::Long => Duration::from_secs(15 * 60),
            TtlTier::ExtraLong => Duration::from_secs(60 * 60),
        }
    }
}

impl From<TtlTier> for Duration {
    fn from(tier: TtlTier) -> Self {
        tier.duration()
    }
}
