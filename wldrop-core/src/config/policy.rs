use std::collections::HashSet;

use crate::drops::UserId;

/// Limits and lists applied to every drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPolicy {
    /// Used when a creation request carries no duration.
    pub default_duration: time::Duration,
    pub max_winner_count: u32,
    /// Users whose signals are retracted and never counted.
    pub banlist: HashSet<UserId>,
}

impl DropPolicy {
    pub const DEFAULT_DURATION_HOURS: i64 = 1;
    pub const DEFAULT_MAX_WINNER_COUNT: u32 = 50;

    pub fn is_banned(&self, user_id: &UserId) -> bool {
        self.banlist.contains(user_id)
    }
}

impl Default for DropPolicy {
    fn default() -> Self {
        Self {
            default_duration: time::Duration::hours(Self::DEFAULT_DURATION_HOURS),
            max_winner_count: Self::DEFAULT_MAX_WINNER_COUNT,
            banlist: HashSet::new(),
        }
    }
}
