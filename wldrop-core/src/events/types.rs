use crate::drops::DropId;

/// Emitted by an expiry timer when a drop's deadline is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropExpired {
    pub drop_id: DropId,
}
