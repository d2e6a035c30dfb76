pub mod drop_records;
pub mod member_wallets;

use wldrop_sdk::objects::DropKind as SdkDropKind;

/// Drop kind for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `wldrop_sdk::objects::DropKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "drop_kind")]
pub enum DropKind {
    Fcfs,
    Raffle,
}

impl From<DropKind> for SdkDropKind {
    fn from(value: DropKind) -> Self {
        match value {
            DropKind::Fcfs => SdkDropKind::Fcfs,
            DropKind::Raffle => SdkDropKind::Raffle,
        }
    }
}

impl From<SdkDropKind> for DropKind {
    fn from(value: SdkDropKind) -> Self {
        match value {
            SdkDropKind::Fcfs => DropKind::Fcfs,
            SdkDropKind::Raffle => DropKind::Raffle,
        }
    }
}

impl std::fmt::Display for DropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        SdkDropKind::from(*self).fmt(f)
    }
}
