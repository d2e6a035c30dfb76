use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use wldrop_sdk::objects::Participant as SdkParticipant;

use super::ids::UserId;

/// A participant identity: an opaque id plus a display label.
///
/// Equality and hashing look at the id only; the label is whatever the
/// platform reported last and may change between signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub label: CompactString,
}

impl Participant {
    pub fn new(id: impl Into<UserId>, label: impl Into<CompactString>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl std::hash::Hash for Participant {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl From<SdkParticipant> for Participant {
    fn from(value: SdkParticipant) -> Self {
        Self::new(value.id, value.label)
    }
}

impl From<Participant> for SdkParticipant {
    fn from(value: Participant) -> Self {
        SdkParticipant {
            id: value.id.into(),
            label: value.label.into_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_label() {
        let a = Participant::new("7", "alice#0001");
        let renamed = Participant::new("7", "alice_renamed");
        let other = Participant::new("8", "alice#0001");
        assert_eq!(a, renamed);
        assert_ne!(a, other);
    }
}
