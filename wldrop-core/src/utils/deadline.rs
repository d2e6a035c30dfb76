/// Time left until `deadline`, clamped to zero once it has passed.
pub fn remaining_until(
    deadline: time::OffsetDateTime,
    now: time::OffsetDateTime,
) -> std::time::Duration {
    std::time::Duration::try_from(deadline - now).unwrap_or_default()
}

/// Whether the deadline has been reached at `now`.
pub fn is_overdue(deadline: time::OffsetDateTime, now: time::OffsetDateTime) -> bool {
    now >= deadline
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_until() {
        let now = time::OffsetDateTime::now_utc();
        assert_eq!(
            remaining_until(now + time::Duration::seconds(90), now),
            std::time::Duration::from_secs(90)
        );
        assert_eq!(remaining_until(now, now), std::time::Duration::ZERO);
        assert_eq!(
            remaining_until(now - time::Duration::minutes(10), now),
            std::time::Duration::ZERO
        );
    }

    #[test]
    fn test_is_overdue() {
        let now = time::OffsetDateTime::now_utc();
        assert!(is_overdue(now, now));
        assert!(is_overdue(now - time::Duration::seconds(1), now));
        assert!(!is_overdue(now + time::Duration::seconds(1), now));
    }
}
