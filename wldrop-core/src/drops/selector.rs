//! Winner selection.
//!
//! Pure: the only input besides the entries is the random source, so a
//! seeded rng reproduces a raffle exactly.

use rand::Rng;

use super::participant::Participant;
use crate::entities::DropKind;

/// Turn an ordered entry list into an ordered winner list.
///
/// When there are no more entries than winners everyone wins, in entry
/// order. Otherwise FCFS takes the prefix and a raffle draws a uniform
/// sample without replacement.
pub fn select_winners<R: Rng + ?Sized>(
    kind: DropKind,
    winner_count: usize,
    entries: &[Participant],
    rng: &mut R,
) -> Vec<Participant> {
    if winner_count >= entries.len() {
        return entries.to_vec();
    }

    match kind {
        DropKind::Fcfs => entries[..winner_count].to_vec(),
        DropKind::Raffle => {
            let mut pool = entries.to_vec();
            let mut winners = Vec::with_capacity(winner_count);
            while winners.len() < winner_count {
                let pick = rng.random_range(0..pool.len());
                winners.push(pool.remove(pick));
            }
            winners
        }
    }
}
