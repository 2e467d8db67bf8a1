use rand::Rng;
use rand::seq::SliceRandom;

/// A draw needs at least this many participants.
pub const MIN_PARTICIPANTS: usize = 2;

/// One giver → recipient pair produced by a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub giver: i32,
    pub recipient: i32,
}

/// Arrange the participants into one random cycle and give everyone their
/// successor.
///
/// The ids are shuffled uniformly (Fisher-Yates), then each participant gives
/// to the next one in shuffled order, the last wrapping to the first. With
/// two or more distinct ids this is a permutation without fixed points: every
/// participant gives exactly once, receives exactly once, and never draws
/// themselves.
///
/// Returns `None` when there are fewer than [`MIN_PARTICIPANTS`] ids.
pub fn circular_assignment<R: Rng + ?Sized>(
    participant_ids: &[i32],
    rng: &mut R,
) -> Option<Vec<Assignment>> {
    if participant_ids.len() < MIN_PARTICIPANTS {
        return None;
    }

    let mut order = participant_ids.to_vec();
    order.shuffle(rng);

    let assignments = order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(&giver, &recipient)| Assignment { giver, recipient })
        .collect();
    Some(assignments)
}
