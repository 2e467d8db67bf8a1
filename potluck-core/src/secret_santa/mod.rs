//! Secret Santa draw engine and match resolver.
//!
//! Both are pure: storage backends gather the inputs, call into here, and
//! persist the result.

mod draw;
mod resolver;

pub use draw::{Assignment, MIN_PARTICIPANTS, circular_assignment};
pub use resolver::{MatchLookup, MatchOutcome, NotMatchedReason, Recipient, resolve_match};

/// Result of a draw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Every participant now has a recipient and the draw flag is set.
    Drawn { participants: usize },
    /// Fewer than [`MIN_PARTICIPANTS`] joined. Nothing was changed.
    NotEnoughParticipants { count: usize },
}

/// Normalized form of a participant name, used for uniqueness and lookup.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
