use potluck_sdk::objects::{MatchResponse, MatchedRecipient};

/// Everything needed to answer "who do I buy for?" for one named
/// participant, as loaded by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MatchLookup {
    pub draw_completed: bool,
    pub assigned_recipient_id: Option<i32>,
    pub recipient_name: Option<String>,
    pub recipient_preferences: Option<String>,
}

/// The participant the caller gives to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub preferences: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotMatchedReason {
    /// No draw has been performed since the last reset.
    DrawPending,
    /// The participant joined after the current draw.
    JoinedAfterDraw,
}

impl NotMatchedReason {
    pub fn message(self) -> &'static str {
        match self {
            NotMatchedReason::DrawPending => {
                "The draw hasn't happened yet. Check back after the host runs it."
            }
            NotMatchedReason::JoinedAfterDraw => {
                "You joined after the draw, so you don't have a match yet. Ask the host to run the draw again."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Nobody joined under that name.
    NotFound,
    NotMatched(NotMatchedReason),
    Matched(Recipient),
}

impl MatchOutcome {
    /// Wire form of a found participant's result.
    ///
    /// Returns `None` for [`MatchOutcome::NotFound`], which has no body.
    pub fn into_response(self) -> Option<MatchResponse> {
        match self {
            MatchOutcome::NotFound => None,
            MatchOutcome::NotMatched(reason) => Some(MatchResponse::not_matched(reason.message())),
            MatchOutcome::Matched(r) => Some(MatchResponse::matched(MatchedRecipient {
                name: r.name,
                preferences: r.preferences,
            })),
        }
    }
}

/// Decide what a participant may see.
///
/// Only the caller's own recipient is ever revealed; nothing about who gives
/// to the caller is part of the lookup.
pub fn resolve_match(lookup: Option<MatchLookup>) -> MatchOutcome {
    let Some(lookup) = lookup else {
        return MatchOutcome::NotFound;
    };

    if !lookup.draw_completed {
        return MatchOutcome::NotMatched(NotMatchedReason::DrawPending);
    }

    match (
        lookup.assigned_recipient_id,
        lookup.recipient_name,
        lookup.recipient_preferences,
    ) {
        (Some(_), Some(name), Some(preferences)) => {
            MatchOutcome::Matched(Recipient { name, preferences })
        }
        _ => MatchOutcome::NotMatched(NotMatchedReason::JoinedAfterDraw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(draw_completed: bool, recipient: Option<(i32, &str, &str)>) -> MatchLookup {
        MatchLookup {
            draw_completed,
            assigned_recipient_id: recipient.map(|r| r.0),
            recipient_name: recipient.map(|r| r.1.to_string()),
            recipient_preferences: recipient.map(|r| r.2.to_string()),
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(resolve_match(None), MatchOutcome::NotFound);
        assert_eq!(MatchOutcome::NotFound.into_response(), None);
    }

    #[test]
    fn test_before_draw() {
        assert_eq!(
            resolve_match(Some(lookup(false, None))),
            MatchOutcome::NotMatched(NotMatchedReason::DrawPending)
        );
    }

    #[test]
    fn test_flag_wins_over_stale_assignment() {
        assert_eq!(
            resolve_match(Some(lookup(false, Some((2, "Bea", "tea"))))),
            MatchOutcome::NotMatched(NotMatchedReason::DrawPending)
        );
    }

    #[test]
    fn test_joined_after_draw() {
        let outcome = resolve_match(Some(lookup(true, None)));
        assert_eq!(
            outcome,
            MatchOutcome::NotMatched(NotMatchedReason::JoinedAfterDraw)
        );
        let response = outcome.into_response().unwrap();
        assert!(!response.matched);
        assert!(response.message.is_some());
    }

    #[test]
    fn test_matched_reveals_recipient() {
        let outcome = resolve_match(Some(lookup(true, Some((2, "Bea", "tea")))));
        let response = outcome.into_response().unwrap();
        assert!(response.matched);
        assert_eq!(
            response.recipient,
            Some(MatchedRecipient {
                name: "Bea".to_string(),
                preferences: "tea".to_string(),
            })
        );
    }
}
