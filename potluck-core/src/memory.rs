//! In-process storage backend.
//!
//! Implements the same messages as [`DatabaseProcessor`](crate::framework::DatabaseProcessor)
//! over plain vectors behind one `RwLock`. Each message takes the lock once,
//! so mutations are atomic with respect to every other message. Nothing is
//! persisted; used for local runs and tests.

use std::sync::Arc;

use kanau::processor::Processor;
use tokio::sync::RwLock;

use crate::entities::event_config::{EventConfig, GetEventConfig, UpdateEventConfig};
use crate::entities::item::{CreateItem, DeleteItem, Item, ListItems, SetItemAssignee};
use crate::entities::participant::{
    JoinOutcome, JoinSecretSanta, ListParticipants, Participant, PerformDraw, ResetDraw,
    ResolveMatch,
};
use crate::entities::rsvp::{CreateRsvp, CreateRsvpOutcome, ListRsvps, Rsvp};
use crate::secret_santa::{
    DrawOutcome, MatchLookup, MatchOutcome, circular_assignment, name_key, resolve_match,
};

#[derive(Clone, Default)]
pub struct MemoryProcessor {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    config: Option<EventConfig>,
    items: Vec<Item>,
    rsvps: Vec<Rsvp>,
    participants: Vec<Participant>,
    last_item_id: i32,
    last_rsvp_id: i32,
    last_participant_id: i32,
}

impl Tables {
    fn config_mut(&mut self) -> &mut EventConfig {
        self.config
            .get_or_insert_with(|| EventConfig::with_defaults(now()))
    }
}

impl MemoryProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> time::PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    time::PrimitiveDateTime::new(now.date(), now.time())
}

fn next_id(last: &mut i32) -> i32 {
    *last += 1;
    *last
}

// ---------------------------------------------------------------------------
// Event configuration
// ---------------------------------------------------------------------------

impl Processor<GetEventConfig> for MemoryProcessor {
    type Output = EventConfig;
    type Error = sqlx::Error;

    async fn process(&self, _query: GetEventConfig) -> Result<EventConfig, sqlx::Error> {
        let mut tables = self.tables.write().await;
        Ok(tables.config_mut().clone())
    }
}

impl Processor<UpdateEventConfig> for MemoryProcessor {
    type Output = EventConfig;
    type Error = sqlx::Error;

    async fn process(&self, update: UpdateEventConfig) -> Result<EventConfig, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let config = tables.config_mut();
        config.apply(update, now());
        Ok(config.clone())
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

impl Processor<ListItems> for MemoryProcessor {
    type Output = Vec<Item>;
    type Error = sqlx::Error;

    async fn process(&self, _query: ListItems) -> Result<Vec<Item>, sqlx::Error> {
        Ok(self.tables.read().await.items.clone())
    }
}

impl Processor<CreateItem> for MemoryProcessor {
    type Output = Item;
    type Error = sqlx::Error;

    async fn process(&self, insert: CreateItem) -> Result<Item, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let item = Item {
            id: next_id(&mut tables.last_item_id),
            name: insert.name,
            assignee: None,
            created_at: now(),
        };
        tables.items.push(item.clone());
        Ok(item)
    }
}

impl Processor<DeleteItem> for MemoryProcessor {
    type Output = bool;
    type Error = sqlx::Error;

    async fn process(&self, cmd: DeleteItem) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let before = tables.items.len();
        tables.items.retain(|item| item.id != cmd.id);
        let removed = tables.items.len() != before;
        if removed {
            // Mirrors `ON DELETE SET NULL` on rsvps.item_id.
            for rsvp in tables.rsvps.iter_mut().filter(|r| r.item_id == Some(cmd.id)) {
                rsvp.item_id = None;
            }
        }
        Ok(removed)
    }
}

impl Processor<SetItemAssignee> for MemoryProcessor {
    type Output = Option<Item>;
    type Error = sqlx::Error;

    async fn process(&self, cmd: SetItemAssignee) -> Result<Option<Item>, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.items.iter_mut().find(|item| item.id == cmd.id) else {
            return Ok(None);
        };
        item.assignee = cmd.assignee;
        Ok(Some(item.clone()))
    }
}

// ---------------------------------------------------------------------------
// RSVPs
// ---------------------------------------------------------------------------

impl Processor<ListRsvps> for MemoryProcessor {
    type Output = Vec<Rsvp>;
    type Error = sqlx::Error;

    async fn process(&self, _query: ListRsvps) -> Result<Vec<Rsvp>, sqlx::Error> {
        Ok(self.tables.read().await.rsvps.clone())
    }
}

impl Processor<CreateRsvp> for MemoryProcessor {
    type Output = CreateRsvpOutcome;
    type Error = sqlx::Error;

    async fn process(&self, insert: CreateRsvp) -> Result<CreateRsvpOutcome, sqlx::Error> {
        let item_id = insert.claimed_item();
        let mut tables = self.tables.write().await;

        if let Some(item_id) = item_id {
            let Some(item) = tables
                .items
                .iter_mut()
                .find(|item| item.id == item_id && item.assignee.is_none())
            else {
                return Ok(CreateRsvpOutcome::ItemUnavailable);
            };
            item.assignee = Some(insert.first_name.clone());
        }

        let rsvp = Rsvp {
            id: next_id(&mut tables.last_rsvp_id),
            first_name: insert.first_name,
            attending: insert.attending,
            plus_one: insert.plus_one,
            note: insert.note,
            item_id,
            created_at: now(),
        };
        tables.rsvps.push(rsvp.clone());
        Ok(CreateRsvpOutcome::Created(rsvp))
    }
}

// ---------------------------------------------------------------------------
// Secret Santa
// ---------------------------------------------------------------------------

impl Processor<ListParticipants> for MemoryProcessor {
    type Output = Vec<Participant>;
    type Error = sqlx::Error;

    async fn process(&self, _query: ListParticipants) -> Result<Vec<Participant>, sqlx::Error> {
        Ok(self.tables.read().await.participants.clone())
    }
}

impl Processor<JoinSecretSanta> for MemoryProcessor {
    type Output = JoinOutcome;
    type Error = sqlx::Error;

    async fn process(&self, insert: JoinSecretSanta) -> Result<JoinOutcome, sqlx::Error> {
        let key = name_key(&insert.name);
        let mut tables = self.tables.write().await;

        if tables.participants.iter().any(|p| name_key(&p.name) == key) {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let participant = Participant {
            id: next_id(&mut tables.last_participant_id),
            name: insert.name.trim().to_string(),
            preferences: insert.preferences,
            assigned_recipient_id: None,
            created_at: now(),
        };
        tables.participants.push(participant.clone());
        Ok(JoinOutcome::Joined(participant))
    }
}

impl Processor<ResolveMatch> for MemoryProcessor {
    type Output = MatchOutcome;
    type Error = sqlx::Error;

    async fn process(&self, query: ResolveMatch) -> Result<MatchOutcome, sqlx::Error> {
        let key = name_key(&query.name);
        let tables = self.tables.read().await;

        let draw_completed = tables
            .config
            .as_ref()
            .is_some_and(|c| c.secret_santa_draw_completed);

        let lookup = tables
            .participants
            .iter()
            .find(|p| name_key(&p.name) == key)
            .map(|caller| {
                let recipient = caller.assigned_recipient_id.and_then(|id| {
                    tables.participants.iter().find(|p| p.id == id)
                });
                MatchLookup {
                    draw_completed,
                    assigned_recipient_id: caller.assigned_recipient_id,
                    recipient_name: recipient.map(|r| r.name.clone()),
                    recipient_preferences: recipient.map(|r| r.preferences.clone()),
                }
            });

        Ok(resolve_match(lookup))
    }
}

impl Processor<PerformDraw> for MemoryProcessor {
    type Output = DrawOutcome;
    type Error = sqlx::Error;

    async fn process(&self, _cmd: PerformDraw) -> Result<DrawOutcome, sqlx::Error> {
        let mut tables = self.tables.write().await;
        let ids: Vec<i32> = tables.participants.iter().map(|p| p.id).collect();

        let assignments = {
            let mut rng = rand::rng();
            circular_assignment(&ids, &mut rng)
        };
        let Some(assignments) = assignments else {
            return Ok(DrawOutcome::NotEnoughParticipants { count: ids.len() });
        };

        for assignment in &assignments {
            if let Some(p) = tables
                .participants
                .iter_mut()
                .find(|p| p.id == assignment.giver)
            {
                p.assigned_recipient_id = Some(assignment.recipient);
            }
        }

        let at = now();
        let config = tables.config_mut();
        config.secret_santa_draw_completed = true;
        config.updated_at = at;

        Ok(DrawOutcome::Drawn {
            participants: ids.len(),
        })
    }
}

impl Processor<ResetDraw> for MemoryProcessor {
    type Output = u64;
    type Error = sqlx::Error;

    async fn process(&self, _cmd: ResetDraw) -> Result<u64, sqlx::Error> {
        let mut tables = self.tables.write().await;

        let mut cleared = 0;
        for p in tables.participants.iter_mut() {
            if p.assigned_recipient_id.take().is_some() {
                cleared += 1;
            }
        }

        let at = now();
        let config = tables.config_mut();
        config.secret_santa_draw_completed = false;
        config.updated_at = at;

        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use tokio::task::JoinSet;

    async fn join(store: &MemoryProcessor, name: &str) -> JoinOutcome {
        store
            .process(JoinSecretSanta {
                name: name.to_string(),
                preferences: format!("{name} likes books"),
            })
            .await
            .unwrap()
    }

    async fn reveal(store: &MemoryProcessor, name: &str) -> MatchOutcome {
        store
            .process(ResolveMatch {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    async fn participants(store: &MemoryProcessor) -> Vec<Participant> {
        store.process(ListParticipants).await.unwrap()
    }

    async fn draw_completed(store: &MemoryProcessor) -> bool {
        store
            .process(GetEventConfig)
            .await
            .unwrap()
            .secret_santa_draw_completed
    }

    #[tokio::test]
    async fn test_join_rejects_same_name_ignoring_case() {
        let store = MemoryProcessor::new();
        assert!(matches!(join(&store, "Alice").await, JoinOutcome::Joined(_)));
        assert_eq!(join(&store, "alice").await, JoinOutcome::AlreadyJoined);
        assert_eq!(join(&store, "  ALICE ").await, JoinOutcome::AlreadyJoined);
        assert_eq!(participants(&store).await.len(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_names_join_and_reveal() {
        let store = MemoryProcessor::new();
        for name in ["ΟΔΥΣΣΕΥΣ", "Élodie", "Bob"] {
            assert!(matches!(join(&store, name).await, JoinOutcome::Joined(_)));
        }
        assert_eq!(join(&store, "ÉLODIE").await, JoinOutcome::AlreadyJoined);
        assert_eq!(join(&store, "Οδυσσευς").await, JoinOutcome::AlreadyJoined);

        store.process(PerformDraw).await.unwrap();

        for name in ["ΟΔΥΣΣΕΥΣ", "Élodie", "Bob", "élodie", " οδυσσευς "] {
            let MatchOutcome::Matched(recipient) = reveal(&store, name).await else {
                panic!("{name} should see their match");
            };
            assert_ne!(name_key(&recipient.name), name_key(name));
        }
    }

    #[tokio::test]
    async fn test_draw_needs_two_participants() {
        let store = MemoryProcessor::new();
        assert_eq!(
            store.process(PerformDraw).await.unwrap(),
            DrawOutcome::NotEnoughParticipants { count: 0 }
        );

        join(&store, "Alice").await;
        let before = participants(&store).await;
        assert_eq!(
            store.process(PerformDraw).await.unwrap(),
            DrawOutcome::NotEnoughParticipants { count: 1 }
        );
        assert_eq!(participants(&store).await, before);
        assert!(!draw_completed(&store).await);
    }

    #[tokio::test]
    async fn test_draw_assigns_everyone_once() {
        let store = MemoryProcessor::new();
        for name in ["A", "B", "C", "D", "E"] {
            join(&store, name).await;
        }

        assert_eq!(
            store.process(PerformDraw).await.unwrap(),
            DrawOutcome::Drawn { participants: 5 }
        );
        assert!(draw_completed(&store).await);

        let all = participants(&store).await;
        let recipients: HashSet<i32> = all
            .iter()
            .map(|p| {
                let r = p.assigned_recipient_id.unwrap();
                assert_ne!(r, p.id);
                r
            })
            .collect();
        let ids: HashSet<i32> = all.iter().map(|p| p.id).collect();
        assert_eq!(recipients, ids);
    }

    #[tokio::test]
    async fn test_reveal_follows_assignment() {
        let store = MemoryProcessor::new();
        for name in ["A", "B", "C"] {
            join(&store, name).await;
        }
        store.process(PerformDraw).await.unwrap();

        let all = participants(&store).await;
        for giver in &all {
            let recipient = all
                .iter()
                .find(|p| Some(p.id) == giver.assigned_recipient_id)
                .unwrap();
            assert_eq!(
                reveal(&store, &giver.name.to_lowercase()).await,
                MatchOutcome::Matched(crate::secret_santa::Recipient {
                    name: recipient.name.clone(),
                    preferences: recipient.preferences.clone(),
                })
            );
        }
        assert_eq!(reveal(&store, "D").await, MatchOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_two_participants_get_each_other() {
        let store = MemoryProcessor::new();
        join(&store, "A").await;
        join(&store, "B").await;
        store.process(PerformDraw).await.unwrap();

        let MatchOutcome::Matched(a) = reveal(&store, "A").await else {
            panic!("A should be matched");
        };
        let MatchOutcome::Matched(b) = reveal(&store, "B").await else {
            panic!("B should be matched");
        };
        assert_eq!(a.name, "B");
        assert_eq!(b.name, "A");
    }

    #[tokio::test]
    async fn test_reset_clears_matches_and_keeps_participants() {
        let store = MemoryProcessor::new();
        for name in ["A", "B", "C"] {
            join(&store, name).await;
        }
        store.process(PerformDraw).await.unwrap();

        assert_eq!(store.process(ResetDraw).await.unwrap(), 3);
        assert!(!draw_completed(&store).await);

        let all = participants(&store).await;
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|p| p.assigned_recipient_id.is_none()));
        for name in ["A", "B", "C"] {
            assert_eq!(
                reveal(&store, name).await,
                MatchOutcome::NotMatched(crate::secret_santa::NotMatchedReason::DrawPending)
            );
        }

        // Idempotent.
        assert_eq!(store.process(ResetDraw).await.unwrap(), 0);
        assert!(!draw_completed(&store).await);
    }

    #[tokio::test]
    async fn test_late_joiner_stays_unmatched_until_redraw() {
        let store = MemoryProcessor::new();
        join(&store, "A").await;
        join(&store, "B").await;
        store.process(PerformDraw).await.unwrap();

        assert!(matches!(join(&store, "C").await, JoinOutcome::Joined(_)));
        assert_eq!(
            reveal(&store, "C").await,
            MatchOutcome::NotMatched(crate::secret_santa::NotMatchedReason::JoinedAfterDraw)
        );

        store.process(PerformDraw).await.unwrap();
        assert!(matches!(reveal(&store, "C").await, MatchOutcome::Matched(_)));
    }

    #[tokio::test]
    async fn test_rsvp_claims_free_item_only() {
        let store = MemoryProcessor::new();
        let pie = store
            .process(CreateItem {
                name: "Pie".to_string(),
            })
            .await
            .unwrap();

        let rsvp = |name: &str, attending: bool| CreateRsvp {
            first_name: name.to_string(),
            attending,
            plus_one: false,
            note: None,
            item_id: Some(pie.id),
        };

        let CreateRsvpOutcome::Created(declined) =
            store.process(rsvp("Dan", false)).await.unwrap()
        else {
            panic!("declining guest should be recorded");
        };
        assert_eq!(declined.item_id, None);

        assert!(matches!(
            store.process(rsvp("Ann", true)).await.unwrap(),
            CreateRsvpOutcome::Created(_)
        ));
        assert_eq!(
            store.process(rsvp("Bob", true)).await.unwrap(),
            CreateRsvpOutcome::ItemUnavailable
        );

        let items = store.process(ListItems).await.unwrap();
        assert_eq!(items[0].assignee.as_deref(), Some("Ann"));
        assert_eq!(store.process(ListRsvps).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_item_detaches_rsvps() {
        let store = MemoryProcessor::new();
        let pie = store
            .process(CreateItem {
                name: "Pie".to_string(),
            })
            .await
            .unwrap();
        store
            .process(CreateRsvp {
                first_name: "Ann".to_string(),
                attending: true,
                plus_one: true,
                note: None,
                item_id: Some(pie.id),
            })
            .await
            .unwrap();

        assert!(store.process(DeleteItem { id: pie.id }).await.unwrap());
        assert!(!store.process(DeleteItem { id: pie.id }).await.unwrap());
        assert_eq!(store.process(ListRsvps).await.unwrap()[0].item_id, None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_same_name_joins_admit_one() {
        let store = MemoryProcessor::new();
        let spellings = ["Alice", "alice", "ALICE", " Alice ", "aLiCe"];

        let mut joins = JoinSet::new();
        for (attempt, name) in spellings.into_iter().cycle().take(24).enumerate() {
            let store = store.clone();
            joins.spawn(async move {
                store
                    .process(JoinSecretSanta {
                        name: name.to_string(),
                        preferences: format!("attempt {attempt}"),
                    })
                    .await
                    .unwrap()
            });
        }

        let mut joined = 0;
        while let Some(outcome) = joins.join_next().await {
            if let JoinOutcome::Joined(_) = outcome.unwrap() {
                joined += 1;
            }
        }
        assert_eq!(joined, 1);
        assert_eq!(participants(&store).await.len(), 1);
    }

    /// Every participant unassigned, or all of them in one cycle with no
    /// self-assignment.
    fn assert_whole_draw(all: &[Participant]) {
        if all.iter().all(|p| p.assigned_recipient_id.is_none()) {
            return;
        }
        let next: HashMap<i32, i32> = all
            .iter()
            .map(|p| {
                let recipient = p
                    .assigned_recipient_id
                    .unwrap_or_else(|| panic!("{} left unassigned mid-draw", p.name));
                assert_ne!(recipient, p.id);
                (p.id, recipient)
            })
            .collect();

        let start = all[0].id;
        let mut current = next[&start];
        let mut hops = 1;
        while current != start {
            current = next[&current];
            hops += 1;
            assert!(hops <= all.len(), "assignment is not a single cycle");
        }
        assert_eq!(hops, all.len());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_never_see_partial_draw() {
        let store = MemoryProcessor::new();
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        for name in names {
            join(&store, name).await;
        }

        let drawer = {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..25 {
                    store.process(PerformDraw).await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut rounds = 0;
        while !drawer.is_finished() || rounds < 50 {
            assert_whole_draw(&participants(&store).await);

            for name in names {
                match reveal(&store, name).await {
                    MatchOutcome::Matched(recipient) => assert_ne!(recipient.name, name),
                    MatchOutcome::NotMatched(reason) => {
                        assert_eq!(reason, crate::secret_santa::NotMatchedReason::DrawPending)
                    }
                    MatchOutcome::NotFound => panic!("{name} vanished"),
                }
            }
            rounds += 1;
            tokio::task::yield_now().await;
        }

        drawer.await.unwrap();
        assert!(draw_completed(&store).await);
        assert_whole_draw(&participants(&store).await);
    }
}
