//! Storage backend selected at startup.

use kanau::processor::Processor;

use crate::entities::event_config::{GetEventConfig, UpdateEventConfig};
use crate::entities::item::{CreateItem, DeleteItem, ListItems, SetItemAssignee};
use crate::entities::participant::{
    JoinSecretSanta, ListParticipants, PerformDraw, ResetDraw, ResolveMatch,
};
use crate::entities::rsvp::{CreateRsvp, ListRsvps};
use crate::framework::DatabaseProcessor;
use crate::memory::MemoryProcessor;

/// Either a PostgreSQL pool or the in-process store.
///
/// Handlers talk to this through the same `Processor` messages regardless of
/// which variant is active.
#[derive(Clone)]
pub enum Backend {
    Postgres(DatabaseProcessor),
    Memory(MemoryProcessor),
}

macro_rules! delegate {
    ($($msg:ty),* $(,)?) => {
        $(
            impl Processor<$msg> for Backend {
                type Output = <DatabaseProcessor as Processor<$msg>>::Output;
                type Error = sqlx::Error;

                async fn process(&self, msg: $msg) -> Result<Self::Output, sqlx::Error> {
                    match self {
                        Backend::Postgres(db) => db.process(msg).await,
                        Backend::Memory(mem) => mem.process(msg).await,
                    }
                }
            }
        )*
    };
}

delegate!(
    GetEventConfig,
    UpdateEventConfig,
    ListItems,
    CreateItem,
    DeleteItem,
    SetItemAssignee,
    ListRsvps,
    CreateRsvp,
    ListParticipants,
    JoinSecretSanta,
    ResolveMatch,
    PerformDraw,
    ResetDraw,
);
