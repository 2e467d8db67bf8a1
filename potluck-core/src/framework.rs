use sqlx::PgPool;

/// Runs storage messages against Postgres.
#[derive(Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}

/// Make sure the singleton event configuration row exists.
///
/// Every message touching the configuration (or the draw flag stored in it)
/// calls this first, so a fresh database behaves like one with defaults.
pub(crate) async fn ensure_event_config<'e>(
    executor: impl sqlx::PgExecutor<'e>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO event_config (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
        .execute(executor)
        .await?;
    Ok(())
}
