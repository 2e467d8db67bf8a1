use crate::framework::{DatabaseProcessor, ensure_event_config};
use crate::secret_santa::{
    DrawOutcome, MatchLookup, MatchOutcome, circular_assignment, name_key, resolve_match,
};
use kanau::processor::Processor;
use potluck_sdk::objects::ParticipantResponse;

/// A Secret Santa participant.
///
/// `assigned_recipient_id` is `None` until a draw runs, is never the
/// participant's own id, and is cleared again by a reset.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Participant {
    pub id: i32,
    pub name: String,
    pub preferences: String,
    pub assigned_recipient_id: Option<i32>,
    pub created_at: time::PrimitiveDateTime,
}

impl From<&Participant> for ParticipantResponse {
    fn from(p: &Participant) -> Self {
        ParticipantResponse {
            id: p.id,
            name: p.name.clone(),
            preferences: p.preferences.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListParticipants;

impl Processor<ListParticipants> for DatabaseProcessor {
    type Output = Vec<Participant>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListParticipants")]
    async fn process(&self, _query: ListParticipants) -> Result<Vec<Participant>, sqlx::Error> {
        let participants = sqlx::query_as::<_, Participant>(
            r#"
            SELECT id, name, preferences, assigned_recipient_id, created_at
            FROM secret_santa_participants
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(participants)
    }
}

#[derive(Debug, Clone)]
/// Add a participant. The name is stored trimmed.
///
/// Uniqueness is enforced by the unique index on `name_key`, so two
/// simultaneous joins under the same name yield exactly one success. The key
/// is computed by [`name_key`] rather than by the database, so lookups fold
/// case the same way regardless of collation.
pub struct JoinSecretSanta {
    pub name: String,
    pub preferences: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(Participant),
    /// A participant with the same name (ignoring case) already exists.
    AlreadyJoined,
}

impl Processor<JoinSecretSanta> for DatabaseProcessor {
    type Output = JoinOutcome;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:JoinSecretSanta")]
    async fn process(&self, insert: JoinSecretSanta) -> Result<JoinOutcome, sqlx::Error> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO secret_santa_participants (name, name_key, preferences)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            RETURNING id, name, preferences, assigned_recipient_id, created_at
            "#,
        )
        .bind(insert.name.trim())
        .bind(name_key(&insert.name))
        .bind(insert.preferences)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match participant {
            Some(p) => JoinOutcome::Joined(p),
            None => JoinOutcome::AlreadyJoined,
        })
    }
}

#[derive(Debug, Clone)]
/// Look up whom the named participant gives to. Read-only.
pub struct ResolveMatch {
    pub name: String,
}

impl Processor<ResolveMatch> for DatabaseProcessor {
    type Output = MatchOutcome;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ResolveMatch")]
    async fn process(&self, query: ResolveMatch) -> Result<MatchOutcome, sqlx::Error> {
        let lookup = sqlx::query_as::<_, MatchLookup>(
            r#"
            SELECT
                COALESCE(
                    (SELECT secret_santa_draw_completed FROM event_config WHERE id = 1),
                    FALSE
                ) AS draw_completed,
                p.assigned_recipient_id,
                r.name AS recipient_name,
                r.preferences AS recipient_preferences
            FROM secret_santa_participants p
            LEFT JOIN secret_santa_participants r ON r.id = p.assigned_recipient_id
            WHERE p.name_key = $1
            "#,
        )
        .bind(name_key(&query.name))
        .fetch_optional(&self.pool)
        .await?;
        Ok(resolve_match(lookup))
    }
}

#[derive(Debug, Clone)]
/// Assign every participant a recipient and set the draw flag.
///
/// Runs in one transaction: either every assignment and the flag are
/// written, or nothing is. Drawing again re-rolls all assignments.
pub struct PerformDraw;

impl Processor<PerformDraw> for DatabaseProcessor {
    type Output = DrawOutcome;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:PerformDraw")]
    async fn process(&self, _cmd: PerformDraw) -> Result<DrawOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        ensure_event_config(&mut *tx).await?;

        // Serializes concurrent draws and resets.
        sqlx::query("SELECT id FROM event_config WHERE id = 1 FOR UPDATE")
            .execute(&mut *tx)
            .await?;

        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT id
            FROM secret_santa_participants
            ORDER BY id ASC
            FOR UPDATE
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        // ThreadRng is not Send; keep it out of the await points.
        let assignments = {
            let mut rng = rand::rng();
            circular_assignment(&ids, &mut rng)
        };
        let Some(assignments) = assignments else {
            tx.rollback().await?;
            return Ok(DrawOutcome::NotEnoughParticipants { count: ids.len() });
        };

        let (givers, recipients): (Vec<i32>, Vec<i32>) = assignments
            .iter()
            .map(|a| (a.giver, a.recipient))
            .unzip();

        sqlx::query(
            r#"
            UPDATE secret_santa_participants AS p
            SET assigned_recipient_id = u.recipient
            FROM UNNEST($1::int4[], $2::int4[]) AS u(id, recipient)
            WHERE p.id = u.id
            "#,
        )
        .bind(givers)
        .bind(recipients)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE event_config
            SET secret_santa_draw_completed = TRUE, updated_at = (NOW() AT TIME ZONE 'utc')
            WHERE id = 1
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(DrawOutcome::Drawn {
            participants: ids.len(),
        })
    }
}

#[derive(Debug, Clone)]
/// Clear every assignment and the draw flag. Participants are kept.
///
/// Returns the number of participants whose assignment was cleared.
pub struct ResetDraw;

impl Processor<ResetDraw> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ResetDraw")]
    async fn process(&self, _cmd: ResetDraw) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        ensure_event_config(&mut *tx).await?;

        sqlx::query("SELECT id FROM event_config WHERE id = 1 FOR UPDATE")
            .execute(&mut *tx)
            .await?;

        let cleared = sqlx::query(
            r#"
            UPDATE secret_santa_participants
            SET assigned_recipient_id = NULL
            WHERE assigned_recipient_id IS NOT NULL
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE event_config
            SET secret_santa_draw_completed = FALSE, updated_at = (NOW() AT TIME ZONE 'utc')
            WHERE id = 1
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(cleared.rows_affected())
    }
}
