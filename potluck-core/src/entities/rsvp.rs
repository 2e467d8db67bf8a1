use crate::entities::unix_timestamp;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use potluck_sdk::objects::RsvpResponse;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Rsvp {
    pub id: i32,
    pub first_name: String,
    pub attending: bool,
    pub plus_one: bool,
    pub note: Option<String>,
    pub item_id: Option<i32>,
    pub created_at: time::PrimitiveDateTime,
}

impl From<&Rsvp> for RsvpResponse {
    fn from(r: &Rsvp) -> Self {
        RsvpResponse {
            id: r.id,
            first_name: r.first_name.clone(),
            attending: r.attending,
            plus_one: r.plus_one,
            note: r.note.clone(),
            item_id: r.item_id,
            created_at: unix_timestamp(r.created_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListRsvps;

impl Processor<ListRsvps> for DatabaseProcessor {
    type Output = Vec<Rsvp>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListRsvps")]
    async fn process(&self, _query: ListRsvps) -> Result<Vec<Rsvp>, sqlx::Error> {
        let rsvps = sqlx::query_as::<_, Rsvp>(
            r#"
            SELECT id, first_name, attending, plus_one, note, item_id, created_at
            FROM rsvps
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rsvps)
    }
}

#[derive(Debug, Clone)]
/// Record a guest's response and, if they are attending and picked a dish,
/// claim that dish for them in the same transaction.
///
/// A declining guest's `item_id` is ignored.
pub struct CreateRsvp {
    pub first_name: String,
    pub attending: bool,
    pub plus_one: bool,
    pub note: Option<String>,
    pub item_id: Option<i32>,
}

impl CreateRsvp {
    /// The item to claim, if any.
    pub fn claimed_item(&self) -> Option<i32> {
        self.item_id.filter(|_| self.attending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRsvpOutcome {
    Created(Rsvp),
    /// The chosen item does not exist or someone else already claimed it.
    /// Nothing was recorded.
    ItemUnavailable,
}

impl Processor<CreateRsvp> for DatabaseProcessor {
    type Output = CreateRsvpOutcome;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CreateRsvp")]
    async fn process(&self, insert: CreateRsvp) -> Result<CreateRsvpOutcome, sqlx::Error> {
        let item_id = insert.claimed_item();
        let mut tx = self.pool.begin().await?;

        if let Some(item_id) = item_id {
            let claimed = sqlx::query(
                r#"
                UPDATE items
                SET assignee = $1
                WHERE id = $2 AND assignee IS NULL
                "#,
            )
            .bind(&insert.first_name)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

            if claimed.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(CreateRsvpOutcome::ItemUnavailable);
            }
        }

        let rsvp = sqlx::query_as::<_, Rsvp>(
            r#"
            INSERT INTO rsvps (first_name, attending, plus_one, note, item_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, attending, plus_one, note, item_id, created_at
            "#,
        )
        .bind(insert.first_name)
        .bind(insert.attending)
        .bind(insert.plus_one)
        .bind(insert.note)
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CreateRsvpOutcome::Created(rsvp))
    }
}
