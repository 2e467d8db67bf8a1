use crate::entities::unix_timestamp;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use potluck_sdk::objects::ItemResponse;

/// A potluck dish and the guest bringing it, if claimed.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub assignee: Option<String>,
    pub created_at: time::PrimitiveDateTime,
}

impl From<&Item> for ItemResponse {
    fn from(item: &Item) -> Self {
        ItemResponse {
            id: item.id,
            name: item.name.clone(),
            assignee: item.assignee.clone(),
            created_at: unix_timestamp(item.created_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListItems;

impl Processor<ListItems> for DatabaseProcessor {
    type Output = Vec<Item>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListItems")]
    async fn process(&self, _query: ListItems) -> Result<Vec<Item>, sqlx::Error> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, assignee, created_at
            FROM items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
}

impl Processor<CreateItem> for DatabaseProcessor {
    type Output = Item;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CreateItem")]
    async fn process(&self, insert: CreateItem) -> Result<Item, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (name)
            VALUES ($1)
            RETURNING id, name, assignee, created_at
            "#,
        )
        .bind(insert.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }
}

#[derive(Debug, Clone)]
/// Delete an item. Returns whether a row was removed.
pub struct DeleteItem {
    pub id: i32,
}

impl Processor<DeleteItem> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteItem")]
    async fn process(&self, cmd: DeleteItem) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(cmd.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, Clone)]
/// Claim an item for a guest, or release it with `assignee: None`.
///
/// Returns `None` if the item does not exist.
pub struct SetItemAssignee {
    pub id: i32,
    pub assignee: Option<String>,
}

impl Processor<SetItemAssignee> for DatabaseProcessor {
    type Output = Option<Item>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:SetItemAssignee")]
    async fn process(&self, cmd: SetItemAssignee) -> Result<Option<Item>, sqlx::Error> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET assignee = $1
            WHERE id = $2
            RETURNING id, name, assignee, created_at
            "#,
        )
        .bind(cmd.assignee)
        .bind(cmd.id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }
}
