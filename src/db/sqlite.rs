use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::db::schema_sqlite::items;

use super::{DatabaseError, StorageHandle, models::Item};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
struct DbItem {
    id: i64,
    name: String,
}

impl From<DbItem> for Item {
    fn from(value: DbItem) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = items)]
struct NewItemRow<'a> {
    name: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = items)]
struct UpdateItem<'a> {
    name: &'a str,
}

pub struct SqliteItemStore {
    handle: StorageHandle,
}

impl SqliteItemStore {
    pub fn new(handle: StorageHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl super::ItemStore for SqliteItemStore {
    async fn list_items(&self) -> Result<Vec<Item>, DatabaseError> {
        let rows = self
            .handle
            .query(|conn| {
                items::table
                    .select(DbItem::as_select())
                    .load::<DbItem>(conn)
            })
            .await?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn get_item(&self, item_id: i64) -> Result<Option<Item>, DatabaseError> {
        let row = self
            .handle
            .query(move |conn| {
                items::table
                    .filter(items::id.eq(item_id))
                    .select(DbItem::as_select())
                    .first::<DbItem>(conn)
                    .optional()
            })
            .await?;
        Ok(row.map(Item::from))
    }

    async fn create_item(&self, name: &str) -> Result<Item, DatabaseError> {
        let name = name.to_string();
        self.handle
            .query(move |conn| {
                diesel::insert_into(items::table)
                    .values(&NewItemRow { name: &name })
                    .execute(conn)?;
                // Same connection, same lock: the rowid belongs to this insert.
                let id = diesel::select(diesel::dsl::sql::<BigInt>("last_insert_rowid()"))
                    .get_result::<i64>(conn)?;
                Ok(Item { id, name })
            })
            .await
    }

    async fn update_item(&self, item_id: i64, name: &str) -> Result<Option<Item>, DatabaseError> {
        let name = name.to_string();
        let changes_name = name.clone();
        let affected = self
            .handle
            .execute(move |conn| {
                diesel::update(items::table.filter(items::id.eq(item_id)))
                    .set(UpdateItem {
                        name: &changes_name,
                    })
                    .execute(conn)
            })
            .await?;

        if affected == 0 {
            return Ok(None);
        }
        Ok(Some(Item { id: item_id, name }))
    }

    async fn delete_item(&self, item_id: i64) -> Result<bool, DatabaseError> {
        let affected = self
            .handle
            .execute(move |conn| {
                diesel::delete(items::table.filter(items::id.eq(item_id))).execute(conn)
            })
            .await?;
        Ok(affected > 0)
    }
}
