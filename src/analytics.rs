use jiff::Timestamp;
use sea_orm::{
    DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;

use crate::{entities::search_query, error::StoreResult};

#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub count: i64,
    pub last_searched: Timestamp,
}

impl From<search_query::Model> for SearchQuery {
    fn from(m: search_query::Model) -> Self {
        Self {
            query: m.query,
            count: m.count,
            last_searched: Timestamp::from_millisecond(m.last_searched)
                .unwrap_or(Timestamp::UNIX_EPOCH),
        }
    }
}

/// Trimmed and lower-cased form used as the record key, or `None` for blank
/// input.
pub fn normalize(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_lowercase())
}

/// Hit counter per normalized search string.
#[derive(Clone)]
pub struct QueryLog {
    db: DatabaseConnection,
}

impl QueryLog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record_query(&self, text: &str) -> StoreResult<()> {
        self.record_query_at(text, Timestamp::now()).await
    }

    /// Single upsert statement; concurrent identical writes are serialized by
    /// the store's unique key on `query`.
    pub async fn record_query_at(&self, text: &str, at: Timestamp) -> StoreResult<()> {
        let Some(query) = normalize(text) else {
            return Ok(());
        };

        let model = search_query::ActiveModel {
            id: Default::default(),
            query: Set(query.clone()),
            count: Set(1),
            last_searched: Set(at.as_millisecond()),
        };

        search_query::Entity::insert(model)
            .on_conflict(
                OnConflict::column(search_query::Column::Query)
                    .value(
                        search_query::Column::Count,
                        Expr::col((search_query::Entity, search_query::Column::Count)).add(1),
                    )
                    .update_column(search_query::Column::LastSearched)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        debug!(query = %query, "recorded search query");
        Ok(())
    }

    pub async fn top_by_frequency(&self, limit: u64) -> StoreResult<Vec<SearchQuery>> {
        let rows = search_query::Entity::find()
            .order_by_desc(search_query::Column::Count)
            .order_by_desc(search_query::Column::LastSearched)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(SearchQuery::from).collect())
    }

    pub async fn top_by_recency(&self, limit: u64) -> StoreResult<Vec<SearchQuery>> {
        let rows = search_query::Entity::find()
            .order_by_desc(search_query::Column::LastSearched)
            .order_by_desc(search_query::Column::Count)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(SearchQuery::from).collect())
    }
}
