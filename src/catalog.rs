use std::sync::Arc;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    entities::{category, film, film_category},
    error::StoreResult,
};

pub const PAGE_SIZE: u64 = 10;

/// Highest page whose row offset still fits the database's signed 64-bit
/// OFFSET.
pub const MAX_PAGE: u64 = i64::MAX as u64 / PAGE_SIZE;

const LIKE_ESCAPE: char = '!';

/// Optional constraints for [`Catalog::search_by_filters`]. `None` leaves the
/// query unconstrained; `Some` always applies, even for values that match
/// nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilmFilter {
    pub category_id: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterMetadata {
    pub genres: Vec<category::Model>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

impl FilterMetadata {
    pub fn genre_name(&self, category_id: i32) -> Option<&str> {
        self.genres.iter().find(|g| g.category_id == category_id).map(|g| g.name.as_str())
    }
}

/// Single-slot memo for [`FilterMetadata`]. Only successful loads are kept.
#[derive(Default)]
pub struct MetadataCache {
    slot: RwLock<Option<Arc<FilterMetadata>>>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Arc<FilterMetadata>> {
        self.slot.read().await.clone()
    }

    pub async fn put(&self, meta: Arc<FilterMetadata>) {
        *self.slot.write().await = Some(meta);
    }

    #[cfg(test)]
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
    metadata: Arc<MetadataCache>,
}

impl Catalog {
    pub fn new(db: DatabaseConnection, metadata: Arc<MetadataCache>) -> Self {
        Self { db, metadata }
    }

    #[cfg(test)]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Case-insensitive substring match on the title.
    pub async fn search_by_title(&self, query: &str, page: u64) -> StoreResult<Vec<film::Model>> {
        let Some(offset) = page_offset(page) else {
            return Ok(Vec::new());
        };
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        let title = Expr::expr(Func::lower(Expr::col((film::Entity, film::Column::Title))));

        let films = film::Entity::find()
            .filter(title.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)))
            .order_by_asc(film::Column::FilmId)
            .limit(PAGE_SIZE)
            .offset(offset)
            .all(&self.db)
            .await?;

        debug!(query = %query, page = page, found = films.len(), "title search");
        Ok(films)
    }

    /// Genre list and release-year bounds, served from the cache after the
    /// first successful load.
    pub async fn filter_metadata(&self) -> StoreResult<Arc<FilterMetadata>> {
        if let Some(meta) = self.metadata.get().await {
            return Ok(meta);
        }

        let genres = category::Entity::find()
            .order_by_asc(category::Column::CategoryId)
            .all(&self.db)
            .await?;

        let bounds: Option<(Option<i32>, Option<i32>)> = film::Entity::find()
            .select_only()
            .column_as(Expr::col((film::Entity, film::Column::ReleaseYear)).min(), "min_year")
            .column_as(Expr::col((film::Entity, film::Column::ReleaseYear)).max(), "max_year")
            .into_tuple::<(Option<i32>, Option<i32>)>()
            .one(&self.db)
            .await?;
        let (min_year, max_year) = bounds.unwrap_or_default();

        debug!(genres = genres.len(), ?min_year, ?max_year, "loaded filter metadata");

        let meta = Arc::new(FilterMetadata { genres, min_year, max_year });
        self.metadata.put(meta.clone()).await;
        Ok(meta)
    }

    #[cfg(test)]
    pub async fn invalidate_metadata(&self) {
        self.metadata.invalidate().await;
    }

    /// Conjunction of whichever filters are set. The join to
    /// `film_category` only happens when a category is given.
    pub async fn search_by_filters(
        &self,
        filter: &FilmFilter,
        page: u64,
    ) -> StoreResult<Vec<film::Model>> {
        let Some(offset) = page_offset(page) else {
            return Ok(Vec::new());
        };
        let mut query = film::Entity::find();

        if let Some(category_id) = filter.category_id {
            query = query
                .join(JoinType::InnerJoin, film::Relation::FilmCategory.def())
                .filter(film_category::Column::CategoryId.eq(category_id));
        }
        if let Some(year_from) = filter.year_from {
            query = query.filter(film::Column::ReleaseYear.gte(year_from));
        }
        if let Some(year_to) = filter.year_to {
            query = query.filter(film::Column::ReleaseYear.lte(year_to));
        }

        let films = query
            .order_by_asc(film::Column::FilmId)
            .limit(PAGE_SIZE)
            .offset(offset)
            .all(&self.db)
            .await?;

        debug!(?filter, page = page, found = films.len(), "filter search");
        Ok(films)
    }

    /// One page of the whole catalog.
    pub async fn list_films(&self, page: u64) -> StoreResult<Vec<film::Model>> {
        self.search_by_filters(&FilmFilter::default(), page).await
    }
}

/// Pages past [`MAX_PAGE`] are empty by definition.
fn page_offset(page: u64) -> Option<u64> {
    (page <= MAX_PAGE).then(|| page * PAGE_SIZE)
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}
