use std::sync::Arc;

use axum::{
    extract::{Path, Query, State, rejection::PathRejection},
    response::Html,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    AppState,
    analytics::SearchQuery,
    catalog::{FilmFilter, FilterMetadata},
    entities::film,
    error::{AppError, AppResult, StoreResult},
    models::{Listing, ListingKind},
    templates,
};

/// Unknown genre ids still render a page.
const UNKNOWN_GENRE: &str = "Unknown genre";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    cat_id: Option<String>,
    y_from: Option<String>,
    y_to: Option<String>,
    page: Option<String>,
}

pub async fn home(State(state): State<Arc<AppState>>, Query(q): Query<PageQuery>) -> Html<String> {
    let page = parse_page(q.page.as_deref());
    let films = degrade("list_films", state.catalog.list_films(page).await);
    render(&state, ListingKind::Home, films, page).await
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let page = parse_page(params.page.as_deref());

    let films = match params.q.as_deref() {
        Some(q) if !q.is_empty() => {
            if page == 0 {
                if let Err(err) = state.queries.record_query(q).await {
                    warn!(op = "record_query", error = %err, "analytics write failed");
                }
            }
            degrade("search_by_title", state.catalog.search_by_title(q, page).await)
        },
        _ => Vec::new(),
    };

    render(&state, ListingKind::Search { query: params.q }, films, page).await
}

pub async fn filter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Html<String> {
    let page = parse_page(params.page.as_deref());
    let filter = FilmFilter {
        category_id: parse_optional_int(params.cat_id.as_deref()),
        year_from: parse_optional_int(params.y_from.as_deref()),
        year_to: parse_optional_int(params.y_to.as_deref()),
    };

    let films = degrade("search_by_filters", state.catalog.search_by_filters(&filter, page).await);
    render(&state, ListingKind::Filter(filter), films, page).await
}

pub async fn genre(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    Query(q): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let Path(category_id) = path.map_err(AppError::bad_request)?;
    let page = parse_page(q.page.as_deref());

    let filter = FilmFilter { category_id: Some(category_id), ..Default::default() };
    let films = degrade("search_by_filters", state.catalog.search_by_filters(&filter, page).await);

    let meta = metadata(&state).await;
    let name = meta.genre_name(category_id).unwrap_or(UNKNOWN_GENRE).to_string();

    Ok(render(&state, ListingKind::Genre { category_id, name }, films, page).await)
}

/// Fetches the side panels and renders the page around `films`.
async fn render(
    state: &AppState,
    kind: ListingKind,
    films: Vec<film::Model>,
    page: u64,
) -> Html<String> {
    let limit = state.config.analytics_panel_size;
    let (meta, popular, recent) = futures::join!(
        metadata(state),
        state.queries.top_by_frequency(limit),
        state.queries.top_by_recency(limit),
    );

    let listing = Listing {
        kind,
        films,
        meta,
        page,
        popular: panel("top_by_frequency", popular),
        recent: panel("top_by_recency", recent),
    };
    Html(templates::listing_page(&listing))
}

async fn metadata(state: &AppState) -> Arc<FilterMetadata> {
    match state.catalog.filter_metadata().await {
        Ok(meta) => meta,
        Err(err) => {
            warn!(op = "filter_metadata", error = %err, "catalog query failed, using empty metadata");
            Arc::new(FilterMetadata::default())
        },
    }
}

fn degrade(op: &str, result: StoreResult<Vec<film::Model>>) -> Vec<film::Model> {
    result.unwrap_or_else(|err| {
        warn!(op = op, error = %err, "catalog query failed, showing no films");
        Vec::new()
    })
}

fn panel(op: &str, result: StoreResult<Vec<SearchQuery>>) -> Option<Vec<SearchQuery>> {
    result
        .inspect_err(|err| warn!(op = op, error = %err, "analytics read failed, hiding panel"))
        .ok()
}

/// Blank or non-numeric input counts as absent.
fn parse_optional_int(raw: Option<&str>) -> Option<i32> {
    raw.map(str::trim).filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}

fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        analytics::{QueryLog, tests::query_log},
        app,
        catalog::{
            Catalog, MetadataCache,
            tests::{add_category, add_film, seeded},
        },
        config::Config,
    };

    #[test]
    fn optional_ints_treat_garbage_as_absent() {
        assert_eq!(parse_optional_int(None), None);
        assert_eq!(parse_optional_int(Some("")), None);
        assert_eq!(parse_optional_int(Some("   ")), None);
        assert_eq!(parse_optional_int(Some("abc")), None);
        assert_eq!(parse_optional_int(Some("20x6")), None);
        assert_eq!(parse_optional_int(Some(" 2006 ")), Some(2006));
        assert_eq!(parse_optional_int(Some("0")), Some(0));
        assert_eq!(parse_optional_int(Some("-3")), Some(-3));
    }

    #[test]
    fn page_defaults_to_zero() {
        assert_eq!(parse_page(None), 0);
        assert_eq!(parse_page(Some("")), 0);
        assert_eq!(parse_page(Some("-1")), 0);
        assert_eq!(parse_page(Some("two")), 0);
        assert_eq!(parse_page(Some("3")), 3);
    }

    fn config() -> Config {
        Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "sqlite::memory:".to_string(),
            analytics_database_url: "sqlite::memory:".to_string(),
            static_dir: "static".into(),
            analytics_panel_size: 5,
        }
    }

    async fn state_with(queries: QueryLog) -> Arc<AppState> {
        Arc::new(AppState { config: Arc::new(config()), catalog: seeded().await, queries })
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response =
            router.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn home_lists_films_and_filters() {
        let state = state_with(query_log().await).await;
        let (status, body) = get(app(state), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ACADEMY DINOSAUR"));
        assert!(body.contains("ACE GOLDFINGER"));
        assert!(body.contains("Animation"));
        assert!(body.contains("Popular searches"));
        assert!(body.contains("Recent searches"));
    }

    #[tokio::test]
    async fn search_records_only_on_first_page() {
        let state = state_with(query_log().await).await;

        let (status, body) = get(app(state.clone()), "/search?q=Academy").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ACADEMY DINOSAUR"));
        assert!(!body.contains("ACE GOLDFINGER"));

        get(app(state.clone()), "/search?q=academy&page=1").await;

        let top = state.queries.top_by_frequency(5).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].query, "academy");
        assert_eq!(top[0].count, 1);
    }

    #[tokio::test]
    async fn empty_search_records_nothing() {
        let state = state_with(query_log().await).await;

        let (status, body) = get(app(state.clone()), "/search?q=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No films found."));

        get(app(state.clone()), "/search").await;
        assert!(state.queries.top_by_recency(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn filter_ignores_unparseable_params() {
        let state = state_with(query_log().await).await;

        let (status, body) = get(app(state.clone()), "/filter?cat_id=abc&y_from=&y_to=x").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ACADEMY DINOSAUR"));
        assert!(body.contains("ACE GOLDFINGER"));

        let (_, body) = get(app(state.clone()), "/filter?cat_id=2&y_from=2000&y_to=2010").await;
        assert!(!body.contains("ACADEMY DINOSAUR"));
        assert!(body.contains("ACE GOLDFINGER"));

        let (_, body) = get(app(state), "/filter?y_from=2007").await;
        assert!(body.contains("No films found."));
    }

    #[tokio::test]
    async fn genre_page_names_its_category() {
        let state = state_with(query_log().await).await;

        let (status, body) = get(app(state.clone()), "/genre/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Action</title>"));
        assert!(body.contains("ACADEMY DINOSAUR"));
        assert!(!body.contains("ACE GOLDFINGER"));

        let (status, body) = get(app(state.clone()), "/genre/42").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(UNKNOWN_GENRE));
        assert!(body.contains("No films found."));

        let (status, _) = get(app(state), "/genre/action").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn genre_pages_paginate_within_the_genre() {
        let state = state_with(query_log().await).await;
        add_category(&state.catalog, 3, "Comedy").await;
        for i in 0..12 {
            add_film(&state.catalog, &format!("COMEDY {i:02}"), Some(2001), Some(3)).await;
        }

        let (_, first) = get(app(state.clone()), "/genre/3").await;
        assert!(first.contains("COMEDY 09"));
        assert!(!first.contains("COMEDY 10"));
        assert!(first.contains("/genre/3?page=1"));

        let (_, second) = get(app(state), "/genre/3?page=1").await;
        assert!(second.contains("COMEDY 10"));
        assert!(second.contains("COMEDY 11"));
        assert!(!second.contains("COMEDY 00"));
    }

    #[tokio::test]
    async fn broken_analytics_store_hides_panels() {
        let broken = QueryLog::new(sea_orm::Database::connect("sqlite::memory:").await.unwrap());
        let state = state_with(broken).await;

        let (status, body) = get(app(state), "/search?q=ace").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("ACE GOLDFINGER"));
        assert!(!body.contains("Popular searches"));
        assert!(!body.contains("Recent searches"));
    }

    #[tokio::test]
    async fn broken_catalog_renders_empty_pages() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let state = Arc::new(AppState {
            config: Arc::new(config()),
            catalog: Catalog::new(db, Arc::new(MetadataCache::new())),
            queries: query_log().await,
        });

        for uri in ["/", "/filter?cat_id=1&y_from=2000", "/search?q=ace", "/genre/1"] {
            let (status, body) = get(app(state.clone()), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.contains("No films found."), "{uri}");
            assert_eq!(body.matches("<option").count(), 1, "{uri}");
            assert!(body.contains(r#"<option value="">Any</option>"#), "{uri}");
            assert!(body.contains("Popular searches"), "{uri}");
        }

        let (_, body) = get(app(state), "/genre/1").await;
        assert!(body.contains(UNKNOWN_GENRE));
    }

    #[tokio::test]
    async fn out_of_range_pages_render_empty() {
        let state = state_with(query_log().await).await;

        for (uri, label) in [
            ("/?page=18446744073709551615", "Page 18446744073709551615"),
            ("/?page=922337203685477581", "Page 922337203685477582"),
            ("/search?q=ace&page=18446744073709551615", "Page 18446744073709551615"),
            ("/filter?cat_id=1&page=18446744073709551615", "Page 18446744073709551615"),
            ("/genre/1?page=18446744073709551615", "Page 18446744073709551615"),
        ] {
            let (status, body) = get(app(state.clone()), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert!(body.contains("No films found."), "{uri}");
            assert!(body.contains(label), "{uri}");
        }
    }

    #[tokio::test]
    async fn analytics_panels_show_counts() {
        let state = state_with(query_log().await).await;
        for _ in 0..3 {
            get(app(state.clone()), "/search?q=Goldfinger").await;
        }

        let top = state.queries.top_by_frequency(5).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].count, 3);

        let (_, body) = get(app(state), "/").await;
        assert!(body.contains("goldfinger"));
        assert!(body.contains(" · 3"));
    }
}
