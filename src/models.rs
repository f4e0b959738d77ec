use std::sync::Arc;

use crate::{
    analytics::SearchQuery,
    catalog::{FilmFilter, FilterMetadata, PAGE_SIZE},
    entities::film,
};

/// Which route produced a listing; drives the heading, the form state and
/// the pagination links.
#[derive(Clone, Debug, PartialEq)]
pub enum ListingKind {
    Home,
    Search { query: Option<String> },
    Filter(FilmFilter),
    Genre { category_id: i32, name: String },
}

impl ListingKind {
    pub fn heading(&self) -> String {
        match self {
            ListingKind::Home => "All films".to_string(),
            ListingKind::Search { query: Some(q) } if !q.is_empty() => {
                format!("Results for \u{201c}{q}\u{201d}")
            },
            ListingKind::Search { .. } => "Search".to_string(),
            ListingKind::Filter(_) => "Filtered films".to_string(),
            ListingKind::Genre { name, .. } => name.clone(),
        }
    }

    /// Filter values echoed back into the form.
    pub fn selected(&self) -> FilmFilter {
        match self {
            ListingKind::Filter(filter) => *filter,
            ListingKind::Genre { category_id, .. } => {
                FilmFilter { category_id: Some(*category_id), ..Default::default() }
            },
            _ => FilmFilter::default(),
        }
    }

    pub fn search_text(&self) -> &str {
        match self {
            ListingKind::Search { query: Some(q) } => q,
            _ => "",
        }
    }

    pub fn page_url(&self, page: u64) -> String {
        match self {
            ListingKind::Home => format!("/?page={page}"),
            ListingKind::Search { query } => {
                let q = query.as_deref().unwrap_or_default();
                format!("/search?q={}&page={page}", urlencoding::encode(q))
            },
            ListingKind::Filter(filter) => {
                let mut url = String::from("/filter?");
                for (key, value) in [
                    ("cat_id", filter.category_id),
                    ("y_from", filter.year_from),
                    ("y_to", filter.year_to),
                ] {
                    if let Some(value) = value {
                        url.push_str(&format!("{key}={value}&"));
                    }
                }
                url.push_str(&format!("page={page}"));
                url
            },
            ListingKind::Genre { category_id, .. } => format!("/genre/{category_id}?page={page}"),
        }
    }
}

/// Everything a listing page renders.
#[derive(Clone, Debug)]
pub struct Listing {
    pub kind: ListingKind,
    pub films: Vec<film::Model>,
    pub meta: Arc<FilterMetadata>,
    pub page: u64,
    /// `None` hides the panel.
    pub popular: Option<Vec<SearchQuery>>,
    pub recent: Option<Vec<SearchQuery>>,
}

impl Listing {
    pub fn prev_url(&self) -> Option<String> {
        (self.page > 0).then(|| self.kind.page_url(self.page - 1))
    }

    /// A full page suggests there may be more.
    pub fn next_url(&self) -> Option<String> {
        (self.films.len() as u64 >= PAGE_SIZE)
            .then(|| self.kind.page_url(self.page.saturating_add(1)))
    }
}
