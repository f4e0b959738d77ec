pub mod category;
pub mod film;
pub mod film_category;
pub mod search_query;
