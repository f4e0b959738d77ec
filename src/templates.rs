use maud::{DOCTYPE, Markup, html};

use crate::{
    analytics::SearchQuery,
    catalog::FilterMetadata,
    entities::film,
    models::{Listing, ListingKind},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn listing_page(listing: &Listing) -> String {
    let heading = listing.kind.heading();

    page(
        &heading,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-5xl mx-auto px-6 py-10" {
                    header class="flex items-start justify-between gap-6" {
                        div {
                            a class="text-3xl font-bold text-gray-900" href="/" { "Film Catalog" }
                            h1 class="mt-2 text-xl text-gray-700" { (heading) }
                        }
                    }

                    div class="mt-8 grid gap-8 md:grid-cols-3" {
                        aside class="space-y-6" {
                            (search_form(listing.kind.search_text()))
                            (filter_form(&listing.meta, &listing.kind))
                            @if let Some(popular) = &listing.popular {
                                (query_panel("Popular searches", popular))
                            }
                            @if let Some(recent) = &listing.recent {
                                (query_panel("Recent searches", recent))
                            }
                        }

                        main class="md:col-span-2" {
                            @if listing.films.is_empty() {
                                div class="bg-white shadow rounded-lg p-8" {
                                    p class="text-gray-600" { "No films found." }
                                }
                            } @else {
                                div class="space-y-4" {
                                    @for film in &listing.films {
                                        (film_card(film))
                                    }
                                }
                            }
                            (pagination(listing))
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
                link rel="stylesheet" href="/static/style.css";
            }
            body { (body) }
        }
    }
    .into_string()
}

fn search_form(current: &str) -> Markup {
    html! {
        form class="bg-white shadow rounded-lg p-4" method="get" action="/search" {
            label class="block text-sm font-medium text-gray-700" for="q" { "Title" }
            input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="q" id="q" value=(current);
            button class="mt-3 w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
        }
    }
}

fn filter_form(meta: &FilterMetadata, kind: &ListingKind) -> Markup {
    let selected = kind.selected();
    let year = |v: Option<i32>| v.map(|y| y.to_string()).unwrap_or_default();

    html! {
        form class="bg-white shadow rounded-lg p-4 space-y-3" method="get" action="/filter" {
            div {
                label class="block text-sm font-medium text-gray-700" for="cat_id" { "Genre" }
                select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="cat_id" id="cat_id" {
                    option value="" { "Any" }
                    @for genre in &meta.genres {
                        option value=(genre.category_id) selected[selected.category_id == Some(genre.category_id)] {
                            (genre.name)
                        }
                    }
                }
            }
            div class="flex gap-2" {
                input class="w-1/2 rounded-md border border-gray-300 px-3 py-2" type="number" name="y_from"
                    placeholder=(year(meta.min_year)) value=(year(selected.year_from));
                input class="w-1/2 rounded-md border border-gray-300 px-3 py-2" type="number" name="y_to"
                    placeholder=(year(meta.max_year)) value=(year(selected.year_to));
            }
            button class="w-full rounded-md bg-gray-800 px-4 py-2 font-semibold text-white hover:bg-gray-900" type="submit" { "Filter" }
            @if !meta.genres.is_empty() {
                ul class="genre-links flex flex-wrap gap-2 text-sm" {
                    @for genre in &meta.genres {
                        li { a class="text-blue-600 hover:text-blue-800" href=(format!("/genre/{}", genre.category_id)) { (genre.name) } }
                    }
                }
            }
        }
    }
}

fn query_panel(label: &str, queries: &[SearchQuery]) -> Markup {
    html! {
        section class="bg-white shadow rounded-lg p-4" {
            h2 class="text-sm font-semibold text-gray-700" { (label) }
            @if queries.is_empty() {
                p class="mt-2 text-sm text-gray-500" { "No searches yet." }
            } @else {
                ol class="mt-2 space-y-1" {
                    @for q in queries {
                        li class="text-sm text-gray-700" {
                            a class="hover:text-blue-700" href=(format!("/search?q={}", urlencoding::encode(&q.query))) { (q.query) }
                            span class="text-gray-500" { " · " (q.count) }
                        }
                    }
                }
            }
        }
    }
}

fn film_card(film: &film::Model) -> Markup {
    let features = film.special_features();

    html! {
        article class="bg-white shadow rounded-lg p-6" {
            h2 class="text-xl font-semibold text-gray-900" {
                (film.title)
                @if let Some(year) = film.release_year {
                    span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                }
            }
            p class="mt-1 text-sm text-gray-500" {
                @if let Some(rating) = film.rating {
                    span class="mr-3 rounded border border-gray-300 px-1" { (rating.label()) }
                }
                @if let Some(length) = film.length {
                    span class="mr-3" { (length) " min" }
                }
                span { "$" (format!("{:.2}", film.rental_rate)) " / " (film.rental_duration) " days" }
            }
            @if let Some(description) = &film.description {
                p class="mt-3 text-gray-700" { (description) }
            }
            @if !features.is_empty() {
                ul class="mt-3 flex flex-wrap gap-2" {
                    @for feature in features {
                        li class="rounded bg-gray-100 px-2 py-0.5 text-xs text-gray-600" { (feature.label()) }
                    }
                }
            }
        }
    }
}

fn pagination(listing: &Listing) -> Markup {
    html! {
        nav class="mt-6 flex justify-between text-sm" {
            @if let Some(url) = listing.prev_url() {
                a class="text-blue-600 hover:text-blue-800" href=(url) { "← Previous" }
            } @else {
                span {}
            }
            span class="text-gray-500" { "Page " (listing.page.saturating_add(1)) }
            @if let Some(url) = listing.next_url() {
                a class="text-blue-600 hover:text-blue-800" href=(url) { "Next →" }
            } @else {
                span {}
            }
        }
    }
}
