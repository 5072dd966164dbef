//! Canonical query construction for the catalog search endpoint.

use bookfinder_types::SearchParams;
use url::form_urlencoded::Serializer;

/// Fixed result-page size requested from the catalog.
pub const PAGE_SIZE: u32 = 20;

/// Fixed field selection requested on every search.
pub const SEARCH_FIELDS: &str =
    "key,title,author_name,first_publish_year,edition_count,cover_i,language,isbn";

/// Build the canonical query string for a parameter record and page.
///
/// Text filters are emitted only when non-empty, the field selection and
/// page size are always present, the language filter is skipped for the
/// "any" sentinel, year bounds pass through as entered, and only
/// non-default sort orders emit a `sort` key. The same inputs always
/// produce the same string, which is what the view compares to decide
/// whether a new request must be dispatched.
pub fn build_query(params: &SearchParams, page: u32) -> String {
    let mut query = Serializer::new(String::new());

    if !params.title.is_empty() {
        query.append_pair("title", &params.title);
    }
    if !params.author.is_empty() {
        query.append_pair("author", &params.author);
    }
    if !params.subject.is_empty() {
        query.append_pair("subject", &params.subject);
    }
    if !params.isbn.is_empty() {
        query.append_pair("isbn", &params.isbn);
    }

    query.append_pair("fields", SEARCH_FIELDS);
    query.append_pair("limit", &PAGE_SIZE.to_string());
    query.append_pair("page", &page.to_string());

    if !params.language_is_any() {
        query.append_pair("language", &params.language);
    }
    if !params.year_from.is_empty() {
        query.append_pair("first_publish_year>=", &params.year_from);
    }
    if !params.year_to.is_empty() {
        query.append_pair("first_publish_year<=", &params.year_to);
    }
    if let Some(sort) = params.sort.as_query_value() {
        query.append_pair("sort", sort);
    }

    query.finish()
}

/// Cover image sizes offered by the covers endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn letter(&self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

/// URL of a book's cover image, or a placeholder when the record
/// carries no cover id.
pub fn cover_url(cover_i: Option<i64>, size: CoverSize) -> String {
    match cover_i {
        Some(id) => format!(
            "https://covers.openlibrary.org/b/id/{}-{}.jpg",
            id,
            size.letter()
        ),
        None => "https://via.placeholder.com/200x300?text=No+Cover".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfinder_types::{SearchParams, SortOrder};

    fn pairs(query: &str) -> Vec<(String, String)> {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    fn value_of<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn empty_params_emit_only_fixed_keys() {
        let query = build_query(&SearchParams::default(), 1);
        let pairs = pairs(&query);

        for key in ["title", "author", "subject", "isbn", "language", "sort"] {
            assert!(value_of(&pairs, key).is_none(), "unexpected key {key}");
        }
        assert!(value_of(&pairs, "first_publish_year>=").is_none());
        assert!(value_of(&pairs, "first_publish_year<=").is_none());

        assert_eq!(value_of(&pairs, "fields"), Some(SEARCH_FIELDS));
        assert_eq!(value_of(&pairs, "limit"), Some("20"));
        assert_eq!(value_of(&pairs, "page"), Some("1"));
    }

    #[test]
    fn text_filters_are_emitted_when_set() {
        let params = SearchParams {
            title: "harry potter".to_string(),
            author: "rowling".to_string(),
            ..SearchParams::default()
        };
        let query = build_query(&params, 3);

        assert!(query.starts_with("title=harry+potter&author=rowling&"));
        assert!(query.contains("page=3"));
    }

    #[test]
    fn language_sentinel_is_skipped() {
        let mut params = SearchParams::default();
        let query = build_query(&params, 1);
        assert!(!query.contains("language="));

        params.language = "eng".to_string();
        let query = build_query(&params, 1);
        assert_eq!(value_of(&pairs(&query), "language"), Some("eng"));
    }

    #[test]
    fn year_bounds_pass_through_unvalidated() {
        let params = SearchParams {
            year_from: "1960".to_string(),
            year_to: "not-a-year".to_string(),
            ..SearchParams::default()
        };
        let pairs = pairs(&build_query(&params, 1));

        assert_eq!(value_of(&pairs, "first_publish_year>="), Some("1960"));
        assert_eq!(value_of(&pairs, "first_publish_year<="), Some("not-a-year"));
    }

    #[test]
    fn sort_key_only_for_non_default_orders() {
        let mut params = SearchParams::default();
        assert!(!build_query(&params, 1).contains("sort="));

        params.sort = SortOrder::Newest;
        let query = build_query(&params, 1);
        assert_eq!(
            value_of(&pairs(&query), "sort"),
            Some("first_publish_year desc")
        );

        params.sort = SortOrder::Oldest;
        let query = build_query(&params, 1);
        assert_eq!(
            value_of(&pairs(&query), "sort"),
            Some("first_publish_year asc")
        );

        params.sort = SortOrder::Editions;
        let query = build_query(&params, 1);
        assert_eq!(value_of(&pairs(&query), "sort"), Some("edition_count desc"));
    }

    #[test]
    fn cover_urls() {
        assert_eq!(
            cover_url(Some(123), CoverSize::Medium),
            "https://covers.openlibrary.org/b/id/123-M.jpg"
        );
        assert_eq!(
            cover_url(Some(9), CoverSize::Large),
            "https://covers.openlibrary.org/b/id/9-L.jpg"
        );
        assert_eq!(
            cover_url(None, CoverSize::Medium),
            "https://via.placeholder.com/200x300?text=No+Cover"
        );
    }
}
