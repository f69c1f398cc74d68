//! Artwork catalogue endpoints
//!
//! Maps to the `artworks` table exposed through the backend's REST layer.
//! Row-level security on the backend already hides unapproved rows from
//! buyers; the explicit `status=eq.approved` filter keeps admin and service
//! role sessions from seeing them in search.

use crate::client::MarketplaceClient;
use crate::error::{ApiError, ApiResult};
use artmarket_search::{MatchRecord, RecordQuery, RecordStore, StoreError, SEARCHABLE_COLUMNS};
use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

/// Table holding artworks
const ARTWORKS_TABLE: &str = "artworks";

/// Columns fetched for each artwork, with its images embedded
const ARTWORK_SELECT: &str = "*,artwork_images(image_url,is_primary)";

/// Artworks API interface
#[derive(Clone)]
pub struct ArtworksApi {
    client: MarketplaceClient,
    limit: Option<u32>,
}

impl ArtworksApi {
    /// Create a new artworks API interface
    pub(crate) fn new(client: MarketplaceClient) -> Self {
        Self {
            client,
            limit: None,
        }
    }

    /// Builder-style method to cap rows returned per query
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run a catalogue query
    ///
    /// GET /rest/v1/artworks?select=...&status=eq.approved&or=(...)&order=created_at.desc
    pub async fn query(&self, query: &RecordQuery) -> ApiResult<Vec<MatchRecord>> {
        let url = self.query_url(query)?;
        debug!(pattern = ?query.pattern, category = ?query.category, "Querying artworks");
        self.client.get_url(url.as_str()).await
    }

    fn table_url(&self) -> ApiResult<Url> {
        let raw = self.client.config().rest_url(ARTWORKS_TABLE);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn query_url(&self, query: &RecordQuery) -> ApiResult<Url> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .extend_pairs(query_pairs(query, self.limit));
        Ok(url)
    }
}

#[async_trait]
impl RecordStore for ArtworksApi {
    async fn find(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>, StoreError> {
        self.query(query).await.map_err(StoreError::from)
    }
}

/// REST query parameters for a catalogue query, in request order.
#[must_use]
pub fn query_pairs(query: &RecordQuery, limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("select", ARTWORK_SELECT.to_string())];

    if query.approved_only {
        pairs.push(("status", "eq.approved".to_string()));
    }
    if let Some(ref category) = query.category {
        pairs.push(("category", format!("eq.{category}")));
    }
    if let Some(ref pattern) = query.pattern {
        pairs.push(("or", any_column_ilike(pattern)));
    }

    pairs.push(("order", "created_at.desc".to_string()));
    if let Some(limit) = limit {
        pairs.push(("limit", limit.to_string()));
    }
    pairs
}

/// `(title.ilike."*p*",artist_name.ilike."*p*",...)` over every searchable column.
fn any_column_ilike(pattern: &str) -> String {
    let value = quote_filter_value(&format!("*{}*", escape_like(pattern)));
    let clauses: Vec<String> = SEARCHABLE_COLUMNS
        .iter()
        .map(|column| format!("{column}.ilike.{value}"))
        .collect();
    format!("({})", clauses.join(","))
}

/// Backslash-escape LIKE metacharacters so the pattern matches as a plain substring.
fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '*' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Double-quote a logical-filter value so commas, dots, and parentheses stay literal.
fn quote_filter_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn api() -> ArtworksApi {
        let config = ClientConfig::development().with_base_url("https://art.example.co");
        MarketplaceClient::with_config(config).unwrap().artworks()
    }

    #[test]
    fn test_browse_pairs() {
        let pairs = query_pairs(&RecordQuery::browse(Some("paintings")), None);
        assert_eq!(
            pairs,
            vec![
                ("select", ARTWORK_SELECT.to_string()),
                ("status", "eq.approved".to_string()),
                ("category", "eq.paintings".to_string()),
                ("order", "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_pattern_matches_every_column() {
        let pairs = query_pairs(&RecordQuery::matching("monet", None), Some(24));
        let or = &pairs.iter().find(|(k, _)| *k == "or").unwrap().1;

        assert!(or.starts_with("(title.ilike.\"*monet*\","));
        for column in SEARCHABLE_COLUMNS {
            assert!(or.contains(&format!("{column}.ilike.\"*monet*\"")));
        }
        assert_eq!(pairs.last().unwrap(), &("limit", "24".to_string()));
    }

    #[test]
    fn test_reserved_characters_are_quoted() {
        assert_eq!(quote_filter_value("a,b.(c)"), "\"a,b.(c)\"");
        assert_eq!(quote_filter_value("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
    }

    #[test]
    fn test_like_metacharacters_stay_literal() {
        assert_eq!(escape_like("50% *off*"), r"50\% \*off\*");
        assert_eq!(escape_like("a_b"), r"a\_b");
        assert_eq!(escape_like(r"c:\art"), r"c:\\art");
        assert_eq!(escape_like("monet"), "monet");
    }

    #[test]
    fn test_lone_wildcard_is_not_match_all() {
        let percent = any_column_ilike("%");
        assert!(percent.starts_with(r#"(title.ilike."*\\%*","#));
        assert!(!percent.contains(r#""**""#));

        let underscore = any_column_ilike("a_b");
        assert!(underscore.contains(r#"title.ilike."*a\\_b*""#));
    }

    #[test]
    fn test_query_url_is_encoded() {
        let url = api()
            .query_url(&RecordQuery::matching("oil, canvas", Some("paintings")))
            .unwrap();

        assert_eq!(url.path(), "/rest/v1/artworks");
        let or = url
            .query_pairs()
            .find(|(k, _)| k == "or")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(or.contains("description.ilike.\"*oil, canvas*\""));
        assert!(!url.as_str().contains(' '));
    }
}
