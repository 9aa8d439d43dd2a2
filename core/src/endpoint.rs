//! Endpoint paths, query parameters, and cache-key construction.

use std::fmt;

use url::form_urlencoded;

/// One path segment: a resource name or a numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Name(String),
    Id(u64),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Ordered, non-empty list of path segments below `/api/`.
///
/// ```
/// use metron_core::Endpoint;
///
/// let endpoint = Endpoint::new("character").id(1).then("issue_list");
/// assert_eq!(endpoint.path(), "character/1/issue_list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<Segment>,
}

impl Endpoint {
    pub fn new(resource: &str) -> Self {
        Self {
            segments: vec![Segment::Name(resource.to_string())],
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.segments.push(Segment::Id(id));
        self
    }

    pub fn then(mut self, name: &str) -> Self {
        self.segments.push(Segment::Name(name.to_string()));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Segments joined with `/`, without leading or trailing slash.
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// A scalar query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

/// Filter parameters for list requests.
///
/// Behaves like a map: inserting an existing key replaces its value in
/// place. Insertion order is what goes on the wire; the cache key uses the
/// key-sorted form from [`QueryParams::canonical`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Builder form of [`QueryParams::insert`].
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Pairs in insertion order, rendered as strings.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.pairs
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }

    /// Form-urlencoded query string with keys in sorted order.
    pub fn canonical(&self) -> String {
        let mut sorted: Vec<&(String, ParamValue)> = self.pairs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in sorted {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}

impl<K: AsRef<str>, V: Into<ParamValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key.as_ref(), value);
        }
        params
    }
}

/// Cache key for a GET of `url` with `params`: the URL alone when there are
/// no params, otherwise the URL followed by `?` and the canonical query.
pub fn cache_key(url: &str, params: &QueryParams) -> String {
    if params.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{}", params.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://metron.cloud/api/issue/";

    #[test]
    fn path_joins_names_and_ids() {
        let endpoint = Endpoint::new("team").id(7).then("issue_list");
        assert_eq!(endpoint.path(), "team/7/issue_list");
        assert_eq!(endpoint.segments().len(), 3);
    }

    #[test]
    fn cache_key_without_params_is_url() {
        assert_eq!(cache_key(URL, &QueryParams::new()), URL);
    }

    #[test]
    fn cache_key_ignores_insertion_order() {
        let forward = QueryParams::new()
            .with("series_name", "action comics")
            .with("number", 1)
            .with("cover_year", 1938);
        let backward = QueryParams::new()
            .with("cover_year", 1938)
            .with("number", 1)
            .with("series_name", "action comics");
        assert_eq!(cache_key(URL, &forward), cache_key(URL, &backward));
        assert_eq!(
            cache_key(URL, &forward),
            "https://metron.cloud/api/issue/?cover_year=1938&number=1&series_name=action+comics"
        );
    }

    #[test]
    fn cache_key_differs_on_any_value() {
        let a = QueryParams::new().with("name", "batman").with("page", 1);
        let b = QueryParams::new().with("name", "batman").with("page", 2);
        assert_ne!(cache_key(URL, &a), cache_key(URL, &b));
    }

    #[test]
    fn insert_replaces_existing_key_in_place() {
        let mut params = QueryParams::new().with("a", 1).with("b", 2);
        params.insert("a", "x");
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("a".to_string(), "x".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn canonical_encodes_reserved_characters() {
        let params: QueryParams = [("name", "X-Men & Friends")].into_iter().collect();
        assert_eq!(params.canonical(), "name=X-Men+%26+Friends");
    }
}
