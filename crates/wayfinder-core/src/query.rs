//! Multi-valued query parameters.

use indexmap::IndexMap;

use crate::Value;

/// Query parameters as delivered by the transport.
///
/// Keys may repeat (checkbox groups, `?tag=a&tag=b`); every value is kept in
/// arrival order.
///
/// # Example
///
/// ```
/// use wayfinder_core::QueryParams;
///
/// let query = QueryParams::parse("tag=a&tag=b&page=2").unwrap();
/// assert_eq!(query.get("page"), Some("2"));
/// assert_eq!(query.get_all("tag"), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// A leading `?` is ignored.
    pub fn parse(query: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
        Ok(Self { pairs })
    }

    /// Adds a value, keeping any earlier values for the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Builder form of [`append`](Self::append).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// Returns the first value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for a key in arrival order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns true if the key is present at least once.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of key/value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates all pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds the map injected into query-map handler parameters.
    ///
    /// A key with one value maps to that string; a key with several values
    /// maps to the list of them. Keys appear in first-seen order.
    #[must_use]
    pub fn to_value_map(&self) -> IndexMap<String, Value> {
        let mut grouped: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (key, value) in &self.pairs {
            grouped.entry(key.as_str()).or_default().push(value.as_str());
        }

        grouped
            .into_iter()
            .map(|(key, values)| {
                let value = match values.as_slice() {
                    [single] => Value::from(*single),
                    many => Value::List(many.iter().map(|v| Value::from(*v)).collect()),
                };
                (key.to_string(), value)
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
