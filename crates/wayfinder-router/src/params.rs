//! Captured path parameters.
//!
//! Captures are kept in placeholder declaration order so that callers can
//! read them by name or by position. Most route patterns declare a handful of
//! placeholders, so the storage lives inline until it outgrows that.

use smallvec::SmallVec;

const INLINE_CAPTURES: usize = 4;

/// One placeholder and the segment it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    name: String,
    value: String,
}

impl Capture {
    fn pair(&self) -> (&str, &str) {
        (&self.name, &self.value)
    }
}

/// Path segments captured by a route pattern.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::Params;
///
/// let mut params = Params::new();
/// params.push("orgId", "acme");
/// params.push("userId", "7");
///
/// assert_eq!(params.get("userId"), Some("7"));
/// assert_eq!(params.get_index(0), Some(("orgId", "acme")));
/// assert_eq!(params.values().collect::<Vec<_>>(), ["acme", "7"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    captures: SmallVec<[Capture; INLINE_CAPTURES]>,
}

impl Params {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty capture set sized for `n` placeholders.
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            captures: SmallVec::with_capacity(n),
        }
    }

    /// Records the value captured for a placeholder.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.captures.push(Capture {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Looks a capture up by placeholder name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.captures
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Declaration index of a placeholder.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.captures.iter().position(|c| c.name == name)
    }

    /// The capture at a declaration index, as `(name, value)`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.captures.get(index).map(Capture::pair)
    }

    /// True when the pattern had no placeholders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.captures.iter().map(Capture::pair)
    }

    /// Iterates the captured values alone.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.captures.iter().map(|c| c.value.as_str())
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter =
        std::iter::Map<std::slice::Iter<'a, Capture>, fn(&'a Capture) -> (&'a str, &'a str)>;

    fn into_iter(self) -> Self::IntoIter {
        self.captures.iter().map(Capture::pair)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}
