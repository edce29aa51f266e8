//! Route pattern compilation.
//!
//! A pattern such as `/orgs/{org}/users/{id}` compiles into an anchored,
//! case-insensitive regular expression in which every placeholder matches a
//! single path segment (`[^/]+`). Literal text is matched verbatim.

use regex::{Regex, RegexBuilder};

use crate::error::PatternError;
use crate::params::Params;

/// A compiled route pattern.
///
/// Holds the matcher together with the placeholder names in declaration
/// order. The number of capture groups always equals the number of names.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("/users/{id}").unwrap();
/// assert_eq!(pattern.param_names(), ["id"]);
///
/// let params = pattern.captures("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
/// assert!(!pattern.matches("/users/42/posts"));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl CompiledPattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for unbalanced braces, empty or duplicate
    /// placeholder names, and placeholders spanning a `/`.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut expr = String::with_capacity(pattern.len() + 16);
        expr.push('^');

        let mut param_names: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices();

        while let Some((position, ch)) = chars.next() {
            match ch {
                '{' => {
                    let name = read_placeholder(pattern, position, &mut chars)?;
                    if param_names.iter().any(|existing| *existing == name) {
                        return Err(PatternError::DuplicateName {
                            pattern: pattern.to_string(),
                            name,
                        });
                    }

                    expr.push_str(&regex::escape(&literal));
                    literal.clear();
                    expr.push_str("([^/]+)");
                    param_names.push(name);
                }
                '}' => {
                    return Err(PatternError::Unopened {
                        pattern: pattern.to_string(),
                        position,
                    })
                }
                other => literal.push(other),
            }
        }

        expr.push_str(&regex::escape(&literal));
        expr.push('$');

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .build()
            .map_err(|e| PatternError::Invalid {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        debug_assert_eq!(regex.captures_len() - 1, param_names.len());

        Ok(Self {
            source: pattern.to_string(),
            regex,
            param_names,
        })
    }

    /// Returns the original pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns placeholder names in declaration order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns true when the pattern has no placeholders.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.param_names.is_empty()
    }

    /// Returns true if the whole path matches.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches the whole path and returns the captured segments.
    ///
    /// Captures are returned in placeholder order, paired with their names.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let mut params = Params::with_capacity(self.param_names.len());
        for (index, name) in self.param_names.iter().enumerate() {
            let value = caps.get(index + 1).map_or("", |m| m.as_str());
            params.push(name.as_str(), value);
        }
        Some(params)
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

// Consumes characters up to the closing brace and returns the name.
fn read_placeholder(
    pattern: &str,
    open: usize,
    chars: &mut std::str::CharIndices<'_>,
) -> Result<String, PatternError> {
    let mut name = String::new();
    for (position, ch) in chars.by_ref() {
        match ch {
            '}' if name.is_empty() => {
                return Err(PatternError::EmptyName {
                    pattern: pattern.to_string(),
                    position: open,
                })
            }
            '}' => return Ok(name),
            '{' => {
                return Err(PatternError::Nested {
                    pattern: pattern.to_string(),
                    position,
                })
            }
            '/' => break,
            other => name.push(other),
        }
    }
    Err(PatternError::Unclosed {
        pattern: pattern.to_string(),
        position: open,
    })
}
