//! Extracted path parameter storage.
//!
//! Parameters extracted from a matched template are kept in capture order
//! (the order the tokens appear in the pattern), using a small-vector
//! backing so the common one-or-two parameter case never touches the heap.

use smallvec::SmallVec;

/// Number of parameters stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Parameters extracted from a matched path template.
///
/// Pairs are stored in the order their tokens appear in the template, so
/// iterating yields a deterministic, pattern-defined order.
///
/// # Example
///
/// ```rust
/// use hermes_router::Params;
///
/// let mut params = Params::new();
/// params.push("category", "tools");
/// params.push("item", "wrench");
///
/// assert_eq!(params.get("item"), Some("wrench"));
/// assert_eq!(params.get("vendor"), None);
/// let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
/// assert_eq!(names, vec!["category", "item"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, preserving capture order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value captured under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a parameter named `name` was captured.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.iter().any(|(n, _)| n == name)
    }

    /// Returns true if no parameters were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_empty() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);
        assert_eq!(params.get("anything"), None);
    }

    #[test]
    fn test_params_push_and_get() {
        let mut params = Params::new();
        params.push("id", "42");
        params.push("action", "edit");

        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("action"), Some("edit"));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_params_capture_order_is_preserved() {
        let mut params = Params::new();
        params.push("z", "1");
        params.push("a", "2");
        params.push("m", "3");

        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_params_spill_past_inline_capacity() {
        let mut params = Params::new();
        for i in 0..10 {
            params.push(format!("key{i}"), format!("value{i}"));
        }
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("key7"), Some("value7"));
    }

    #[test]
    fn test_params_from_iterator() {
        let params: Params = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("b"), Some("2"));
    }
}
