//! Path template compilation and matching.
//!
//! A pattern such as `/users/{id}/posts/{slug}` is compiled into a single
//! anchored matcher. Literal text must match the URI verbatim; each
//! `{name}` token captures one region using its bound expression. The
//! default expression matches any run of non-separator characters, and can
//! be overridden per token at registration time (for example constraining
//! `{id}` to digits).
//!
//! Matching is all-or-nothing: a URI either satisfies the whole pattern and
//! yields every token's value, or the template reports no match at all.

use indexmap::IndexMap;
use regex::Regex;

use crate::error::PatternError;
use crate::params::Params;

/// Default token expression: any non-empty run of non-separator characters.
const DEFAULT_TOKEN_EXPR: &str = "[^/]+";

/// Per-token matching expression overrides, keyed by token name.
///
/// Every key must name a token that occurs in the pattern the overrides are
/// compiled against; an unknown key fails compilation.
pub type ParamOverrides = IndexMap<String, String>;

/// One piece of a parsed pattern, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text matched verbatim.
    Literal(String),
    /// A named capture token.
    Token(String),
}

/// A compiled path template.
///
/// Immutable once compiled. Token names are unique within one template.
///
/// # Example
///
/// ```rust
/// use hermes_router::{ParamOverrides, PathTemplate};
///
/// let mut overrides = ParamOverrides::new();
/// overrides.insert("id".to_string(), "[0-9]+".to_string());
///
/// let template = PathTemplate::compile("/users/{id}", &overrides).unwrap();
///
/// let params = template.match_uri("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// assert!(template.match_uri("/users/abc").is_none());
/// assert!(template.match_uri("/users/42/posts").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathTemplate {
    /// The original, uncompiled pattern.
    pattern: String,
    /// Token names in order of appearance.
    tokens: Vec<String>,
    /// The assembled anchored matcher.
    matcher: Regex,
}

impl PathTemplate {
    /// Compiles a pattern and its per-token overrides into a template.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when the pattern has unbalanced token
    /// delimiters, repeats a token name, an override names a token absent
    /// from the pattern, or an expression is not a valid regular
    /// expression.
    pub fn compile(pattern: &str, overrides: &ParamOverrides) -> Result<Self, PatternError> {
        let segments = parse_pattern(pattern)?;

        let mut tokens: Vec<String> = Vec::new();
        for segment in &segments {
            if let Segment::Token(name) = segment {
                if tokens.iter().any(|t| t == name) {
                    return Err(PatternError::duplicate_token(pattern, name.clone()));
                }
                tokens.push(name.clone());
            }
        }

        for name in overrides.keys() {
            if !tokens.iter().any(|t| t == name) {
                return Err(PatternError::unknown_override(pattern, name.clone()));
            }
        }

        let mut source = String::with_capacity(pattern.len() + 16);
        source.push('^');
        for segment in &segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Token(name) => {
                    let expr = overrides
                        .get(name)
                        .map_or(DEFAULT_TOKEN_EXPR, String::as_str);
                    // Validate standalone first so the failure is attributed
                    // to the token that carries the bad expression.
                    if let Err(err) = Regex::new(expr) {
                        return Err(PatternError::InvalidExpression {
                            name: name.clone(),
                            source: err,
                        });
                    }
                    source.push_str("(?P<");
                    source.push_str(name);
                    source.push('>');
                    source.push_str(expr);
                    source.push(')');
                }
            }
        }
        source.push('$');

        let matcher = Regex::new(&source).map_err(|err| PatternError::Compile {
            pattern: pattern.to_string(),
            source: err,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
            matcher,
        })
    }

    /// Matches a URI against the template.
    ///
    /// On success returns the captured parameters in order of token
    /// appearance; on any mismatch returns `None`. Partial matches are
    /// never produced.
    #[must_use]
    pub fn match_uri(&self, uri: &str) -> Option<Params> {
        let captures = self.matcher.captures(uri)?;
        let mut params = Params::new();
        for name in &self.tokens {
            if let Some(found) = captures.name(name) {
                params.push(name.clone(), found.as_str());
            }
        }
        Some(params)
    }

    /// Returns the original, uncompiled pattern.
    ///
    /// Intended for diagnostics and middleware introspection only; it plays
    /// no part in matching.
    #[must_use]
    pub fn as_pattern(&self) -> &str {
        &self.pattern
    }

    /// Iterates over token names in order of appearance.
    pub fn token_names(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

/// Splits a pattern into literal and token segments.
fn parse_pattern(pattern: &str) -> Result<Vec<Segment>, PatternError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    match inner {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(PatternError::unbalanced(pattern)),
                        other => name.push(other),
                    }
                }
                if !closed {
                    return Err(PatternError::unbalanced(pattern));
                }
                if !is_valid_token_name(&name) {
                    return Err(PatternError::invalid_token(pattern, name));
                }
                segments.push(Segment::Token(name));
            }
            '}' => return Err(PatternError::unbalanced(pattern)),
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Token names feed regex named groups: a leading letter or underscore,
/// then letters, digits, or underscores.
fn is_valid_token_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
