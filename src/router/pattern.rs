//! Path template compilation.
//!
//! A template such as `/api/v1/products/:productid` is compiled into an
//! anchored regular expression (`^/api/v1/products/([^/]+)$`) together with
//! the ordered list of parameter names (`["productid"]`). Capture group `i + 1`
//! of the expression always corresponds to `param_names()[i]`.

use regex::Regex;
use std::fmt;

/// Capture used for every `:name` placeholder: one or more non-separator chars.
const PARAM_CAPTURE: &str = "([^/]+)";

/// Error returned when a path template cannot be compiled.
///
/// Templates are fixed at build time, so this indicates a programming error in
/// route registration and is treated as fatal during startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The template was the empty string
    Empty,
    /// The template did not start with `/`
    MissingLeadingSlash {
        /// The offending template
        template: String,
    },
    /// The generated expression was rejected by the regex engine
    Regex {
        /// The offending template
        template: String,
        /// Message reported by the regex engine
        message: String,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "path template is empty"),
            PatternError::MissingLeadingSlash { template } => {
                write!(f, "path template '{template}' must start with '/'")
            }
            PatternError::Regex { template, message } => {
                write!(f, "path template '{template}' could not be compiled: {message}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl Pattern {
    /// The template this pattern was compiled from
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Parameter names in left-to-right order, aligned with capture positions
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The anchored expression backing this pattern
    #[must_use]
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Returns true if the whole of `path` matches this pattern
    #[inline]
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` in full and return the captured substrings in capture order.
    ///
    /// Returns `None` when the path does not match. For a pattern without
    /// placeholders a successful match yields an empty vector.
    #[must_use]
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or("", |m| m.as_str()))
                .collect(),
        )
    }
}

/// Returns the parameter name if `segment` is a `:name` placeholder.
///
/// Only `:` followed by one or more ASCII letters qualifies. Segments like
/// `:product_id` or `:id2` are literal text.
fn placeholder_name(segment: &str) -> Option<&str> {
    let name = segment.strip_prefix(':')?;
    if !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(name)
    } else {
        None
    }
}

/// Compile a path template into a [`Pattern`].
///
/// Each `/`-separated segment is either a placeholder, which becomes a capture
/// of one or more characters other than `/`, or literal text, which must match
/// exactly. Empty segments are kept, so `/a/` and `/a` are distinct templates.
///
/// # Errors
///
/// Returns [`PatternError`] if the template is empty, does not start with `/`,
/// or the generated expression fails to compile.
///
/// # Example
///
/// ```
/// use product_service::router::compile;
///
/// let pattern = compile("/api/v1/products/:productid").unwrap();
/// assert_eq!(pattern.param_names(), ["productid"]);
/// assert_eq!(pattern.captures("/api/v1/products/42"), Some(vec!["42"]));
/// assert!(!pattern.is_match("/api/v1/products"));
/// ```
pub fn compile(template: &str) -> Result<Pattern, PatternError> {
    if template.is_empty() {
        return Err(PatternError::Empty);
    }
    if !template.starts_with('/') {
        return Err(PatternError::MissingLeadingSlash {
            template: template.to_string(),
        });
    }

    let mut expression = String::with_capacity(template.len() + 2);
    let mut param_names = Vec::new();
    expression.push('^');

    for (i, segment) in template.split('/').enumerate() {
        if i > 0 {
            expression.push('/');
        }
        match placeholder_name(segment) {
            Some(name) => {
                expression.push_str(PARAM_CAPTURE);
                param_names.push(name.to_string());
            }
            None => expression.push_str(&regex::escape(segment)),
        }
    }
    expression.push('$');

    let regex = Regex::new(&expression).map_err(|e| PatternError::Regex {
        template: template.to_string(),
        message: e.to_string(),
    })?;

    Ok(Pattern {
        template: template.to_string(),
        regex,
        param_names,
    })
}
