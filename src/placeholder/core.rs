use regex::{NoExpand, Regex};
use std::ops::Range;
use tracing::debug;

use crate::error::{Result, RouterError};

/// Built-in tokens in the order they are applied: (token, fragment, numbered).
const BUILTINS: [(&str, &str, bool); 4] = [
    (":num", "([0-9]+)", true),
    (":alpha", "([a-zA-Z]+)", false),
    (":alphanum", "([0-9a-zA-Z]+)", true),
    (":any", "([0-9a-zA-Z_-]+)", true),
];

/// A single token -> fragment mapping.
#[derive(Debug, Clone)]
pub struct Placeholder {
    token: String,
    fragment: String,
    numbered: bool,
    matcher: Regex,
}

impl Placeholder {
    fn new(token: &str, fragment: &str, numbered: bool) -> Result<Self> {
        Regex::new(fragment).map_err(|source| RouterError::InvalidPlaceholder {
            token: token.to_string(),
            source,
        })?;

        let mut pattern = regex::escape(token);
        if numbered {
            pattern.push_str("[0-9]?");
        }
        // A trailing word character must not run into the next one
        if numbered || token.chars().last().is_some_and(is_word_char) {
            pattern.push_str(r"\b");
        }
        let matcher = Regex::new(&pattern).map_err(|source| RouterError::InvalidPlaceholder {
            token: token.to_string(),
            source,
        })?;

        Ok(Self {
            token: token.to_string(),
            fragment: fragment.to_string(),
            numbered,
            matcher,
        })
    }

    /// The token as registered, e.g. `:num`.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The regular-expression fragment the token expands to.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Whether `token0`..`token9` are accepted as well.
    #[must_use]
    pub fn is_numbered(&self) -> bool {
        self.numbered
    }
}

/// A placeholder found in a raw template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Byte range of the token inside the template
    pub range: Range<usize>,
    /// The token text as written, e.g. `:num2`
    pub text: String,
}

/// Ordered mapping from placeholder token to regex fragment.
#[derive(Debug, Clone)]
pub struct PlaceholderTable {
    entries: Vec<Placeholder>,
}

impl Default for PlaceholderTable {
    fn default() -> Self {
        let entries = BUILTINS
            .iter()
            .filter_map(|(token, fragment, numbered)| {
                Placeholder::new(token, fragment, *numbered).ok()
            })
            .collect();
        Self { entries }
    }
}

impl PlaceholderTable {
    /// A table without any tokens, not even the built-in ones.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite the fragment for `token`.
    ///
    /// Overwriting keeps the token's original position in the table. The
    /// fragment is compiled on its own first, so malformed patterns are
    /// rejected here rather than on the first request.
    pub fn register(&mut self, token: &str, fragment: &str) -> Result<()> {
        self.insert(Placeholder::new(token, fragment, false)?);
        Ok(())
    }

    /// Like [`register`](Self::register), but also accepts `token0`..`token9`.
    pub fn register_numbered(&mut self, token: &str, fragment: &str) -> Result<()> {
        self.insert(Placeholder::new(token, fragment, true)?);
        Ok(())
    }

    /// Register `:key` as a capture of `pattern`.
    pub fn where_(&mut self, key: &str, pattern: &str) -> Result<()> {
        let key = key.trim_start_matches(':');
        self.register(&format!(":{key}"), &format!("({pattern})"))
    }

    fn insert(&mut self, placeholder: Placeholder) {
        debug!(
            token = %placeholder.token,
            fragment = %placeholder.fragment,
            numbered = placeholder.numbered,
            "Placeholder registered"
        );
        match self
            .entries
            .iter_mut()
            .find(|p| p.token == placeholder.token)
        {
            Some(existing) => *existing = placeholder,
            None => self.entries.push(placeholder),
        }
    }

    /// Expand every placeholder in `template` and anchor the result.
    #[must_use]
    pub fn resolve(&self, template: &str) -> String {
        let mut pattern = template.to_string();
        for placeholder in &self.entries {
            let replaced = placeholder
                .matcher
                .replace_all(&pattern, NoExpand(&placeholder.fragment));
            pattern = replaced.into_owned();
        }
        format!("^{pattern}$")
    }

    /// Compile `template` into an anchored regular expression.
    pub fn compile(&self, template: &str) -> Result<Regex> {
        Regex::new(&self.resolve(template)).map_err(|source| RouterError::InvalidPattern {
            template: template.to_string(),
            source,
        })
    }

    /// Placeholder tokens in `template`, in positional order.
    ///
    /// When two tokens claim overlapping text the one registered first wins,
    /// matching the order [`resolve`](Self::resolve) substitutes them in.
    #[must_use]
    pub fn occurrences(&self, template: &str) -> Vec<Occurrence> {
        let mut found: Vec<Occurrence> = Vec::new();
        for placeholder in &self.entries {
            for m in placeholder.matcher.find_iter(template) {
                let range = m.range();
                let overlaps = found
                    .iter()
                    .any(|o| o.range.start < range.end && range.start < o.range.end);
                if !overlaps {
                    found.push(Occurrence {
                        range,
                        text: m.as_str().to_string(),
                    });
                }
            }
        }
        found.sort_by_key(|o| o.range.start);
        found
    }

    /// Registered placeholders in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.entries.iter()
    }

    /// Number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no token is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
