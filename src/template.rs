//! Path template compiler.
//!
//! A template is a path with one or more `{name}` variables, such as
//! `/users/{id}/posts/{post}`. Each variable matches one or more characters
//! other than `/`; everything else matches verbatim. Variables may share a
//! segment with literal text (`/files/{stem}.txt`), in which case the usual
//! greedy-with-backtracking regex semantics apply.
//!
//! Templates compile to an anchored [`Regex`] with one unnamed capture group
//! per variable, so captures come back in declaration order regardless of the
//! variable names.

use std::fmt;

use regex::Regex;

use crate::error::{Error, TemplateError};

const VARIABLE_GROUP: &str = "([^/]+)";

/// Returns `true` if `pattern` should be compiled as a template rather than
/// matched as a literal path: it contains at least one `{` and one `}`.
pub fn is_templated(pattern: &str) -> bool {
    pattern.contains('{') && pattern.contains('}')
}

/// A compiled `{name}` path template.
#[derive(Clone)]
pub struct CompiledTemplate {
    source: String,
    variable_names: Vec<String>,
    matcher: Regex,
}

impl CompiledTemplate {
    /// Compiles `pattern`.
    ///
    /// Fails with [`Error::InvalidTemplate`] if a `{` has no closing `}` or a
    /// variable name is empty after trimming. Repeated names are not rejected:
    /// each occurrence is its own capture position.
    pub fn compile(pattern: &str) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidTemplate {
            pattern: pattern.to_owned(),
            reason,
        };

        let mut variable_names = Vec::new();
        let mut re = String::with_capacity(pattern.len() + 16);
        re.push('^');

        let mut literal_start = 0;
        let mut cursor = 0;
        while let Some(offset) = pattern[cursor..].find('{') {
            let open = cursor + offset;
            let close = pattern[open + 1..]
                .find('}')
                .map(|i| open + 1 + i)
                .ok_or_else(|| invalid(TemplateError::UnclosedBrace { at: open }))?;

            let name = pattern[open + 1..close].trim();
            if name.is_empty() {
                return Err(invalid(TemplateError::EmptyVariable { at: open }));
            }

            re.push_str(&regex::escape(&pattern[literal_start..open]));
            re.push_str(VARIABLE_GROUP);
            variable_names.push(name.to_owned());

            cursor = close + 1;
            literal_start = cursor;
        }
        re.push_str(&regex::escape(&pattern[literal_start..]));
        re.push('$');

        let matcher = Regex::new(&re).map_err(|_| invalid(TemplateError::TooLarge))?;

        Ok(Self {
            source: pattern.to_owned(),
            variable_names,
            matcher,
        })
    }

    /// The pattern this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Variable names in order of appearance, duplicates included.
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Matches `path` and returns the captured values, one per entry of
    /// [`variable_names`](Self::variable_names) and in the same order.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let caps = self.matcher.captures(path)?;
        caps.iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str()))
            .collect()
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("source", &self.source)
            .field("variable_names", &self.variable_names)
            .finish()
    }
}
