//! Unified error type.

use thiserror::Error as ThisError;

/// The error type returned by [`Router::build`](crate::Router::build).
///
/// Routing misses (404, 405) are not errors: they are
/// [`Resolution`](crate::Resolution) values. This type surfaces broken route
/// declarations, which must stop the process from serving traffic.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A `{name}` path pattern could not be compiled.
    #[error("invalid path template `{pattern}`: {reason}")]
    InvalidTemplate {
        pattern: String,
        reason: TemplateError,
    },

    /// A declaration's method is not a valid HTTP method token.
    #[error("invalid http method `{0}`")]
    InvalidMethod(String),

    /// The same (path, method) pair was declared twice.
    ///
    /// Only logged unless [`Config::reject_duplicates`](crate::Config::reject_duplicates)
    /// is set; the first registration is kept.
    #[error("duplicate mapping for {method} {path}")]
    DuplicateMapping { path: String, method: String },
}

/// Why a path template failed to compile. Offsets are byte positions in the
/// pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum TemplateError {
    #[error("`{{` at byte {at} has no closing `}}`")]
    UnclosedBrace { at: usize },

    #[error("empty variable name at byte {at}")]
    EmptyVariable { at: usize },

    #[error("compiled matcher exceeds the regex size limit")]
    TooLarge,
}
