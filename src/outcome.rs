//! Resolution outcomes.
//!
//! Every `(path, method)` pair resolves to exactly one [`Resolution`]. Neither
//! a miss nor a method mismatch is an error; the dispatch layer decides what
//! response each variant becomes.

use std::collections::{BTreeSet, HashMap};

use http::{HeaderValue, StatusCode};

/// Path variables captured from a templated route, keyed by name.
pub type PathVariables = HashMap<String, String>;

/// The result of resolving one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<H> {
    /// A route accepted the path and method.
    Found {
        handle: H,
        /// Empty for literal routes.
        path_variables: PathVariables,
    },
    /// No route matched the path.
    NotFound,
    /// At least one route matched the path, none for this method.
    MethodNotAllowed {
        /// Method names registered on the matching routes, `*` included
        /// verbatim if present.
        allowed: BTreeSet<String>,
    },
}

impl<H> Resolution<H> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The handle of a `Found` outcome.
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Found { handle, .. } => Some(handle),
            _ => None,
        }
    }

    /// A single path variable of a `Found` outcome.
    pub fn param(&self, name: &str) -> Option<&str> {
        match self {
            Self::Found { path_variables, .. } => path_variables.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// The status a dispatcher should answer with when it has nothing more
    /// specific to say: `200`, `404` or `405`.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Found { .. }            => StatusCode::OK,
            Self::NotFound                => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// `Allow` header value for a `MethodNotAllowed` outcome: the allowed
    /// methods, sorted, joined by `", "`.
    pub fn allow_header(&self) -> Option<HeaderValue> {
        match self {
            Self::MethodNotAllowed { allowed } => {
                let joined = allowed.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
                HeaderValue::from_str(&joined).ok()
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let found = Resolution::Found { handle: 1, path_variables: PathVariables::new() };
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(Resolution::<u32>::NotFound.status(), StatusCode::NOT_FOUND);
        let mna = Resolution::<u32>::MethodNotAllowed { allowed: BTreeSet::new() };
        assert_eq!(mna.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_allow_header() {
        let allowed = ["POST", "GET"].into_iter().map(str::to_owned).collect();
        let mna = Resolution::<u32>::MethodNotAllowed { allowed };
        assert_eq!(mna.allow_header().unwrap(), "GET, POST");
        assert!(Resolution::<u32>::NotFound.allow_header().is_none());
    }

    #[test]
    fn test_param() {
        let mut path_variables = PathVariables::new();
        path_variables.insert("id".to_owned(), "42".to_owned());
        let found = Resolution::Found { handle: "h", path_variables };
        assert_eq!(found.param("id"), Some("42"));
        assert_eq!(found.param("name"), None);
        assert_eq!(found.handle(), Some(&"h"));
        assert_eq!(Resolution::<&str>::NotFound.param("id"), None);
    }
}
