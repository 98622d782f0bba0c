//! HTTP methods as route keys.
//!
//! A route is declared either for one method or for [`RouteMethod::Any`],
//! written `*` in method maps and allowed-method sets. Method names are stored
//! uppercase so `get`, `Get` and `GET` all land on the same key.

use std::fmt;
use std::str::FromStr;

use http::Method;

use crate::error::Error;

/// Method-map key for routes that accept any method.
pub const ANY: &str = "*";

/// The method half of a route declaration.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RouteMethod {
    /// Matches any request method not otherwise listed for the same path.
    Any,
    /// Matches exactly this method.
    Exact(Method),
}

impl RouteMethod {
    /// Returns the method-map key: the uppercase method name, or `*`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any           => ANY,
            Self::Exact(method) => method.as_str(),
        }
    }
}

/// Parses a declared method. Empty and `*` mean [`RouteMethod::Any`]; anything
/// else is uppercased and must be a valid method token (extension methods
/// such as `PURGE` are fine).
impl FromStr for RouteMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ANY {
            return Ok(Self::Any);
        }
        Method::from_bytes(s.to_ascii_uppercase().as_bytes())
            .map(Self::Exact)
            .map_err(|_| Error::InvalidMethod(s.to_owned()))
    }
}

impl From<Method> for RouteMethod {
    fn from(method: Method) -> Self {
        Self::Exact(method)
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a request method for lookup: trimmed, uppercased, and replaced
/// by `default` when empty.
pub(crate) fn normalize(method: &str, default: &Method) -> String {
    let method = method.trim();
    if method.is_empty() {
        default.as_str().to_owned()
    } else {
        method.to_ascii_uppercase()
    }
}
