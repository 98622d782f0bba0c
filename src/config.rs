//! Router configuration.

use http::Method;

/// Settings applied when a [`Router`](crate::Router) builds and resolves.
///
/// ```rust
/// use waymark::{Config, Router};
///
/// let router: Router<u32> = Router::with_config(
///     Config::default().reject_duplicates(true),
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) default_method: Method,
    pub(crate) reject_duplicates: bool,
}

impl Config {
    /// Method assumed for requests that carry none. Defaults to `GET`.
    pub fn default_method(mut self, method: Method) -> Self {
        self.default_method = method;
        self
    }

    /// Abort the build on a duplicate (path, method) declaration instead of
    /// keeping the first and logging a warning. Defaults to `false`.
    pub fn reject_duplicates(mut self, reject: bool) -> Self {
        self.reject_duplicates = reject;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_method: Method::GET,
            reject_duplicates: false,
        }
    }
}
