//! The application router.
//!
//! Build once at startup, resolve from any number of threads afterwards.
//! There is no lock on the resolve path: the table is published through a
//! [`OnceLock`] and never mutated again.

use std::sync::OnceLock;

use http::Method;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::method::RouteMethod;
use crate::outcome::Resolution;
use crate::table::{RouteDeclaration, RouteTable};

/// Build-once route registry.
///
/// `H` is whatever the caller dispatches on: a handler id, a function
/// pointer, an `Arc<dyn Fn ..>`. The router never looks inside it.
///
/// ```rust
/// use waymark::{Resolution, Router, Routes};
///
/// let router = Router::new();
/// router.build(
///     Routes::new()
///         .get("/users/{id}", "show_user")
///         .post("/users", "create_user"),
/// )?;
///
/// let found = router.resolve("/users/42", "GET");
/// assert_eq!(found.handle(), Some(&"show_user"));
/// assert_eq!(found.param("id"), Some("42"));
///
/// assert!(matches!(router.resolve("/users", "GET"), Resolution::MethodNotAllowed { .. }));
/// # Ok::<(), waymark::Error>(())
/// ```
pub struct Router<H> {
    config: Config,
    table: OnceLock<RouteTable<H>>,
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config, table: OnceLock::new() }
    }

    /// Compiles `declarations` and publishes the table.
    ///
    /// Only the first successful call has any effect. Later calls, including
    /// ones racing the first from other threads, are logged and ignored. A
    /// failed build publishes nothing, so the router keeps answering
    /// `NotFound` and a corrected build may be attempted.
    pub fn build<I>(&self, declarations: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        if self.table.get().is_some() {
            info!("route table already built, ignoring build call");
            return Ok(());
        }

        let table = RouteTable::build(declarations, self.config.clone())?;
        if self.table.set(table).is_err() {
            info!("route table built concurrently, discarding this copy");
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.table.get().is_some()
    }

    /// The built table, if any.
    pub fn table(&self) -> Option<&RouteTable<H>> {
        self.table.get()
    }

    /// Number of literal-path entries; `0` before the build.
    pub fn entry_count(&self) -> usize {
        self.table.get().map_or(0, RouteTable::entry_count)
    }
}

impl<H: Clone> Router<H> {
    /// Resolves a request. Before the first build every request is
    /// `NotFound`.
    pub fn resolve(&self, path: &str, method: &str) -> Resolution<H> {
        match self.table.get() {
            Some(table) => table.resolve(path, method),
            None => {
                warn!(path, "resolve called before the route table was built");
                Resolution::NotFound
            }
        }
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self { Self::new() }
}

/// Chaining builder for route declarations.
///
/// Each call returns `self`, so a whole application's routes read as one
/// expression. Hand the result to [`Router::build`].
pub struct Routes<H> {
    declarations: Vec<RouteDeclaration<H>>,
}

impl<H> Routes<H> {
    pub fn new() -> Self {
        Self { declarations: Vec::new() }
    }

    /// Register `handle` for a method + path pair.
    pub fn on(mut self, method: impl Into<RouteMethod>, path: &str, handle: H) -> Self {
        self.declarations.push(RouteDeclaration::new(handle, path, method));
        self
    }

    /// Register `handle` for every method not otherwise mapped on `path`.
    pub fn any(self, path: &str, handle: H) -> Self {
        self.on(RouteMethod::Any, path, handle)
    }

    pub fn get(self, path: &str, handle: H) -> Self {
        self.on(Method::GET, path, handle)
    }

    pub fn post(self, path: &str, handle: H) -> Self {
        self.on(Method::POST, path, handle)
    }

    pub fn put(self, path: &str, handle: H) -> Self {
        self.on(Method::PUT, path, handle)
    }

    pub fn delete(self, path: &str, handle: H) -> Self {
        self.on(Method::DELETE, path, handle)
    }

    pub fn patch(self, path: &str, handle: H) -> Self {
        self.on(Method::PATCH, path, handle)
    }

    pub fn into_declarations(self) -> Vec<RouteDeclaration<H>> {
        self.declarations
    }
}

impl<H> Default for Routes<H> {
    fn default() -> Self { Self::new() }
}

impl<H> IntoIterator for Routes<H> {
    type Item = RouteDeclaration<H>;
    type IntoIter = std::vec::IntoIter<RouteDeclaration<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.into_iter()
    }
}

impl<H> Extend<RouteDeclaration<H>> for Routes<H> {
    fn extend<I: IntoIterator<Item = RouteDeclaration<H>>>(&mut self, iter: I) {
        self.declarations.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_before_build_is_not_found() {
        let router: Router<u32> = Router::new();
        assert!(!router.is_initialized());
        assert_eq!(router.resolve("/x", "GET"), Resolution::NotFound);
        assert_eq!(router.entry_count(), 0);
    }

    #[test]
    fn test_second_build_is_ignored() {
        let router = Router::new();
        router.build(Routes::new().get("/x", 1)).unwrap();
        router.build(Routes::new().get("/x", 2).get("/y", 3)).unwrap();

        assert_eq!(router.resolve("/x", "GET").handle(), Some(&1));
        assert_eq!(router.resolve("/y", "GET"), Resolution::NotFound);
        assert_eq!(router.entry_count(), 1);
    }

    #[test]
    fn test_failed_build_publishes_nothing() {
        let router = Router::new();
        assert!(router.build(Routes::new().get("/x", 1).get("/bad/{ }", 2)).is_err());
        assert!(!router.is_initialized());

        router.build(Routes::new().get("/x", 1)).unwrap();
        assert!(router.is_initialized());
    }

    #[test]
    fn test_routes_builder_methods() {
        let decls = Routes::new()
            .get("/a", 1)
            .post("/a", 2)
            .put("/a", 3)
            .delete("/a", 4)
            .patch("/a", 5)
            .any("/a", 6)
            .into_declarations();

        let methods: Vec<_> = decls.iter().map(|d| d.method.as_str()).collect();
        assert_eq!(methods, ["GET", "POST", "PUT", "DELETE", "PATCH", "*"]);
    }
}
