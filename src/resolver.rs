//! Request resolution.
//!
//! Order of precedence:
//!
//! 1. A literal entry whose path equals the request path. If one exists the
//!    templates are never consulted, even when the method does not match.
//! 2. Templates in registration order. The first one that matches both path
//!    and method wins; templates that match only the path contribute their
//!    methods to a `405` answer.
//! 3. Otherwise `404`.
//!
//! On every entry an exact method registration beats `*`.

use std::collections::BTreeSet;

use tracing::trace;

use crate::method;
use crate::outcome::{PathVariables, Resolution};
use crate::table::RouteTable;

impl<H: Clone> RouteTable<H> {
    /// Resolves `path` and `method`. Never fails; the method is
    /// case-insensitive and defaults to the configured method when empty.
    pub fn resolve(&self, path: &str, method: &str) -> Resolution<H> {
        let method = method::normalize(method, &self.config.default_method);
        let resolution = self.resolve_normalized(path, &method);
        trace!(path, %method, status = resolution.status().as_u16(), "resolved");
        resolution
    }

    fn resolve_normalized(&self, path: &str, method: &str) -> Resolution<H> {
        if let Some(&idx) = self.literal_index.get(path) {
            let methods = &self.literals[idx].methods;
            return match methods.lookup(method) {
                Some(handle) => Resolution::Found {
                    handle: handle.clone(),
                    path_variables: PathVariables::new(),
                },
                None => Resolution::MethodNotAllowed { allowed: methods.allowed() },
            };
        }

        let mut allowed: BTreeSet<String> = BTreeSet::new();
        let mut path_matched = false;

        for entry in &self.patterns {
            if !entry.template.is_match(path) {
                continue;
            }
            let Some(handle) = entry.methods.lookup(method) else {
                path_matched = true;
                allowed.extend(entry.methods.allowed());
                continue;
            };
            let Some(values) = entry.template.captures(path) else {
                continue;
            };

            let path_variables = entry.template.variable_names().iter()
                .zip(values)
                .map(|(name, value)| (name.clone(), value.to_owned()))
                .collect();
            return Resolution::Found { handle: handle.clone(), path_variables };
        }

        if path_matched {
            Resolution::MethodNotAllowed { allowed }
        } else {
            Resolution::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::table::RouteDeclaration;

    use super::*;

    fn table(routes: &[(u32, &str, &str)]) -> RouteTable<u32> {
        let decls = routes.iter()
            .map(|&(h, path, method)| RouteDeclaration::parse(h, path, method).unwrap());
        RouteTable::build(decls, Config::default()).unwrap()
    }

    fn allowed(methods: &[&str]) -> BTreeSet<String> {
        methods.iter().map(|m| (*m).to_owned()).collect()
    }

    #[test]
    fn test_literal_found_without_variables() {
        let t = table(&[(1, "/health", "GET")]);
        assert_eq!(
            t.resolve("/health", "GET"),
            Resolution::Found { handle: 1, path_variables: PathVariables::new() }
        );
    }

    #[test]
    fn test_method_is_case_insensitive_and_defaults_to_get() {
        let t = table(&[(1, "/health", "GET")]);
        assert_eq!(t.resolve("/health", "get").handle(), Some(&1));
        assert_eq!(t.resolve("/health", "").handle(), Some(&1));
    }

    #[test]
    fn test_default_method_is_configurable() {
        let decls = vec![RouteDeclaration::parse(1, "/x", "POST").unwrap()];
        let t = RouteTable::build(decls, Config::default().default_method(http::Method::POST)).unwrap();
        assert_eq!(t.resolve("/x", "").handle(), Some(&1));
    }

    #[test]
    fn test_literal_method_not_allowed() {
        let t = table(&[(1, "/x", "GET"), (2, "/x", "POST")]);
        assert_eq!(
            t.resolve("/x", "DELETE"),
            Resolution::MethodNotAllowed { allowed: allowed(&["GET", "POST"]) }
        );
    }

    #[test]
    fn test_exact_method_beats_wildcard() {
        let t = table(&[(1, "/x", "*"), (2, "/x", "GET"), (3, "/p/{id}", "GET"), (4, "/p/{id}", "*")]);
        assert_eq!(t.resolve("/x", "GET").handle(), Some(&2));
        assert_eq!(t.resolve("/x", "PATCH").handle(), Some(&1));
        assert_eq!(t.resolve("/p/1", "GET").handle(), Some(&3));
        assert_eq!(t.resolve("/p/1", "PATCH").handle(), Some(&4));
    }

    #[test]
    fn test_literal_shadows_templates() {
        let t = table(&[(1, "/items", "POST"), (2, "/{name}", "GET")]);
        assert_eq!(
            t.resolve("/items", "GET"),
            Resolution::MethodNotAllowed { allowed: allowed(&["POST"]) }
        );
        assert_eq!(t.resolve("/other", "GET").param("name"), Some("other"));
    }

    #[test]
    fn test_later_template_can_match_method() {
        let t = table(&[(1, "/a/{x}", "GET"), (2, "/{section}/{y}", "POST")]);
        let r = t.resolve("/a/1", "POST");
        assert_eq!(r.handle(), Some(&2));
        assert_eq!(r.param("section"), Some("a"));
        assert_eq!(r.param("y"), Some("1"));
    }

    #[test]
    fn test_pattern_method_not_allowed_unions_sets() {
        let t = table(&[(1, "/a/{x}", "GET"), (2, "/{s}/{y}", "PUT"), (3, "/b/{z}", "DELETE")]);
        assert_eq!(
            t.resolve("/a/1", "POST"),
            Resolution::MethodNotAllowed { allowed: allowed(&["GET", "PUT"]) }
        );
    }

    #[test]
    fn test_first_registered_template_wins() {
        let t = table(&[(3, "/a/{x}", "GET"), (4, "/a/{y}", "GET")]);
        let r = t.resolve("/a/1", "GET");
        assert_eq!(r.handle(), Some(&3));
        assert_eq!(r.param("x"), Some("1"));
        assert_eq!(r.param("y"), None);
    }

    #[test]
    fn test_duplicate_variable_last_capture_wins() {
        let t = table(&[(1, "/pair/{v}/{v}", "GET")]);
        let r = t.resolve("/pair/first/second", "GET");
        assert_eq!(r.param("v"), Some("second"));
    }

    #[test]
    fn test_not_found() {
        let t = table(&[(1, "/users/{id}", "GET"), (2, "/users", "POST")]);
        assert_eq!(t.resolve("/nothing", "GET"), Resolution::NotFound);
        assert_eq!(t.resolve("/users/1/extra", "GET"), Resolution::NotFound);
        assert_eq!(RouteTable::<u32>::build(Vec::new(), Config::default()).unwrap().resolve("/", "GET"), Resolution::NotFound);
    }
}
