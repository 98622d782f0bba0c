//! # waymark
//!
//! The routing core of an MVC framework: a route registry that is built once
//! from a flat list of declarations and then resolves `(path, method)` pairs.
//! Nothing more. Discovery of controllers, parameter binding, rendering and
//! the HTTP transport all live elsewhere.
//!
//! ## The contract
//!
//! - Literal paths (`/users`) match by exact string equality.
//! - Templated paths (`/users/{id}`) match one non-empty segment per
//!   variable and capture it by name.
//! - A literal path that exists always wins over templates, whatever the
//!   method.
//! - Among templates, registration order decides. The first one matching
//!   both path and method wins. This is a policy, not "most specific first".
//! - `*` registers a route for any method not otherwise listed on that path.
//! - Every request resolves to exactly one [`Resolution`]: `Found`,
//!   `NotFound` or `MethodNotAllowed`. Resolution never fails.
//!
//! Broken declarations (an unclosed `{`, an empty `{}`) fail the build with
//! an [`Error`]; a route table that cannot be built must not serve traffic.
//! Duplicate (path, method) declarations keep the first registration and log
//! a warning through [`tracing`].
//!
//! ## Quick start
//!
//! ```rust
//! use waymark::{Resolution, Router, Routes};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Handler { ShowUser, CreateUser, Anything }
//!
//! let router = Router::new();
//! router.build(
//!     Routes::new()
//!         .get("/users/{id}", Handler::ShowUser)
//!         .post("/users", Handler::CreateUser)
//!         .any("/echo", Handler::Anything),
//! )?;
//!
//! match router.resolve("/users/42", "GET") {
//!     Resolution::Found { handle, path_variables } => {
//!         assert_eq!(handle, Handler::ShowUser);
//!         assert_eq!(path_variables["id"], "42");
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//!
//! assert_eq!(router.resolve("/echo", "PATCH").handle(), Some(&Handler::Anything));
//! assert_eq!(router.resolve("/users", "DELETE").status(), 405);
//! assert_eq!(router.resolve("/nope", "GET"), Resolution::NotFound);
//! # Ok::<(), waymark::Error>(())
//! ```

mod config;
mod error;
mod method;
mod outcome;
mod resolver;
mod router;
mod table;
mod template;

pub use config::Config;
pub use error::{Error, TemplateError};
pub use method::{ANY, RouteMethod};
pub use outcome::{PathVariables, Resolution};
pub use router::{Router, Routes};
pub use table::{MethodMap, RouteDeclaration, RouteTable};
pub use template::{CompiledTemplate, is_templated};
