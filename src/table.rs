//! Route table: the build phase.
//!
//! Declarations are split into literal paths, keyed by exact string, and
//! templated paths, kept in registration order. Each path owns one
//! [`MethodMap`]; declaring the same path again for another method adds to
//! that map instead of creating a second entry.

use std::collections::{BTreeSet, HashMap};

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::method::{ANY, RouteMethod};
use crate::template::{self, CompiledTemplate};

/// One route as produced by discovery: a handle, a path pattern and a method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDeclaration<H> {
    pub handle: H,
    pub path: String,
    pub method: RouteMethod,
}

impl<H> RouteDeclaration<H> {
    pub fn new(handle: H, path: impl Into<String>, method: impl Into<RouteMethod>) -> Self {
        Self { handle, path: path.into(), method: method.into() }
    }

    /// Like [`new`](Self::new) with the method given as a string; empty or
    /// `*` means any method.
    pub fn parse(handle: H, path: impl Into<String>, method: &str) -> Result<Self, Error> {
        Ok(Self::new(handle, path, method.parse::<RouteMethod>()?))
    }
}

/// Method name → handle for a single path.
///
/// Routes rarely carry more than a handful of methods, so this is a small
/// inline vector searched linearly, in insertion order.
#[derive(Clone, Debug)]
pub struct MethodMap<H> {
    slots: SmallVec<[(String, H); 4]>,
}

impl<H> MethodMap<H> {
    fn new() -> Self {
        Self { slots: SmallVec::new() }
    }

    /// Exact lookup by normalized method name (`*` looks up the wildcard).
    pub fn get(&self, method: &str) -> Option<&H> {
        self.slots.iter().find(|(m, _)| m == method).map(|(_, h)| h)
    }

    /// Exact method first, then the `*` registration.
    pub fn lookup(&self, method: &str) -> Option<&H> {
        self.get(method).or_else(|| self.get(ANY))
    }

    pub fn contains(&self, method: &str) -> bool {
        self.get(method).is_some()
    }

    /// Inserts unless `method` is already mapped. Returns whether it inserted.
    fn insert(&mut self, method: &str, handle: H) -> bool {
        if self.contains(method) {
            return false;
        }
        self.slots.push((method.to_owned(), handle));
        true
    }

    /// Registered method names in insertion order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(m, _)| m.as_str())
    }

    pub(crate) fn allowed(&self) -> BTreeSet<String> {
        self.methods().map(str::to_owned).collect()
    }
}

#[derive(Debug)]
pub(crate) struct LiteralEntry<H> {
    pub(crate) path: String,
    pub(crate) methods: MethodMap<H>,
}

#[derive(Debug)]
pub(crate) struct PatternEntry<H> {
    pub(crate) template: CompiledTemplate,
    pub(crate) methods: MethodMap<H>,
}

/// Compiled routes. Immutable once built.
#[derive(Debug)]
pub struct RouteTable<H> {
    pub(crate) literals: Vec<LiteralEntry<H>>,
    pub(crate) literal_index: HashMap<String, usize>,
    pub(crate) patterns: Vec<PatternEntry<H>>,
    pub(crate) config: Config,
}

impl<H> RouteTable<H> {
    /// Compiles `declarations` into a table.
    ///
    /// Malformed templates abort the build. Duplicate (path, method) pairs
    /// keep the first registration and log a warning, unless
    /// `config.reject_duplicates` turns them into an error.
    pub fn build<I>(declarations: I, config: Config) -> Result<Self, Error>
    where
        I: IntoIterator<Item = RouteDeclaration<H>>,
    {
        let mut table = Self {
            literals: Vec::new(),
            literal_index: HashMap::new(),
            patterns: Vec::new(),
            config,
        };

        let (templated, literal): (Vec<_>, Vec<_>) = declarations
            .into_iter()
            .partition(|d| template::is_templated(&d.path));
        let total = templated.len() + literal.len();

        for decl in literal {
            table.add_literal(decl)?;
        }

        // Source string → position in `patterns`; equal sources share one entry.
        let mut pattern_index: HashMap<String, usize> = HashMap::new();
        for decl in templated {
            let idx = match pattern_index.get(&decl.path) {
                Some(&idx) => idx,
                None => {
                    let template = CompiledTemplate::compile(&decl.path)?;
                    table.patterns.push(PatternEntry { template, methods: MethodMap::new() });
                    let idx = table.patterns.len() - 1;
                    pattern_index.insert(decl.path.clone(), idx);
                    idx
                }
            };
            let methods = &mut table.patterns[idx].methods;
            Self::register(methods, decl, "pattern", table.config.reject_duplicates)?;
        }

        info!(
            declarations = total,
            literals = table.literals.len(),
            patterns = table.patterns.len(),
            "route table built"
        );
        Ok(table)
    }

    fn add_literal(&mut self, decl: RouteDeclaration<H>) -> Result<(), Error> {
        let idx = match self.literal_index.get(&decl.path) {
            Some(&idx) => idx,
            None => {
                self.literals.push(LiteralEntry { path: decl.path.clone(), methods: MethodMap::new() });
                let idx = self.literals.len() - 1;
                self.literal_index.insert(decl.path.clone(), idx);
                idx
            }
        };
        let methods = &mut self.literals[idx].methods;
        Self::register(methods, decl, "literal", self.config.reject_duplicates)
    }

    fn register(
        methods: &mut MethodMap<H>,
        decl: RouteDeclaration<H>,
        kind: &'static str,
        reject_duplicates: bool,
    ) -> Result<(), Error> {
        let method = decl.method.as_str();
        if methods.insert(method, decl.handle) {
            debug!(method, path = %decl.path, kind, "route registered");
            return Ok(());
        }

        let err = Error::DuplicateMapping { path: decl.path.clone(), method: method.to_owned() };
        if reject_duplicates {
            return Err(err);
        }
        warn!(error = %err, "ignoring duplicate route, first registration kept");
        Ok(())
    }

    /// Number of literal-path entries.
    pub fn entry_count(&self) -> usize {
        self.literals.len()
    }

    /// Number of templated-path entries.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Every registered `(path, method)` pair: literal entries first, then
    /// pattern entries, each in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        let literals = self.literals.iter()
            .flat_map(|e| e.methods.methods().map(move |m| (e.path.as_str(), m)));
        let patterns = self.patterns.iter()
            .flat_map(|e| e.methods.methods().map(move |m| (e.template.source(), m)));
        literals.chain(patterns)
    }
}
