//! Scoped symbol table.
//!
//! Entries live in a single directory in insertion order and are never moved,
//! so a [`SymbolId`] stays valid until [`SymbolTable::teardown`]. Scopes are
//! stack windows over that directory; lookups walk the live windows from the
//! top of the stack down, so inner declarations shadow outer ones.

use std::fmt::Write;

use log::{debug, trace};

use crate::ast::{
    ast::NodeId,
    types::{ScalarType, SymbolKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

#[derive(Debug, Clone)]
pub struct Symbol {
    pub level: usize,
    pub name: String,
    pub kind: SymbolKind,
    /// `None` for symbols without a scalar type, such as the program.
    pub scalar_type: Option<ScalarType>,
    pub type_string: String,
    pub attribute: String,
    /// The declaring node: a type node for variables, the function node for functions.
    pub node: NodeId,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    scopes: Vec<Vec<SymbolId>>,
    dump_on_pop: bool,
}

impl SymbolTable {
    /// Creates an empty table with no open scope.
    pub fn init() -> Self {
        SymbolTable::default()
    }

    /// Releases every entry, including those of popped scopes.
    pub fn teardown(&mut self) {
        debug!("releasing {} symbols", self.entries.len());
        self.entries.clear();
        self.scopes.clear();
    }

    pub fn enable_dump(&mut self, enable: bool) {
        self.dump_on_pop = enable;
    }

    /// Opens a new scope and returns its level. The outermost scope is level 0.
    pub fn push_scope(&mut self) -> usize {
        self.scopes.push(Vec::new());
        let level = self.scopes.len() - 1;
        debug!("push scope {}", level);
        level
    }

    /// Closes the innermost scope, dumping the table first when enabled.
    /// Returns the new current level, `None` once every scope is closed.
    pub fn pop_scope(&mut self) -> Option<usize> {
        if self.dump_on_pop {
            print!("{}", self.dump());
        }

        if let Some(scope) = self.scopes.pop() {
            debug!("pop scope {} with {} symbols", self.scopes.len(), scope.len());
        }
        self.current_level()
    }

    pub fn current_level(&self) -> Option<usize> {
        self.scopes.len().checked_sub(1)
    }

    /// Inserts a symbol into the innermost scope. Duplicates are the
    /// caller's concern; the newest entry wins lookups.
    pub fn insert(
        &mut self,
        name: &str,
        kind: SymbolKind,
        scalar_type: Option<ScalarType>,
        type_string: &str,
        attribute: &str,
        node: NodeId,
    ) -> SymbolId {
        let id = SymbolId(self.entries.len());
        let level = self.current_level().unwrap_or(0);
        trace!("insert {} ({}) at level {}", name, kind, level);

        self.entries.push(Symbol {
            level,
            name: name.to_string(),
            kind,
            scalar_type,
            type_string: type_string.to_string(),
            attribute: attribute.to_string(),
            node,
        });
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(id);
        }
        id
    }

    /// Finds the innermost live symbol called `name`.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.live()
            .rev()
            .find(|id| self.entries[id.0].name == name)
    }

    fn live(&self) -> impl DoubleEndedIterator<Item = SymbolId> + '_ {
        self.scopes.iter().flatten().copied()
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.entries[id.0]
    }

    pub fn level(&self, id: SymbolId) -> usize {
        self.get(id).level
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.get(id).name
    }

    pub fn kind(&self, id: SymbolId) -> SymbolKind {
        self.get(id).kind
    }

    pub fn kind_name(&self, id: SymbolId) -> &'static str {
        self.get(id).kind.as_str()
    }

    pub fn scalar_type(&self, id: SymbolId) -> Option<ScalarType> {
        self.get(id).scalar_type
    }

    pub fn scalar_type_name(&self, id: SymbolId) -> &'static str {
        self.get(id).scalar_type.map(|t| t.as_str()).unwrap_or("")
    }

    pub fn type_string(&self, id: SymbolId) -> &str {
        &self.get(id).type_string
    }

    pub fn attribute(&self, id: SymbolId) -> &str {
        &self.get(id).attribute
    }

    pub fn node(&self, id: SymbolId) -> NodeId {
        self.get(id).node
    }

    /// Number of symbols in open scopes.
    pub fn live_count(&self) -> usize {
        self.scopes.iter().map(Vec::len).sum()
    }

    /// Formats every live symbol from the outermost scope to the innermost.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(110));
        let _ = writeln!(
            out,
            "{:<33}{:<11}{:<11}{:<17}{:<11}",
            "Name", "Kind", "Level", "Type", "Attribute"
        );
        let _ = writeln!(out, "{}", "-".repeat(110));

        for id in self.live() {
            let symbol = self.get(id);
            let scope = if symbol.level == 0 { "(global)" } else { "(local)" };
            let _ = writeln!(
                out,
                "{:<33}{:<11}{}{:<10}{:<17}{:<11}",
                symbol.name,
                symbol.kind.as_str(),
                symbol.level,
                scope,
                symbol.type_string,
                symbol.attribute
            );
        }

        let _ = writeln!(out, "{}", "-".repeat(110));
        out
    }
}
