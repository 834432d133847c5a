//! Lookup from [`SymbolRef`] to declaration.
//!
//! Built once, after every pass has run; the tree itself never points across
//! to other declarations.

use crate::model::{Decl, DeclVisitor, Module, walk};
use docmodel_types::{SymbolRef, TypeExpr, referenced_symbols};
use hashbrown::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SymbolIndex {
    entries: HashMap<SymbolRef, Decl>,
}

impl SymbolIndex {
    /// Index every declaration of a forest. When two declarations share a
    /// symbol, the first one in walk order is kept.
    pub fn build(modules: &[Arc<Module>]) -> Self {
        struct Collector {
            entries: HashMap<SymbolRef, Decl>,
            duplicates: usize,
        }

        impl DeclVisitor for Collector {
            fn visit_decl(&mut self, decl: &Decl) {
                let symbol = decl.symbol();
                if self.entries.contains_key(symbol) {
                    self.duplicates += 1;
                    debug!(%symbol, kind = %decl.kind(), "Duplicate symbol, keeping first");
                } else {
                    self.entries.insert(symbol.clone(), decl.clone());
                }
                self.super_visit_decl(decl);
            }
        }

        let mut collector = Collector {
            entries: HashMap::new(),
            duplicates: 0,
        };
        walk(modules, &mut collector);
        debug!(
            symbols = collector.entries.len(),
            duplicates = collector.duplicates,
            "Built symbol index"
        );
        Self {
            entries: collector.entries,
        }
    }

    pub fn resolve(&self, symbol: &SymbolRef) -> Option<&Decl> {
        self.entries.get(symbol)
    }

    /// Declaration a type links to: the class or alias it names, or the
    /// owner of a type variable. Nullability wrappers are looked through.
    pub fn resolve_type(&self, ty: &TypeExpr) -> Option<&Decl> {
        match ty {
            TypeExpr::Nullable(inner) | TypeExpr::NonNull(inner) => self.resolve_type(inner),
            _ => ty.reference().and_then(|symbol| self.resolve(symbol)),
        }
    }

    /// Every symbol a type mentions, paired with its declaration if indexed.
    pub fn references(&self, ty: &TypeExpr) -> Vec<(SymbolRef, Option<&Decl>)> {
        referenced_symbols(ty)
            .into_iter()
            .map(|symbol| {
                let decl = self.resolve(&symbol);
                (symbol, decl)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
