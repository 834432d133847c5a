use super::{DeclRewriter, PrimitiveArrayPass, apply_pass};
use crate::errors::{Error, Result};
use crate::model::{Decl, DeclVisitor, Module, walk};
use crate::options::{PassKind, PipelineOptions};
use docmodel_types::{ClosureVisitor, SymbolRef, TypeExpr, TypeFlags, TypeVisitor};
use std::sync::Arc;
use tracing::debug;

/// An ordered list of passes. Each pass sees the output of the previous one.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn DeclRewriter>>,
    fail_on_unresolved: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: &PipelineOptions) -> Self {
        let mut pipeline = Self::new();
        for kind in &options.passes {
            pipeline = match kind {
                PassKind::PrimitiveArrays => pipeline.with_pass(PrimitiveArrayPass::new()),
            };
        }
        pipeline.fail_on_unresolved = options.fail_on_unresolved;
        pipeline
    }

    pub fn with_pass(mut self, pass: impl DeclRewriter + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn run(&mut self, modules: &[Arc<Module>]) -> Result<Vec<Arc<Module>>> {
        let mut current = modules.to_vec();
        for pass in &mut self.passes {
            debug!(pass = pass.name(), "Running pass");
            current = apply_pass(&current, pass.as_mut())?;
        }
        if self.fail_on_unresolved {
            check_resolved(&current)?;
        }
        Ok(current)
    }
}

/// Fail on the first declaration holding an unresolved type.
fn check_resolved(modules: &[Arc<Module>]) -> Result<()> {
    struct Finder {
        found: Option<(SymbolRef, TypeExpr)>,
    }

    impl DeclVisitor for Finder {
        fn visit_decl(&mut self, decl: &Decl) {
            if self.found.is_some() {
                return;
            }
            for ty in decl.types() {
                if !ty.flags().contains(TypeFlags::HAS_UNRESOLVED) {
                    continue;
                }
                let mut culprit = None;
                ClosureVisitor::new(|t: &TypeExpr| {
                    if culprit.is_none() && matches!(t, TypeExpr::Unresolved(_)) {
                        culprit = Some(t.clone());
                    }
                })
                .visit_ty(&ty);
                self.found = Some((decl.symbol().clone(), culprit.unwrap_or(ty)));
                return;
            }
            self.super_visit_decl(decl);
        }
    }

    let mut finder = Finder { found: None };
    walk(modules, &mut finder);
    match finder.found {
        None => Ok(()),
        Some((symbol, ty)) => Err(Error::Unresolved {
            symbol,
            ty: ty.to_string(),
        }),
    }
}
