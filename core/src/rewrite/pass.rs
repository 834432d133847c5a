use super::{DeclRewriter, Rewritten};
use crate::errors::{Error, Result};
use crate::model::Module;
use docmodel_types::{Folded, TypeExpr, TypeFolder};
use tracing::trace;

/// A pass built from a module predicate and a plain type rewrite.
///
/// The rewrite sees every type the engine reaches. Returning `None` keeps the
/// type and lets the engine descend into its arguments; returning `Some(t)`
/// replaces it without descending further.
///
/// ```
/// use docmodel_core::model::Platform;
/// use docmodel_core::rewrite::TypeRewritePass;
/// use docmodel_types::{SymbolRef, TypeExpr};
///
/// let pass = TypeRewritePass::new(
///     "no-dynamic",
///     |module| module.targets(Platform::Js),
///     |ty| Ok(matches!(ty, TypeExpr::Dynamic).then(|| {
///         TypeExpr::simple(SymbolRef::class("kotlin", "Any"))
///     })),
/// );
/// # let _ = pass;
/// ```
pub struct TypeRewritePass<P, F> {
    name: String,
    predicate: P,
    rewrite: F,
}

impl<P, F> TypeRewritePass<P, F>
where
    P: Fn(&Module) -> bool,
    F: FnMut(&TypeExpr) -> Result<Option<TypeExpr>>,
{
    pub fn new(name: &str, predicate: P, rewrite: F) -> Self {
        Self {
            name: name.to_string(),
            predicate,
            rewrite,
        }
    }
}

/// Module predicate accepting every module.
pub fn everywhere(_: &Module) -> bool {
    true
}

impl<P, F> TypeFolder for TypeRewritePass<P, F>
where
    P: Fn(&Module) -> bool,
    F: FnMut(&TypeExpr) -> Result<Option<TypeExpr>>,
{
    type Error = Error;

    fn fold_ty(&mut self, ty: &TypeExpr) -> Result<Rewritten<TypeExpr>> {
        match (self.rewrite)(ty)? {
            None => self.super_fold_ty(ty),
            Some(replacement) if replacement.ptr_eq(ty) || replacement == *ty => {
                Ok(Folded::unchanged(ty.clone()))
            }
            Some(replacement) => {
                trace!(pass = %self.name, from = %ty, to = %replacement, "Rewrote type");
                Ok(Folded::changed(replacement))
            }
        }
    }
}

impl<P, F> DeclRewriter for TypeRewritePass<P, F>
where
    P: Fn(&Module) -> bool,
    F: FnMut(&TypeExpr) -> Result<Option<TypeExpr>>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn applies_to(&self, module: &Module) -> bool {
        (self.predicate)(module)
    }
}
