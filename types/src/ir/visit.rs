use super::{SymbolRef, TypeArg, TypeExpr};
use alloc::vec::Vec;

/// Trait for visiting type expressions.
///
/// Implement this trait to traverse types without rebuilding them.
/// The default implementation handles recursion automatically and, unlike
/// [`TypeFolder`](super::TypeFolder), descends through every wrapper.
///
/// # Example
///
/// ```
/// use docmodel_types::{SymbolRef, TypeArg, TypeExpr, TypeVisitor};
///
/// struct DepthCalculator {
///     max_depth: usize,
///     current_depth: usize,
/// }
///
/// impl TypeVisitor for DepthCalculator {
///     fn visit_ty(&mut self, ty: &TypeExpr) {
///         self.current_depth += 1;
///         self.max_depth = self.max_depth.max(self.current_depth);
///
///         self.super_visit_ty(ty);
///
///         self.current_depth -= 1;
///     }
/// }
///
/// let int = TypeExpr::simple(SymbolRef::class("kotlin", "Int"));
/// let list = SymbolRef::class("kotlin.collections", "List");
/// let nested = TypeExpr::named(
///     list.clone(),
///     [TypeArg::covariant(TypeExpr::named(list, [TypeArg::covariant(int)]))],
/// );
///
/// let mut calc = DepthCalculator { max_depth: 0, current_depth: 0 };
/// calc.visit_ty(&nested);
/// assert_eq!(calc.max_depth, 3); // List -> List -> Int
/// ```
pub trait TypeVisitor {
    /// Visit a type.
    ///
    /// Override this to customize behavior for all types.
    /// Call `super_visit_ty` to recurse into nested types.
    fn visit_ty(&mut self, ty: &TypeExpr) {
        self.super_visit_ty(ty)
    }

    /// Visit a type argument.
    fn visit_arg(&mut self, arg: &TypeArg) {
        if let TypeArg::Variant(_, ty) = arg {
            self.visit_ty(ty);
        }
    }

    /// Default recursion into nested types.
    ///
    /// Override `visit_ty` instead of this method.
    fn super_visit_ty(&mut self, ty: &TypeExpr) {
        match ty {
            // Base cases - no recursion
            TypeExpr::TypeVar(_)
            | TypeExpr::Unresolved(_)
            | TypeExpr::Dynamic
            | TypeExpr::Recursive(_) => {}

            TypeExpr::Named(named) => {
                for arg in &named.args {
                    self.visit_arg(arg);
                }
            }

            TypeExpr::Function(func) => {
                for arg in &func.args {
                    self.visit_arg(arg);
                }
            }

            TypeExpr::Nullable(inner) | TypeExpr::NonNull(inner) => {
                self.visit_ty(inner);
            }

            // Both sides are visible to renderers, so both are visited.
            TypeExpr::Alias(alias) => {
                for arg in &alias.alias.args {
                    self.visit_arg(arg);
                }
                self.visit_ty(&alias.expanded);
            }
        }
    }
}

/// Visitor driven by a closure, for one-off traversals.
///
/// # Example
///
/// ```
/// use docmodel_types::{ClosureVisitor, SymbolRef, TypeExpr, TypeVisitor};
///
/// let mut count = 0;
/// let mut visitor = ClosureVisitor::new(|_ty: &TypeExpr| count += 1);
/// visitor.visit_ty(&TypeExpr::nullable(TypeExpr::Dynamic));
/// assert_eq!(count, 2);
/// ```
pub struct ClosureVisitor<F> {
    f: F,
}

impl<F: FnMut(&TypeExpr)> ClosureVisitor<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(&TypeExpr)> TypeVisitor for ClosureVisitor<F> {
    fn visit_ty(&mut self, ty: &TypeExpr) {
        (self.f)(ty);
        self.super_visit_ty(ty);
    }
}

/// Collect every symbol a type mentions, in visiting order, duplicates kept.
pub fn referenced_symbols(ty: &TypeExpr) -> Vec<SymbolRef> {
    let mut symbols = Vec::new();
    ClosureVisitor::new(|ty: &TypeExpr| {
        if let Some(reference) = ty.reference() {
            symbols.push(reference.clone());
        }
    })
    .visit_ty(ty);
    symbols
}
