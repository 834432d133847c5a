use super::{FunctionType, NamedType, TypeArg, TypeExpr};
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A value returned from a rewrite, paired with whether anything changed.
///
/// When `changed` is false, `value` is the input itself (a clone of the same
/// `Arc`), never a structurally-equal copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folded<T> {
    pub value: T,
    pub changed: bool,
}

impl<T> Folded<T> {
    pub fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    pub fn changed(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Folded<U> {
        Folded {
            value: f(self.value),
            changed: self.changed,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    /// The new value if anything changed, `None` otherwise.
    pub fn into_changed(self) -> Option<T> {
        self.changed.then_some(self.value)
    }
}

/// Fold every element of a child list.
///
/// Returns `None` when no element changed; no vector is allocated in that
/// case. Otherwise returns the new list, sharing every unchanged element.
pub fn fold_list<T: Clone, E>(
    items: &[T],
    mut f: impl FnMut(&T) -> Result<Folded<T>, E>,
) -> Result<Option<Vec<T>>, E> {
    let mut rebuilt: Option<Vec<T>> = None;
    for (i, item) in items.iter().enumerate() {
        let folded = f(item)?;
        match &mut rebuilt {
            Some(out) => out.push(folded.value),
            None if folded.changed => {
                let mut out = Vec::with_capacity(items.len());
                out.extend_from_slice(&items[..i]);
                out.push(folded.value);
                rebuilt = Some(out);
            }
            None => {}
        }
    }
    Ok(rebuilt)
}

/// Trait for rewriting type expressions.
///
/// The default implementation walks type constructors and rebuilds only the
/// path from a changed leaf up to the root; every untouched branch is handed
/// back as-is. Only `NamedType` and `FunctionType` arguments are descended
/// into. `Nullable`, `NonNull`, `AliasExpansion` and the marker variants are
/// opaque to the default walk; a folder that must reach inside them calls
/// [`TypeFolder::fold_through_wrappers`] explicitly.
///
/// # Example
///
/// ```
/// use docmodel_types::{Folded, NamedType, SymbolRef, TypeArg, TypeExpr, TypeFolder};
/// use std::convert::Infallible;
/// use std::sync::Arc;
///
/// // Replace Int with Long wherever it appears as a type argument
/// struct IntToLong;
///
/// impl TypeFolder for IntToLong {
///     type Error = Infallible;
///
///     fn fold_named(&mut self, named: &Arc<NamedType>) -> Result<Folded<TypeExpr>, Infallible> {
///         if named.reference == SymbolRef::class("kotlin", "Int") {
///             return Ok(Folded::changed(TypeExpr::simple(SymbolRef::class("kotlin", "Long"))));
///         }
///         self.super_fold_named(named)
///     }
/// }
///
/// let list = TypeExpr::named(
///     SymbolRef::class("kotlin.collections", "List"),
///     [TypeArg::covariant(TypeExpr::simple(SymbolRef::class("kotlin", "Int")))],
/// );
/// let folded = IntToLong.fold_ty(&list).unwrap();
/// assert!(folded.changed);
/// assert_eq!(
///     folded.value.args()[0].ty().and_then(|t| t.reference()),
///     Some(&SymbolRef::class("kotlin", "Long"))
/// );
/// ```
pub trait TypeFolder {
    /// Failure raised by a custom rewrite. The walk itself never fails.
    type Error;

    /// Rewrite a type (a "bound").
    ///
    /// Override this to customize behavior for all types.
    /// Call `super_fold_ty` to get the default dispatch.
    fn fold_ty(&mut self, ty: &TypeExpr) -> Result<Folded<TypeExpr>, Self::Error> {
        self.super_fold_ty(ty)
    }

    /// Default dispatch on the type variant.
    ///
    /// Override `fold_ty` instead of this method.
    fn super_fold_ty(&mut self, ty: &TypeExpr) -> Result<Folded<TypeExpr>, Self::Error> {
        match ty {
            TypeExpr::Named(named) => self.fold_named(named),
            TypeExpr::Function(func) => self.fold_function(func),
            TypeExpr::TypeVar(_)
            | TypeExpr::Nullable(_)
            | TypeExpr::NonNull(_)
            | TypeExpr::Alias(_)
            | TypeExpr::Unresolved(_)
            | TypeExpr::Dynamic
            | TypeExpr::Recursive(_) => Ok(Folded::unchanged(ty.clone())),
        }
    }

    /// Rewrite a generic type constructor.
    fn fold_named(&mut self, named: &Arc<NamedType>) -> Result<Folded<TypeExpr>, Self::Error> {
        self.super_fold_named(named)
    }

    fn super_fold_named(
        &mut self,
        named: &Arc<NamedType>,
    ) -> Result<Folded<TypeExpr>, Self::Error> {
        Ok(match fold_list(&named.args, |arg| self.fold_arg(arg))? {
            None => Folded::unchanged(TypeExpr::Named(named.clone())),
            Some(args) => Folded::changed(TypeExpr::Named(Arc::new(NamedType {
                reference: named.reference.clone(),
                args,
            }))),
        })
    }

    /// Rewrite a functional type constructor.
    fn fold_function(&mut self, func: &Arc<FunctionType>) -> Result<Folded<TypeExpr>, Self::Error> {
        self.super_fold_function(func)
    }

    fn super_fold_function(
        &mut self,
        func: &Arc<FunctionType>,
    ) -> Result<Folded<TypeExpr>, Self::Error> {
        Ok(match fold_list(&func.args, |arg| self.fold_arg(arg))? {
            None => Folded::unchanged(TypeExpr::Function(func.clone())),
            Some(args) => Folded::changed(TypeExpr::Function(Arc::new(FunctionType {
                args,
                ..FunctionType::clone(func)
            }))),
        })
    }

    /// Rewrite a type argument (a "projection").
    fn fold_arg(&mut self, arg: &TypeArg) -> Result<Folded<TypeArg>, Self::Error> {
        self.super_fold_arg(arg)
    }

    fn super_fold_arg(&mut self, arg: &TypeArg) -> Result<Folded<TypeArg>, Self::Error> {
        match arg {
            TypeArg::Star => Ok(Folded::unchanged(TypeArg::Star)),
            TypeArg::Variant(variance, inner) => {
                let folded = self.fold_ty(inner)?;
                Ok(if folded.changed {
                    Folded::changed(TypeArg::Variant(*variance, folded.value))
                } else {
                    Folded::unchanged(arg.clone())
                })
            }
        }
    }

    /// Rewrite through nullability and alias wrappers, then fall back to
    /// `fold_ty` for the wrapped type.
    ///
    /// For an alias, both the alias arguments and the expansion are folded.
    fn fold_through_wrappers(&mut self, ty: &TypeExpr) -> Result<Folded<TypeExpr>, Self::Error> {
        match ty {
            TypeExpr::Nullable(inner) => {
                let folded = self.fold_through_wrappers(inner)?;
                Ok(if folded.changed {
                    Folded::changed(TypeExpr::nullable(folded.value))
                } else {
                    Folded::unchanged(ty.clone())
                })
            }
            TypeExpr::NonNull(inner) => {
                let folded = self.fold_through_wrappers(inner)?;
                Ok(if folded.changed {
                    Folded::changed(TypeExpr::non_null(folded.value))
                } else {
                    Folded::unchanged(ty.clone())
                })
            }
            TypeExpr::Alias(alias) => {
                let args = fold_list(&alias.alias.args, |arg| self.fold_arg(arg))?;
                let expanded = self.fold_through_wrappers(&alias.expanded)?;
                if args.is_none() && !expanded.changed {
                    return Ok(Folded::unchanged(ty.clone()));
                }
                let alias_ty = NamedType {
                    reference: alias.alias.reference.clone(),
                    args: args.unwrap_or_else(|| alias.alias.args.clone()),
                };
                Ok(Folded::changed(TypeExpr::alias(alias_ty, expanded.value)))
            }
            _ => self.fold_ty(ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolRef;
    use core::convert::Infallible;

    struct Identity;

    impl TypeFolder for Identity {
        type Error = Infallible;
    }

    /// Replaces `kotlin/Int` with `kotlin/Long` and counts constructor visits.
    struct IntToLong {
        visited: usize,
    }

    impl TypeFolder for IntToLong {
        type Error = Infallible;

        fn fold_named(&mut self, named: &Arc<NamedType>) -> Result<Folded<TypeExpr>, Infallible> {
            self.visited += 1;
            if named.reference == SymbolRef::class("kotlin", "Int") {
                return Ok(Folded::changed(long()));
            }
            self.super_fold_named(named)
        }
    }

    fn int() -> TypeExpr {
        TypeExpr::simple(SymbolRef::class("kotlin", "Int"))
    }

    fn long() -> TypeExpr {
        TypeExpr::simple(SymbolRef::class("kotlin", "Long"))
    }

    fn string() -> TypeExpr {
        TypeExpr::simple(SymbolRef::class("kotlin", "String"))
    }

    fn map_of(key: TypeExpr, value: TypeExpr) -> TypeExpr {
        TypeExpr::named(
            SymbolRef::class("kotlin.collections", "Map"),
            [TypeArg::invariant(key), TypeArg::covariant(value)],
        )
    }

    #[test]
    fn test_identity_keeps_allocation() {
        let ty = map_of(string(), map_of(int(), TypeExpr::Dynamic));
        let folded = Identity.fold_ty(&ty).unwrap();
        assert!(!folded.changed);
        assert!(folded.value.ptr_eq(&ty));
    }

    #[test]
    fn test_rewrite_rebuilds_only_changed_path() {
        let key = string();
        let ty = map_of(key.clone(), int());
        let folded = IntToLong { visited: 0 }.fold_ty(&ty).unwrap();
        assert!(folded.changed);
        assert_eq!(folded.value, map_of(string(), long()));
        // The untouched key argument is shared, not copied.
        let new_key = folded.value.args()[0].ty().unwrap();
        assert!(new_key.ptr_eq(&key));
    }

    #[test]
    fn test_variance_preserved() {
        let arg = TypeArg::contravariant(int());
        let folded = IntToLong { visited: 0 }.fold_arg(&arg).unwrap();
        assert_eq!(folded.value, TypeArg::contravariant(long()));

        let star = IntToLong { visited: 0 }.fold_arg(&TypeArg::Star).unwrap();
        assert_eq!(star, Folded::unchanged(TypeArg::Star));
    }

    #[test]
    fn test_wrappers_are_opaque_by_default() {
        let mut folder = IntToLong { visited: 0 };
        let ty = TypeExpr::nullable(int());
        let folded = folder.fold_ty(&ty).unwrap();
        assert!(!folded.changed);
        assert!(folded.value.ptr_eq(&ty));
        assert_eq!(folder.visited, 0);
    }

    #[test]
    fn test_fold_through_wrappers() {
        let alias = NamedType {
            reference: SymbolRef::class("p", "Count"),
            args: Vec::new(),
        };
        let ty = TypeExpr::nullable(TypeExpr::alias(alias.clone(), int()));
        let folded = IntToLong { visited: 0 }.fold_through_wrappers(&ty).unwrap();
        assert!(folded.changed);
        assert_eq!(folded.value, TypeExpr::nullable(TypeExpr::alias(alias, long())));
    }

    #[test]
    fn test_function_type_keeps_flags() {
        let func = TypeExpr::function(
            SymbolRef::class("kotlin", "Function1"),
            [TypeArg::invariant(int()), TypeArg::invariant(string())],
            true,
            true,
        );
        let folded = IntToLong { visited: 0 }.fold_ty(&func).unwrap();
        match &folded.value {
            TypeExpr::Function(f) => {
                assert!(f.is_extension && f.is_suspendable);
                assert_eq!(f.args[0], TypeArg::invariant(long()));
            }
            other => panic!("Expected function type, got {:?}", other),
        }
    }

    #[test]
    fn test_fold_list_allocates_lazily() {
        let items = [1, 2, 3];
        let same: Result<_, Infallible> = fold_list(&items, |x| Ok(Folded::unchanged(*x)));
        assert_eq!(same.unwrap(), None);

        let doubled: Result<_, Infallible> = fold_list(&items, |x| {
            Ok(if *x == 2 {
                Folded::changed(20)
            } else {
                Folded::unchanged(*x)
            })
        });
        assert_eq!(doubled.unwrap(), Some(alloc::vec![1, 20, 3]));
    }
}
