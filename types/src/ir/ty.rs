use super::{SymbolRef, TypeVisitor};
use alloc::sync::Arc;
use alloc::vec::Vec;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags summarizing what a type expression contains.
    ///
    /// Computed by a full walk (wrappers included), so they answer questions
    /// like "does this signature mention an unresolved type" without callers
    /// writing their own visitor.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        const HAS_TYPE_VAR = 1;
        const HAS_UNRESOLVED = 1 << 1;
        const HAS_RECURSIVE_REF = 1 << 2;
        const HAS_DYNAMIC = 1 << 3;
        const HAS_NULLABLE = 1 << 4;
    }
}

/// Variance of a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variance {
    /// `out T`
    Covariant,
    /// `in T`
    Contravariant,
    /// `T`
    Invariant,
}

/// A type argument: either a star projection or a variance-wrapped type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeArg {
    Star,
    Variant(Variance, TypeExpr),
}

impl TypeArg {
    pub fn invariant(ty: TypeExpr) -> Self {
        TypeArg::Variant(Variance::Invariant, ty)
    }

    pub fn covariant(ty: TypeExpr) -> Self {
        TypeArg::Variant(Variance::Covariant, ty)
    }

    pub fn contravariant(ty: TypeExpr) -> Self {
        TypeArg::Variant(Variance::Contravariant, ty)
    }

    /// The wrapped type, or `None` for a star projection.
    pub fn ty(&self) -> Option<&TypeExpr> {
        match self {
            TypeArg::Star => None,
            TypeArg::Variant(_, ty) => Some(ty),
        }
    }
}

/// A concrete or generic type constructor applied to arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    pub reference: SymbolRef,
    #[serde(default)]
    pub args: Vec<TypeArg>,
}

/// A callable type such as `(Int) -> String` or `suspend T.() -> Unit`.
///
/// For extension function types the first argument is the receiver; the last
/// argument is always the return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    /// The function class, e.g. `kotlin/Function1`.
    pub reference: SymbolRef,
    pub args: Vec<TypeArg>,
    #[serde(default)]
    pub is_extension: bool,
    #[serde(default)]
    pub is_suspendable: bool,
    #[serde(default)]
    pub presentable_name: Option<Arc<str>>,
}

/// Reference to a type parameter of an enclosing declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeVarRef {
    /// Points at the type parameter (`SymbolTarget::GenericParameter`).
    pub owner: SymbolRef,
    pub name: Arc<str>,
}

/// An alias use together with what it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasExpansion {
    pub alias: NamedType,
    pub expanded: TypeExpr,
}

/// A type occurring in a declaration signature.
///
/// Payloads live behind `Arc`, so cloning is cheap and rewrites can hand back
/// the very same allocation when nothing changed (see [`TypeExpr::ptr_eq`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeExpr {
    Named(Arc<NamedType>),
    Function(Arc<FunctionType>),
    TypeVar(Arc<TypeVarRef>),
    Nullable(Arc<TypeExpr>),
    NonNull(Arc<TypeExpr>),
    Alias(Arc<AliasExpansion>),
    Unresolved(Arc<str>),
    Dynamic,
    /// Cycle sentinel; `depth` counts ancestor levels up to the type this
    /// reference closes a cycle with. Only the flattener emits it.
    Recursive(u32),
}

impl TypeExpr {
    pub fn named(reference: SymbolRef, args: impl IntoIterator<Item = TypeArg>) -> Self {
        TypeExpr::Named(Arc::new(NamedType {
            reference,
            args: args.into_iter().collect(),
        }))
    }

    /// Named type without arguments.
    pub fn simple(reference: SymbolRef) -> Self {
        Self::named(reference, [])
    }

    pub fn function(
        reference: SymbolRef,
        args: impl IntoIterator<Item = TypeArg>,
        is_extension: bool,
        is_suspendable: bool,
    ) -> Self {
        TypeExpr::Function(Arc::new(FunctionType {
            reference,
            args: args.into_iter().collect(),
            is_extension,
            is_suspendable,
            presentable_name: None,
        }))
    }

    /// Name a function type is shown under, e.g. a functional interface.
    /// Other variants are returned unchanged.
    pub fn with_presentable_name(self, name: &str) -> Self {
        match self {
            TypeExpr::Function(func) => TypeExpr::Function(Arc::new(FunctionType {
                presentable_name: Some(Arc::from(name)),
                ..FunctionType::clone(&func)
            })),
            other => other,
        }
    }

    pub fn type_var(owner: SymbolRef, name: &str) -> Self {
        TypeExpr::TypeVar(Arc::new(TypeVarRef {
            owner,
            name: Arc::from(name),
        }))
    }

    pub fn nullable(inner: TypeExpr) -> Self {
        TypeExpr::Nullable(Arc::new(inner))
    }

    pub fn non_null(inner: TypeExpr) -> Self {
        TypeExpr::NonNull(Arc::new(inner))
    }

    pub fn alias(alias: NamedType, expanded: TypeExpr) -> Self {
        TypeExpr::Alias(Arc::new(AliasExpansion { alias, expanded }))
    }

    pub fn unresolved(description: &str) -> Self {
        TypeExpr::Unresolved(Arc::from(description))
    }

    /// Whether both values share the same allocation.
    ///
    /// Payload-free variants compare by value since there is nothing to share.
    pub fn ptr_eq(&self, other: &TypeExpr) -> bool {
        match (self, other) {
            (TypeExpr::Named(a), TypeExpr::Named(b)) => Arc::ptr_eq(a, b),
            (TypeExpr::Function(a), TypeExpr::Function(b)) => Arc::ptr_eq(a, b),
            (TypeExpr::TypeVar(a), TypeExpr::TypeVar(b)) => Arc::ptr_eq(a, b),
            (TypeExpr::Nullable(a), TypeExpr::Nullable(b))
            | (TypeExpr::NonNull(a), TypeExpr::NonNull(b)) => Arc::ptr_eq(a, b),
            (TypeExpr::Alias(a), TypeExpr::Alias(b)) => Arc::ptr_eq(a, b),
            (TypeExpr::Unresolved(a), TypeExpr::Unresolved(b)) => Arc::ptr_eq(a, b),
            (TypeExpr::Dynamic, TypeExpr::Dynamic) => true,
            (TypeExpr::Recursive(a), TypeExpr::Recursive(b)) => a == b,
            _ => false,
        }
    }

    /// Constructor identity: same variant and, for type constructors, the
    /// same referenced symbol. Arguments are not compared.
    pub fn same_constructor(&self, other: &TypeExpr) -> bool {
        match (self, other) {
            (TypeExpr::Named(a), TypeExpr::Named(b)) => a.reference == b.reference,
            (TypeExpr::Function(a), TypeExpr::Function(b)) => a.reference == b.reference,
            (TypeExpr::TypeVar(a), TypeExpr::TypeVar(b)) => a.owner == b.owner,
            (TypeExpr::Alias(a), TypeExpr::Alias(b)) => a.alias.reference == b.alias.reference,
            (TypeExpr::Nullable(_), TypeExpr::Nullable(_))
            | (TypeExpr::NonNull(_), TypeExpr::NonNull(_))
            | (TypeExpr::Unresolved(_), TypeExpr::Unresolved(_))
            | (TypeExpr::Dynamic, TypeExpr::Dynamic)
            | (TypeExpr::Recursive(_), TypeExpr::Recursive(_)) => true,
            _ => false,
        }
    }

    /// The referenced symbol of a type constructor (or alias), if any.
    pub fn reference(&self) -> Option<&SymbolRef> {
        match self {
            TypeExpr::Named(named) => Some(&named.reference),
            TypeExpr::Function(func) => Some(&func.reference),
            TypeExpr::Alias(alias) => Some(&alias.alias.reference),
            TypeExpr::TypeVar(var) => Some(&var.owner),
            _ => None,
        }
    }

    /// Type arguments of a type constructor; empty for every other variant.
    pub fn args(&self) -> &[TypeArg] {
        match self {
            TypeExpr::Named(named) => &named.args,
            TypeExpr::Function(func) => &func.args,
            _ => &[],
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeExpr::Nullable(_))
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self, TypeExpr::Recursive(_))
    }

    /// Compute the content flags of this type.
    pub fn flags(&self) -> TypeFlags {
        let mut collector = FlagCollector {
            flags: TypeFlags::empty(),
        };
        collector.visit_ty(self);
        collector.flags
    }
}

impl From<NamedType> for TypeExpr {
    fn from(named: NamedType) -> Self {
        TypeExpr::Named(Arc::new(named))
    }
}

struct FlagCollector {
    flags: TypeFlags,
}

impl TypeVisitor for FlagCollector {
    fn visit_ty(&mut self, ty: &TypeExpr) {
        self.flags |= match ty {
            TypeExpr::TypeVar(_) => TypeFlags::HAS_TYPE_VAR,
            TypeExpr::Unresolved(_) => TypeFlags::HAS_UNRESOLVED,
            TypeExpr::Recursive(_) => TypeFlags::HAS_RECURSIVE_REF,
            TypeExpr::Dynamic => TypeFlags::HAS_DYNAMIC,
            TypeExpr::Nullable(_) => TypeFlags::HAS_NULLABLE,
            _ => TypeFlags::empty(),
        };
        self.super_visit_ty(ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeExpr {
        TypeExpr::simple(SymbolRef::class("kotlin", "Int"))
    }

    fn array_of(arg: TypeArg) -> TypeExpr {
        TypeExpr::named(SymbolRef::class("kotlin", "Array"), [arg])
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(array_of(TypeArg::invariant(int())), array_of(TypeArg::invariant(int())));
        assert_ne!(
            array_of(TypeArg::invariant(int())),
            array_of(TypeArg::covariant(int()))
        );
        assert_ne!(array_of(TypeArg::invariant(int())), array_of(TypeArg::Star));
    }

    #[test]
    fn test_ptr_eq_vs_equality() {
        let a = array_of(TypeArg::invariant(int()));
        let b = a.clone();
        let c = array_of(TypeArg::invariant(int()));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn test_same_constructor_ignores_args() {
        let a = array_of(TypeArg::invariant(int()));
        let b = array_of(TypeArg::Star);
        assert!(a.same_constructor(&b));
        assert!(!a.same_constructor(&int()));
        assert!(!a.same_constructor(&TypeExpr::nullable(a.clone())));
    }

    #[test]
    fn test_flags_look_inside_wrappers() {
        let t = SymbolRef::class("p", "Box").generic(0);
        let ty = TypeExpr::nullable(array_of(TypeArg::covariant(TypeExpr::type_var(t, "T"))));
        let flags = ty.flags();
        assert!(flags.contains(TypeFlags::HAS_NULLABLE | TypeFlags::HAS_TYPE_VAR));
        assert!(!flags.contains(TypeFlags::HAS_UNRESOLVED));
        assert_eq!(int().flags(), TypeFlags::empty());
    }

    #[test]
    fn test_accessors() {
        let ty = array_of(TypeArg::invariant(int()));
        assert_eq!(ty.reference(), Some(&SymbolRef::class("kotlin", "Array")));
        assert_eq!(ty.args().len(), 1);
        assert_eq!(ty.args()[0].ty(), Some(&int()));
        assert!(TypeExpr::Dynamic.args().is_empty());
        assert_eq!(TypeExpr::Recursive(1).reference(), None);
    }
}
