//! Type expressions for documented signatures.
//!
//! This crate models the types that occur in declaration signatures (named
//! and generic types, function types, type-variable references, nullability
//! wrappers, alias expansions, unresolved and dynamic markers), together with
//! the symbol references they point at and generic algorithms over them.
//!
//! # Example
//!
//! ```
//! use docmodel_types::{SymbolRef, TypeArg, TypeExpr};
//!
//! let int = TypeExpr::simple(SymbolRef::class("kotlin", "Int"));
//! let array = TypeExpr::named(SymbolRef::class("kotlin", "Array"), [TypeArg::covariant(int)]);
//! assert_eq!(array.to_string(), "Array<out Int>");
//! ```

#![no_std]
extern crate alloc;

// Intermediate Representation - type expressions and algorithms
pub mod ir;

// Re-export IR types for convenience
pub use ir::{
    AliasExpansion, Callable, ClosureVisitor, Folded, FunctionType, NamedType, SymbolRef,
    SymbolTarget, TypeArg, TypeExpr, TypeFlags, TypeFolder, TypeFormatter, TypeVarRef,
    TypeVisitor, Variance, fold_list, referenced_symbols,
};
