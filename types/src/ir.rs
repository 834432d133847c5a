//! Intermediate Representation (IR) for signature types.
//!
//! ## Structure
//!
//! - **Symbols**: `SymbolRef` - non-owning references to declarations
//! - **Core types**: `TypeExpr`, `TypeArg` - the logical structure of types
//! - **Generic algorithms**: visitor and folder patterns over types
//! - **Display**: signature formatting

pub mod display;
pub mod fold;
pub mod symbol;
pub mod ty;
pub mod visit;

pub use display::TypeFormatter;
pub use fold::{Folded, TypeFolder, fold_list};
pub use symbol::{Callable, SymbolRef, SymbolTarget};
pub use ty::{
    AliasExpansion, FunctionType, NamedType, TypeArg, TypeExpr, TypeFlags, TypeVarRef, Variance,
};
pub use visit::{ClosureVisitor, TypeVisitor, referenced_symbols};
