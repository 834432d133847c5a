//! Declaration model: an immutable tree of documented declarations whose
//! leaves are type expressions.

pub mod decl;
pub mod facets;
pub mod source_set;
pub mod tree;

pub use decl::{
    Annotation, Class, ClassKind, ClassLike, Enum, EnumEntry, Function, Interface, Module,
    ObjectDecl, Package, Parameter, Property, Supertype, TypeAlias, TypeParam,
};
pub use facets::{AnnotationUse, DeclInfo, Documentation, Modality, Visibility};
pub use source_set::{Platform, SourceSet, SourceSetDependent, SourceSetId};
pub use tree::{Decl, DeclKind, DeclVisitor, walk};
