//! Declaration nodes.
//!
//! Parents own their children through `Arc`, so an unchanged subtree can be
//! shared between the input and output of a rewrite. Nodes are never mutated
//! after they are shared; the `with_*` rebuild operations consume a node and
//! return it with one field replaced, never touching `info.symbol`.

use super::facets::DeclInfo;
use super::source_set::{Platform, SourceSet, SourceSetDependent};
use docmodel_types::{SymbolRef, TypeExpr, Variance};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Generates `with_<field>` rebuild operations for a node.
macro_rules! rebuild_ops {
    ($node:ident { $($method:ident => $field:ident: $ty:ty),* $(,)? }) => {
        impl $node {
            $(
                #[doc = concat!("This node with `", stringify!($field), "` replaced.")]
                pub fn $method(mut self, $field: $ty) -> Self {
                    self.$field = $field;
                    self
                }
            )*

            pub fn name(&self) -> &str {
                &self.info.name
            }

            pub fn symbol(&self) -> &SymbolRef {
                &self.info.symbol
            }
        }
    };
}

/// Kind of a supertype, as shown in inheritance lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Object,
    Annotation,
    Enum,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Object => "object",
            ClassKind::Annotation => "annotation class",
            ClassKind::Enum => "enum class",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Supertype {
    pub reference: SymbolRef,
    pub kind: ClassKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub info: DeclInfo,
    pub source_sets: Vec<SourceSet>,
    #[serde(default)]
    pub packages: Vec<Arc<Package>>,
}

rebuild_ops!(Module {
    with_packages => packages: Vec<Arc<Package>>,
});

impl Module {
    /// Whether any source set of this module targets `platform`.
    pub fn targets(&self, platform: Platform) -> bool {
        self.source_sets.iter().any(|set| set.platform == platform)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub info: DeclInfo,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
    #[serde(default)]
    pub typealiases: Vec<Arc<TypeAlias>>,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
}

rebuild_ops!(Package {
    with_classlikes => classlikes: Vec<ClassLike>,
    with_typealiases => typealiases: Vec<Arc<TypeAlias>>,
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub info: DeclInfo,
    #[serde(default)]
    pub constructors: Vec<Arc<Function>>,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
    #[serde(default)]
    pub companion: Option<Arc<ObjectDecl>>,
    #[serde(default)]
    pub supertypes: SourceSetDependent<Vec<Supertype>>,
}

rebuild_ops!(Class {
    with_constructors => constructors: Vec<Arc<Function>>,
    with_generics => generics: Vec<Arc<TypeParam>>,
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
    with_classlikes => classlikes: Vec<ClassLike>,
    with_companion => companion: Option<Arc<ObjectDecl>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub info: DeclInfo,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
    #[serde(default)]
    pub companion: Option<Arc<ObjectDecl>>,
    #[serde(default)]
    pub supertypes: SourceSetDependent<Vec<Supertype>>,
}

rebuild_ops!(Interface {
    with_generics => generics: Vec<Arc<TypeParam>>,
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
    with_classlikes => classlikes: Vec<ClassLike>,
    with_companion => companion: Option<Arc<ObjectDecl>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDecl {
    pub info: DeclInfo,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
    #[serde(default)]
    pub supertypes: SourceSetDependent<Vec<Supertype>>,
}

rebuild_ops!(ObjectDecl {
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
    with_classlikes => classlikes: Vec<ClassLike>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub info: DeclInfo,
    #[serde(default)]
    pub constructors: Vec<Arc<Function>>,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
    #[serde(default)]
    pub companion: Option<Arc<ObjectDecl>>,
}

rebuild_ops!(Annotation {
    with_constructors => constructors: Vec<Arc<Function>>,
    with_generics => generics: Vec<Arc<TypeParam>>,
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
    with_classlikes => classlikes: Vec<ClassLike>,
    with_companion => companion: Option<Arc<ObjectDecl>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub info: DeclInfo,
    #[serde(default)]
    pub entries: Vec<Arc<EnumEntry>>,
    #[serde(default)]
    pub constructors: Vec<Arc<Function>>,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
    #[serde(default)]
    pub companion: Option<Arc<ObjectDecl>>,
    #[serde(default)]
    pub supertypes: SourceSetDependent<Vec<Supertype>>,
}

rebuild_ops!(Enum {
    with_entries => entries: Vec<Arc<EnumEntry>>,
    with_constructors => constructors: Vec<Arc<Function>>,
    with_generics => generics: Vec<Arc<TypeParam>>,
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
    with_classlikes => classlikes: Vec<ClassLike>,
    with_companion => companion: Option<Arc<ObjectDecl>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumEntry {
    pub info: DeclInfo,
    #[serde(default)]
    pub functions: Vec<Arc<Function>>,
    #[serde(default)]
    pub properties: Vec<Arc<Property>>,
    #[serde(default)]
    pub classlikes: Vec<ClassLike>,
}

rebuild_ops!(EnumEntry {
    with_functions => functions: Vec<Arc<Function>>,
    with_properties => properties: Vec<Arc<Property>>,
    with_classlikes => classlikes: Vec<ClassLike>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub info: DeclInfo,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    /// The alias itself as a type, e.g. `Handler<T>`.
    pub ty: TypeExpr,
    /// What the alias expands to, per source set.
    pub underlying: SourceSetDependent<TypeExpr>,
}

rebuild_ops!(TypeAlias {
    with_generics => generics: Vec<Arc<TypeParam>>,
    with_ty => ty: TypeExpr,
    with_underlying => underlying: SourceSetDependent<TypeExpr>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub info: DeclInfo,
    #[serde(default)]
    pub parameters: Vec<Arc<Parameter>>,
    #[serde(default)]
    pub receiver: Option<Arc<Parameter>>,
    pub return_type: TypeExpr,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    #[serde(default)]
    pub is_constructor: bool,
}

rebuild_ops!(Function {
    with_parameters => parameters: Vec<Arc<Parameter>>,
    with_receiver => receiver: Option<Arc<Parameter>>,
    with_return_type => return_type: TypeExpr,
    with_generics => generics: Vec<Arc<TypeParam>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub info: DeclInfo,
    pub ty: TypeExpr,
    #[serde(default)]
    pub receiver: Option<Arc<Parameter>>,
    #[serde(default)]
    pub getter: Option<Arc<Function>>,
    #[serde(default)]
    pub setter: Option<Arc<Function>>,
    #[serde(default)]
    pub generics: Vec<Arc<TypeParam>>,
    #[serde(default)]
    pub is_mutable: bool,
}

rebuild_ops!(Property {
    with_ty => ty: TypeExpr,
    with_receiver => receiver: Option<Arc<Parameter>>,
    with_getter => getter: Option<Arc<Function>>,
    with_setter => setter: Option<Arc<Function>>,
    with_generics => generics: Vec<Arc<TypeParam>>,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub info: DeclInfo,
    pub ty: TypeExpr,
}

rebuild_ops!(Parameter {
    with_ty => ty: TypeExpr,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub info: DeclInfo,
    pub variance: Variance,
    #[serde(default)]
    pub bounds: Vec<TypeExpr>,
}

rebuild_ops!(TypeParam {
    with_bounds => bounds: Vec<TypeExpr>,
});

/// A class-like declaration.
///
/// Each variant holds its node behind an `Arc`, so a `ClassLike` is a cheap
/// handle and an unchanged class can be shared by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "decl", rename_all = "lowercase")]
pub enum ClassLike {
    Class(Arc<Class>),
    Interface(Arc<Interface>),
    Object(Arc<ObjectDecl>),
    Annotation(Arc<Annotation>),
    Enum(Arc<Enum>),
}

impl ClassLike {
    pub fn info(&self) -> &DeclInfo {
        match self {
            ClassLike::Class(c) => &c.info,
            ClassLike::Interface(i) => &i.info,
            ClassLike::Object(o) => &o.info,
            ClassLike::Annotation(a) => &a.info,
            ClassLike::Enum(e) => &e.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn symbol(&self) -> &SymbolRef {
        &self.info().symbol
    }

    pub fn kind(&self) -> ClassKind {
        match self {
            ClassLike::Class(_) => ClassKind::Class,
            ClassLike::Interface(_) => ClassKind::Interface,
            ClassLike::Object(_) => ClassKind::Object,
            ClassLike::Annotation(_) => ClassKind::Annotation,
            ClassLike::Enum(_) => ClassKind::Enum,
        }
    }

    pub fn supertypes(&self) -> Option<&SourceSetDependent<Vec<Supertype>>> {
        match self {
            ClassLike::Class(c) => Some(&c.supertypes),
            ClassLike::Interface(i) => Some(&i.supertypes),
            ClassLike::Object(o) => Some(&o.supertypes),
            ClassLike::Enum(e) => Some(&e.supertypes),
            ClassLike::Annotation(_) => None,
        }
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &ClassLike) -> bool {
        match (self, other) {
            (ClassLike::Class(a), ClassLike::Class(b)) => Arc::ptr_eq(a, b),
            (ClassLike::Interface(a), ClassLike::Interface(b)) => Arc::ptr_eq(a, b),
            (ClassLike::Object(a), ClassLike::Object(b)) => Arc::ptr_eq(a, b),
            (ClassLike::Annotation(a), ClassLike::Annotation(b)) => Arc::ptr_eq(a, b),
            (ClassLike::Enum(a), ClassLike::Enum(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Class> for ClassLike {
    fn from(class: Class) -> Self {
        ClassLike::Class(Arc::new(class))
    }
}

impl From<Interface> for ClassLike {
    fn from(interface: Interface) -> Self {
        ClassLike::Interface(Arc::new(interface))
    }
}

impl From<ObjectDecl> for ClassLike {
    fn from(object: ObjectDecl) -> Self {
        ClassLike::Object(Arc::new(object))
    }
}

impl From<Annotation> for ClassLike {
    fn from(annotation: Annotation) -> Self {
        ClassLike::Annotation(Arc::new(annotation))
    }
}

impl From<Enum> for ClassLike {
    fn from(e: Enum) -> Self {
        ClassLike::Enum(Arc::new(e))
    }
}
