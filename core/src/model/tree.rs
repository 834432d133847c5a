//! Uniform handles over every declaration kind, for read-only walks.

use super::decl::*;
use super::facets::DeclInfo;
use core::fmt;
use docmodel_types::{SymbolRef, TypeExpr};
use std::sync::Arc;

/// Kind of a declaration, as used in outlines and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Module,
    Package,
    Class,
    Interface,
    Object,
    Annotation,
    Enum,
    EnumEntry,
    TypeAlias,
    Function,
    Constructor,
    Property,
    Parameter,
    TypeParam,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeclKind::Module => "module",
            DeclKind::Package => "package",
            DeclKind::Class => "class",
            DeclKind::Interface => "interface",
            DeclKind::Object => "object",
            DeclKind::Annotation => "annotation class",
            DeclKind::Enum => "enum class",
            DeclKind::EnumEntry => "enum entry",
            DeclKind::TypeAlias => "typealias",
            DeclKind::Function => "fun",
            DeclKind::Constructor => "constructor",
            DeclKind::Property => "val",
            DeclKind::Parameter => "parameter",
            DeclKind::TypeParam => "type parameter",
        };
        f.write_str(label)
    }
}

/// A shared handle to any declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Module(Arc<Module>),
    Package(Arc<Package>),
    ClassLike(ClassLike),
    EnumEntry(Arc<EnumEntry>),
    TypeAlias(Arc<TypeAlias>),
    Function(Arc<Function>),
    Property(Arc<Property>),
    Parameter(Arc<Parameter>),
    TypeParam(Arc<TypeParam>),
}

impl Decl {
    pub fn info(&self) -> &DeclInfo {
        match self {
            Decl::Module(m) => &m.info,
            Decl::Package(p) => &p.info,
            Decl::ClassLike(c) => c.info(),
            Decl::EnumEntry(e) => &e.info,
            Decl::TypeAlias(t) => &t.info,
            Decl::Function(f) => &f.info,
            Decl::Property(p) => &p.info,
            Decl::Parameter(p) => &p.info,
            Decl::TypeParam(t) => &t.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn symbol(&self) -> &SymbolRef {
        &self.info().symbol
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Decl::Module(_) => DeclKind::Module,
            Decl::Package(_) => DeclKind::Package,
            Decl::ClassLike(c) => match c {
                ClassLike::Class(_) => DeclKind::Class,
                ClassLike::Interface(_) => DeclKind::Interface,
                ClassLike::Object(_) => DeclKind::Object,
                ClassLike::Annotation(_) => DeclKind::Annotation,
                ClassLike::Enum(_) => DeclKind::Enum,
            },
            Decl::EnumEntry(_) => DeclKind::EnumEntry,
            Decl::TypeAlias(_) => DeclKind::TypeAlias,
            Decl::Function(f) if f.is_constructor => DeclKind::Constructor,
            Decl::Function(_) => DeclKind::Function,
            Decl::Property(_) => DeclKind::Property,
            Decl::Parameter(_) => DeclKind::Parameter,
            Decl::TypeParam(_) => DeclKind::TypeParam,
        }
    }

    /// Direct children, in declaration order.
    pub fn children(&self) -> Vec<Decl> {
        let mut out = Vec::new();
        match self {
            Decl::Module(m) => out.extend(m.packages.iter().cloned().map(Decl::Package)),
            Decl::Package(p) => {
                out.extend(p.classlikes.iter().cloned().map(Decl::ClassLike));
                out.extend(p.typealiases.iter().cloned().map(Decl::TypeAlias));
                out.extend(p.functions.iter().cloned().map(Decl::Function));
                out.extend(p.properties.iter().cloned().map(Decl::Property));
            }
            Decl::ClassLike(c) => match c {
                ClassLike::Class(c) => {
                    push_members(
                        &mut out,
                        &c.generics,
                        &c.constructors,
                        &c.functions,
                        &c.properties,
                    );
                    out.extend(c.classlikes.iter().cloned().map(Decl::ClassLike));
                    out.extend(companion(&c.companion));
                }
                ClassLike::Interface(i) => {
                    push_members(&mut out, &i.generics, &[], &i.functions, &i.properties);
                    out.extend(i.classlikes.iter().cloned().map(Decl::ClassLike));
                    out.extend(companion(&i.companion));
                }
                ClassLike::Object(o) => {
                    push_members(&mut out, &[], &[], &o.functions, &o.properties);
                    out.extend(o.classlikes.iter().cloned().map(Decl::ClassLike));
                }
                ClassLike::Annotation(a) => {
                    push_members(
                        &mut out,
                        &a.generics,
                        &a.constructors,
                        &a.functions,
                        &a.properties,
                    );
                    out.extend(a.classlikes.iter().cloned().map(Decl::ClassLike));
                    out.extend(companion(&a.companion));
                }
                ClassLike::Enum(e) => {
                    out.extend(e.entries.iter().cloned().map(Decl::EnumEntry));
                    push_members(
                        &mut out,
                        &e.generics,
                        &e.constructors,
                        &e.functions,
                        &e.properties,
                    );
                    out.extend(e.classlikes.iter().cloned().map(Decl::ClassLike));
                    out.extend(companion(&e.companion));
                }
            },
            Decl::EnumEntry(e) => {
                push_members(&mut out, &[], &[], &e.functions, &e.properties);
                out.extend(e.classlikes.iter().cloned().map(Decl::ClassLike));
            }
            Decl::TypeAlias(t) => out.extend(t.generics.iter().cloned().map(Decl::TypeParam)),
            Decl::Function(f) => {
                out.extend(f.generics.iter().cloned().map(Decl::TypeParam));
                out.extend(f.receiver.iter().cloned().map(Decl::Parameter));
                out.extend(f.parameters.iter().cloned().map(Decl::Parameter));
            }
            Decl::Property(p) => {
                out.extend(p.generics.iter().cloned().map(Decl::TypeParam));
                out.extend(p.receiver.iter().cloned().map(Decl::Parameter));
                out.extend(p.getter.iter().cloned().map(Decl::Function));
                out.extend(p.setter.iter().cloned().map(Decl::Function));
            }
            Decl::Parameter(_) | Decl::TypeParam(_) => {}
        }
        out
    }

    /// Types held directly by this declaration (not by its children).
    pub fn types(&self) -> Vec<TypeExpr> {
        match self {
            Decl::TypeAlias(t) => std::iter::once(t.ty.clone())
                .chain(t.underlying.values().cloned())
                .collect(),
            Decl::Function(f) => vec![f.return_type.clone()],
            Decl::Property(p) => vec![p.ty.clone()],
            Decl::Parameter(p) => vec![p.ty.clone()],
            Decl::TypeParam(t) => t.bounds.clone(),
            Decl::Module(_)
            | Decl::Package(_)
            | Decl::ClassLike(_)
            | Decl::EnumEntry(_) => Vec::new(),
        }
    }
}

fn push_members(
    out: &mut Vec<Decl>,
    generics: &[Arc<TypeParam>],
    constructors: &[Arc<Function>],
    functions: &[Arc<Function>],
    properties: &[Arc<Property>],
) {
    out.extend(generics.iter().cloned().map(Decl::TypeParam));
    out.extend(constructors.iter().cloned().map(Decl::Function));
    out.extend(functions.iter().cloned().map(Decl::Function));
    out.extend(properties.iter().cloned().map(Decl::Property));
}

fn companion(companion: &Option<Arc<ObjectDecl>>) -> Option<Decl> {
    companion
        .as_ref()
        .map(|object| Decl::ClassLike(ClassLike::Object(object.clone())))
}

/// Trait for walking a declaration forest without rebuilding it.
///
/// Override `visit_decl` and call `super_visit_decl` to keep descending.
pub trait DeclVisitor {
    fn visit_decl(&mut self, decl: &Decl) {
        self.super_visit_decl(decl)
    }

    fn super_visit_decl(&mut self, decl: &Decl) {
        for child in decl.children() {
            self.visit_decl(&child);
        }
    }
}

/// Visit every module of a forest.
pub fn walk(modules: &[Arc<Module>], visitor: &mut impl DeclVisitor) {
    for module in modules {
        visitor.visit_decl(&Decl::Module(module.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmodel_types::Callable;

    struct KindCounter {
        kinds: Vec<DeclKind>,
    }

    impl DeclVisitor for KindCounter {
        fn visit_decl(&mut self, decl: &Decl) {
            self.kinds.push(decl.kind());
            self.super_visit_decl(decl);
        }
    }

    #[test]
    fn test_walk_visits_in_order() {
        let pkg_sym = SymbolRef::package("p");
        let f_sym = pkg_sym.member(Callable::new("f", ["kotlin.Int"]));
        let int = TypeExpr::simple(SymbolRef::class("kotlin", "Int"));
        let function = Arc::new(Function {
            info: DeclInfo::new("f", f_sym.clone()),
            parameters: vec![Arc::new(Parameter {
                info: DeclInfo::new("x", f_sym.parameter(0)),
                ty: int.clone(),
            })],
            receiver: None,
            return_type: int,
            generics: Vec::new(),
            is_constructor: false,
        });
        let package = Arc::new(Package {
            info: DeclInfo::new("p", pkg_sym),
            classlikes: Vec::new(),
            typealiases: Vec::new(),
            functions: vec![function],
            properties: Vec::new(),
        });
        let module = Arc::new(Module {
            info: DeclInfo::new("m", SymbolRef::module("m")),
            source_sets: Vec::new(),
            packages: vec![package],
        });

        let mut counter = KindCounter { kinds: Vec::new() };
        walk(&[module], &mut counter);
        assert_eq!(
            counter.kinds,
            vec![
                DeclKind::Module,
                DeclKind::Package,
                DeclKind::Function,
                DeclKind::Parameter
            ]
        );
    }
}
