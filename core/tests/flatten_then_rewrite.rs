//! Front end to consumer: flatten compiler types from an interned table,
//! assemble a module, run the default pipeline and resolve the result.

use docmodel_core::model::{DeclInfo, Function, Module, Package, Parameter, Platform, SourceSet};
use docmodel_core::types::{Callable, SymbolRef, TypeExpr, Variance};
use docmodel_core::{Flattener, Pipeline, SourceArg, SourceType, SourceTypeKind, SymbolIndex};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// A compiler type table where types refer to each other by index, the way
/// interning front ends hand them out.
enum Entry {
    Class(SymbolRef, Vec<(Variance, usize)>),
    Param(SymbolRef, &'static str, Vec<usize>),
}

#[derive(Clone, Copy)]
struct Interned<'t> {
    table: &'t [Entry],
    id: usize,
}

impl PartialEq for Interned<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<'t> Interned<'t> {
    fn at(&self, id: usize) -> Self {
        Self {
            table: self.table,
            id,
        }
    }
}

impl SourceType for Interned<'_> {
    fn view(&self) -> SourceTypeKind<Self> {
        match &self.table[self.id] {
            Entry::Class(reference, args) => SourceTypeKind::Class {
                reference: reference.clone(),
                args: args
                    .iter()
                    .map(|(variance, id)| SourceArg::Projection(*variance, self.at(*id)))
                    .collect(),
            },
            Entry::Param(owner, name, bounds) => SourceTypeKind::TypeParameter {
                owner: owner.clone(),
                name: name.to_string(),
                bounds: bounds.iter().map(|id| self.at(*id)).collect(),
            },
        }
    }

    fn is_marked_nullable(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("#{}", self.id)
    }
}

const T: usize = 0;
const COMPARABLE_T: usize = 1;
const ARRAY_INT: usize = 2;
const ARRAY_T: usize = 3;
const INT: usize = 4;

/// `fun <T : Comparable<T>> sorted(items: Array<Int>): Array<T>`
fn sorted_function() -> Function {
    let package = SymbolRef::package("demo");
    let symbol = package.member(Callable::new("sorted", ["kotlin.Array"]));
    let table = [
        Entry::Param(symbol.generic(0), "T", vec![COMPARABLE_T]),
        Entry::Class(
            SymbolRef::class("kotlin", "Comparable"),
            vec![(Variance::Contravariant, T)],
        ),
        Entry::Class(
            SymbolRef::class("kotlin", "Array"),
            vec![(Variance::Invariant, INT)],
        ),
        Entry::Class(
            SymbolRef::class("kotlin", "Array"),
            vec![(Variance::Invariant, T)],
        ),
        Entry::Class(SymbolRef::class("kotlin", "Int"), Vec::new()),
    ];
    let root = Interned {
        table: &table,
        id: T,
    };

    let mut flattener = Flattener::new();
    let generic = flattener
        .type_param(&root, DeclInfo::new("T", symbol.generic(0)), Variance::Invariant)
        .unwrap();
    let items = flattener.flatten(&root.at(ARRAY_INT));
    let return_type = flattener.flatten(&root.at(ARRAY_T));
    assert_eq!(flattener.cycles_closed(), 1);

    Function {
        info: DeclInfo::new("sorted", symbol.clone()),
        parameters: vec![Arc::new(Parameter {
            info: DeclInfo::new("items", symbol.parameter(0)),
            ty: items,
        })],
        receiver: None,
        return_type,
        generics: vec![Arc::new(generic)],
        is_constructor: false,
    }
}

fn module(platform: Platform) -> Arc<Module> {
    let function = sorted_function();
    Arc::new(Module {
        info: DeclInfo::new("demo", SymbolRef::module("demo")),
        source_sets: vec![SourceSet::new("main", platform)],
        packages: vec![Arc::new(Package {
            info: DeclInfo::new("demo", SymbolRef::package("demo")),
            classlikes: Vec::new(),
            typealiases: Vec::new(),
            functions: vec![Arc::new(function)],
            properties: Vec::new(),
        })],
    })
}

#[test]
fn test_flattened_signature_survives_pipeline() {
    let forest = vec![module(Platform::Jvm)];
    let rewritten = Pipeline::new()
        .with_pass(docmodel_core::rewrite::PrimitiveArrayPass::new())
        .run(&forest)
        .unwrap();

    let function = &rewritten[0].packages[0].functions[0];
    assert_eq!(function.generics[0].bounds[0].to_string(), "Comparable<in ^2>");
    assert_eq!(function.parameters[0].ty, TypeExpr::simple(SymbolRef::class("kotlin", "IntArray")));
    // A type variable inside the array is not a primitive.
    assert_eq!(function.return_type.to_string(), "Array<T>");
    assert!(Arc::ptr_eq(
        &function.generics[0],
        &forest[0].packages[0].functions[0].generics[0]
    ));
}

#[test]
fn test_non_jvm_module_shared_by_identity() {
    let forest = vec![module(Platform::Js)];
    let mut pipeline = Pipeline::new().with_pass(docmodel_core::rewrite::PrimitiveArrayPass::new());
    let rewritten = pipeline.run(&forest).unwrap();
    assert!(Arc::ptr_eq(&rewritten[0], &forest[0]));
}

#[test]
fn test_index_resolves_flattened_owner() {
    let forest = vec![module(Platform::Jvm)];
    let index = SymbolIndex::build(&forest);
    let function = &forest[0].packages[0].functions[0];
    let bound = &function.generics[0].bounds[0];
    let Some(arg) = bound.args()[0].ty() else {
        panic!("expected a projected argument");
    };
    assert!(arg.is_recursive());

    let resolved = index.resolve(&function.generics[0].info.symbol).unwrap();
    assert_eq!(resolved.name(), "T");
    assert!(index.resolve_type(&function.return_type).is_none());
}
