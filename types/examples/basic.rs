//! Basic example: build a signature type, print it, and rewrite it.
//!
//! The folder only rebuilds the path from a changed leaf to the root; the
//! untouched parts of the type are shared with the input.
//!
//! Run with: cargo run --example basic

use docmodel_types::{Folded, NamedType, SymbolRef, TypeArg, TypeExpr, TypeFolder};
use std::convert::Infallible;
use std::sync::Arc;

/// Specializes `Array<Int>` to `IntArray`.
struct IntArrays;

impl TypeFolder for IntArrays {
    type Error = Infallible;

    fn fold_named(&mut self, named: &Arc<NamedType>) -> Result<Folded<TypeExpr>, Infallible> {
        let int = TypeExpr::simple(SymbolRef::class("kotlin", "Int"));
        if named.reference == SymbolRef::class("kotlin", "Array")
            && matches!(named.args.as_slice(), [TypeArg::Variant(_, element)] if *element == int)
        {
            return Ok(Folded::changed(TypeExpr::simple(SymbolRef::class(
                "kotlin", "IntArray",
            ))));
        }
        self.super_fold_named(named)
    }
}

fn main() {
    println!("=== Basic Type Example ===\n");

    let string = TypeExpr::simple(SymbolRef::class("kotlin", "String"));
    let ints = TypeExpr::named(
        SymbolRef::class("kotlin", "Array"),
        [TypeArg::invariant(TypeExpr::simple(SymbolRef::class("kotlin", "Int")))],
    );
    let map = TypeExpr::named(
        SymbolRef::class("kotlin.collections", "Map"),
        [TypeArg::invariant(string.clone()), TypeArg::covariant(ints)],
    );
    println!("Before: {}", map);
    println!("Flags:  {:?}", map.flags());

    let folded = match IntArrays.fold_ty(&map) {
        Ok(folded) => folded,
        Err(never) => match never {},
    };
    println!("After:  {} (changed: {})", folded.value, folded.changed);

    let key = folded.value.args()[0].ty();
    println!(
        "Key shared with input: {}",
        key.is_some_and(|key| key.ptr_eq(&string))
    );
}
