//! Example demonstrating ClosureVisitor for counting type variables.
//!
//! This shows how ClosureVisitor can simplify visitor implementations
//! when you don't need custom traversal control.
//!
//! Run with: cargo run --example closure_counter

use docmodel_types::{ClosureVisitor, SymbolRef, TypeArg, TypeExpr, TypeVisitor};

fn count_type_vars(ty: &TypeExpr) -> usize {
    let mut count = 0;
    ClosureVisitor::new(|t: &TypeExpr| {
        if matches!(t, TypeExpr::TypeVar(_)) {
            count += 1;
        }
    })
    .visit_ty(ty);
    count
}

fn main() {
    println!("=== ClosureVisitor Counter Example ===\n");

    let owner = SymbolRef::class("kotlin.collections", "Map");
    let k = TypeExpr::type_var(owner.generic(0), "K");
    let v = TypeExpr::type_var(owner.generic(1), "V");

    // Plain K
    println!("{} contains {} type variable(s)", k, count_type_vars(&k));

    // Map<K, V?> - the visitor looks inside the nullable wrapper
    let map = TypeExpr::named(
        owner.clone(),
        [
            TypeArg::invariant(k.clone()),
            TypeArg::covariant(TypeExpr::nullable(v.clone())),
        ],
    );
    println!("{} contains {} type variable(s)", map, count_type_vars(&map));

    // (K) -> List<V>
    let func = TypeExpr::function(
        SymbolRef::class("kotlin", "Function1"),
        [
            TypeArg::invariant(k),
            TypeArg::invariant(TypeExpr::named(
                SymbolRef::class("kotlin.collections", "List"),
                [TypeArg::covariant(v)],
            )),
        ],
        false,
        false,
    );
    println!("{} contains {} type variable(s)", func, count_type_vars(&func));
}
