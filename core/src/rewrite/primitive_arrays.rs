use super::{DeclRewriter, Rewritten};
use crate::errors::Error;
use crate::model::{Module, Platform};
use docmodel_types::{Folded, NamedType, SymbolRef, TypeArg, TypeExpr, TypeFolder};
use hashbrown::HashMap;
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing::trace;

const PRIMITIVES: [&str; 8] = [
    "Boolean", "Byte", "Char", "Short", "Int", "Long", "Float", "Double",
];

lazy_static! {
    static ref ARRAY: SymbolRef = SymbolRef::class("kotlin", "Array");

    // kotlin/Int -> kotlin/IntArray, and so on.
    static ref PRIMITIVE_ARRAYS: HashMap<SymbolRef, SymbolRef> = PRIMITIVES
        .iter()
        .map(|name| {
            (
                SymbolRef::class("kotlin", name),
                SymbolRef::class("kotlin", &format!("{name}Array")),
            )
        })
        .collect();
}

/// Rewrites `Array<P>` to the specialized `PArray` for the eight Kotlin
/// primitives, on modules analysed for the JVM.
///
/// Only a plain primitive element matches: `Array<Int?>` stays boxed.
#[derive(Debug, Default)]
pub struct PrimitiveArrayPass {
    replaced: usize,
}

impl PrimitiveArrayPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of array types replaced so far.
    pub fn replaced(&self) -> usize {
        self.replaced
    }
}

fn specialized_array(named: &NamedType) -> Option<&'static SymbolRef> {
    if named.reference != *ARRAY {
        return None;
    }
    match named.args.as_slice() {
        [TypeArg::Variant(_, TypeExpr::Named(element))] if element.args.is_empty() => {
            PRIMITIVE_ARRAYS.get(&element.reference)
        }
        _ => None,
    }
}

impl TypeFolder for PrimitiveArrayPass {
    type Error = Error;

    fn fold_named(&mut self, named: &Arc<NamedType>) -> Result<Rewritten<TypeExpr>, Error> {
        if let Some(target) = specialized_array(named) {
            self.replaced += 1;
            trace!(to = %target, "Specialized primitive array");
            return Ok(Folded::changed(TypeExpr::simple(target.clone())));
        }
        self.super_fold_named(named)
    }
}

impl DeclRewriter for PrimitiveArrayPass {
    fn name(&self) -> &str {
        "primitive-arrays"
    }

    fn applies_to(&self, module: &Module) -> bool {
        module.targets(Platform::Jvm)
    }
}
