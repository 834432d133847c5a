//! Conversion of compiler types into [`TypeExpr`].
//!
//! Compiler type graphs may be cyclic: a type parameter can be bounded by a
//! type that mentions it (`T : Comparable<T>`), and arena-based front ends can
//! hand out class types whose arguments point back at themselves. The
//! flattener keeps the types on the current descent path in a stack and
//! closes any cycle with [`TypeExpr::Recursive`] instead of descending again.


use crate::errors::{Error, Result};
use crate::model::{DeclInfo, TypeParam};
use docmodel_types::{NamedType, SymbolRef, TypeArg, TypeExpr, Variance};
use smallvec::SmallVec;
use tracing::trace;

/// A compiler-level type as seen by the flattener.
///
/// `PartialEq` must be shallow: identity, or equality of interned
/// constructor plus arguments. It must never flatten or recurse.
pub trait SourceType: Clone + PartialEq {
    fn view(&self) -> SourceTypeKind<Self>;

    /// Whether this occurrence carries a `?`.
    fn is_marked_nullable(&self) -> bool;

    /// Short description for logs and error messages.
    fn describe(&self) -> String;
}

/// One level of a compiler type.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceTypeKind<T> {
    Class {
        reference: SymbolRef,
        args: Vec<SourceArg<T>>,
    },
    Function {
        reference: SymbolRef,
        args: Vec<SourceArg<T>>,
        is_extension: bool,
        is_suspendable: bool,
    },
    TypeParameter {
        owner: SymbolRef,
        name: String,
        bounds: Vec<T>,
    },
    Alias {
        reference: SymbolRef,
        args: Vec<SourceArg<T>>,
        expanded: T,
    },
    DefinitelyNonNull(T),
    Dynamic,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceArg<T> {
    Star,
    Projection(Variance, T),
}

/// Flattens compiler types, truncating cycles along the descent path.
///
/// Only the current path is tracked, so a type reused by two siblings is
/// flattened in full both times.
#[derive(Debug)]
pub struct Flattener<T> {
    trace: SmallVec<[T; 8]>,
    cycles: usize,
}

impl<T: SourceType> Default for Flattener<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SourceType> Flattener<T> {
    pub fn new() -> Self {
        Self {
            trace: SmallVec::new(),
            cycles: 0,
        }
    }

    /// Number of cycles closed so far.
    pub fn cycles_closed(&self) -> usize {
        self.cycles
    }

    pub fn flatten(&mut self, ty: &T) -> TypeExpr {
        if let Some(pos) = self.trace.iter().rposition(|seen| seen == ty) {
            let depth = (self.trace.len() - pos) as u32;
            self.cycles += 1;
            trace!(depth, ty = %ty.describe(), "Closed type cycle");
            return TypeExpr::Recursive(depth);
        }

        let kind = ty.view();
        if let SourceTypeKind::Error(description) = &kind {
            return TypeExpr::unresolved(description);
        }

        self.trace.push(ty.clone());
        let flat = self.flatten_kind(kind);
        self.trace.pop();

        if ty.is_marked_nullable() {
            TypeExpr::nullable(flat)
        } else {
            flat
        }
    }

    /// Flatten a type parameter declaration.
    ///
    /// The parameter stays on the trace while its bounds are flattened, so a
    /// bound mentioning the parameter closes into a recursive reference:
    /// `T : Comparable<T>` becomes `Comparable<^2>`.
    pub fn type_param(
        &mut self,
        param: &T,
        info: DeclInfo,
        variance: Variance,
    ) -> Result<TypeParam> {
        let SourceTypeKind::TypeParameter { bounds, .. } = param.view() else {
            return Err(Error::UnsupportedType {
                pass: String::new(),
                ty: param.describe(),
                symbol: Some(info.symbol.clone()),
                reason: "not a type parameter".to_string(),
            });
        };
        self.trace.push(param.clone());
        let bounds = bounds.iter().map(|bound| self.flatten(bound)).collect();
        self.trace.pop();
        Ok(TypeParam {
            info,
            variance,
            bounds,
        })
    }

    fn flatten_kind(&mut self, kind: SourceTypeKind<T>) -> TypeExpr {
        match kind {
            SourceTypeKind::Class { reference, args } => {
                TypeExpr::named(reference, self.flatten_args(&args))
            }
            SourceTypeKind::Function {
                reference,
                args,
                is_extension,
                is_suspendable,
            } => TypeExpr::function(
                reference,
                self.flatten_args(&args),
                is_extension,
                is_suspendable,
            ),
            // An occurrence off the trace is a plain reference; its bounds
            // belong to the declaration.
            SourceTypeKind::TypeParameter { owner, name, .. } => TypeExpr::type_var(owner, &name),
            SourceTypeKind::Alias {
                reference,
                args,
                expanded,
            } => {
                let alias = NamedType {
                    reference,
                    args: self.flatten_args(&args),
                };
                TypeExpr::alias(alias, self.flatten(&expanded))
            }
            SourceTypeKind::DefinitelyNonNull(inner) => TypeExpr::non_null(self.flatten(&inner)),
            SourceTypeKind::Dynamic => TypeExpr::Dynamic,
            SourceTypeKind::Error(description) => TypeExpr::unresolved(&description),
        }
    }

    fn flatten_args(&mut self, args: &[SourceArg<T>]) -> Vec<TypeArg> {
        args.iter()
            .map(|arg| match arg {
                SourceArg::Star => TypeArg::Star,
                SourceArg::Projection(variance, ty) => {
                    TypeArg::Variant(*variance, self.flatten(ty))
                }
            })
            .collect()
    }
}
