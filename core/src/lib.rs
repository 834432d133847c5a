//! Declaration model, structural rewrite engine and cycle-safe type
//! flattener for API documentation.
//!
//! The front end builds a forest of [`model::Module`]s, with types produced by
//! a [`flatten::Flattener`]. Rewrite passes ([`rewrite::DeclRewriter`]) then
//! run over the forest in order, and consumers finally resolve cross-links
//! through a [`index::SymbolIndex`].

pub mod errors;
pub mod flatten;
pub mod index;
pub mod model;
pub mod options;
pub mod rewrite;

pub use docmodel_types as types;
pub use errors::{Error, Result};
pub use flatten::{Flattener, SourceArg, SourceType, SourceTypeKind};
pub use index::SymbolIndex;
pub use options::{PassKind, PipelineOptions};
pub use rewrite::{DeclRewriter, Pipeline, Rewritten, apply_pass};

// The forest is shared read-only across threads once built.
static_assertions::assert_impl_all!(model::Module: Send, Sync);
static_assertions::assert_impl_all!(model::ClassLike: Send, Sync);
static_assertions::assert_impl_all!(types::TypeExpr: Send, Sync);
