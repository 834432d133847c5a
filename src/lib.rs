//! docmodel - a documentation model for Kotlin-like APIs
//!
//! # Overview
//!
//! A front end turns compiler symbols into an immutable forest of
//! declarations ([`model::Module`] down to [`model::Parameter`]) whose
//! signatures are [`types::TypeExpr`] values. Rewrite passes then run over
//! the forest, each one rebuilding only the nodes it actually changes, and
//! the final forest is indexed by symbol for cross-linking.
//!
//! # Quick Start
//!
//! ```
//! use docmodel::{Pipeline, PipelineOptions, outline};
//!
//! let json = r#"[{
//!     "info": {"name": "app", "symbol": {"classes": "app"}},
//!     "source_sets": [{"id": "jvmMain", "display_name": "jvm", "platform": "jvm"}],
//!     "packages": []
//! }]"#;
//!
//! let modules = docmodel::from_json(json).unwrap();
//! let modules = Pipeline::from_options(&PipelineOptions::default())
//!     .run(&modules)
//!     .unwrap();
//! assert_eq!(outline::render(&modules), "module app [jvmMain]\n");
//! ```

pub mod outline;

pub use docmodel_core::{
    DeclRewriter, Error, Flattener, PassKind, Pipeline, PipelineOptions, Result, Rewritten,
    SourceArg, SourceType, SourceTypeKind, SymbolIndex, apply_pass, errors, flatten, index,
    model, options, rewrite,
};
pub use docmodel_types as types;

use docmodel_core::model::Module;
use std::sync::Arc;

/// Load a serialized module forest.
pub fn from_json(text: &str) -> serde_json::Result<Vec<Arc<Module>>> {
    serde_json::from_str(text)
}

/// Serialize a module forest.
pub fn to_json(modules: &[Arc<Module>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(modules)
}
