//! Non-owning symbol references.
//!
//! A `SymbolRef` names a declaration without pointing at it. References are
//! resolved later against a symbol index built once the declaration forest is
//! final, so they stay valid across rewrite passes that rebuild nodes.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Which part of a declaration a reference points at.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SymbolTarget {
    /// The declaration itself.
    #[default]
    Declaration,
    /// The n-th type parameter of the declaration.
    GenericParameter(usize),
    /// The n-th value parameter of a callable.
    CallableParameter(usize),
    /// The extension receiver of a callable.
    CallableReceiver,
}

/// Callable part of a symbol: name plus parameter type names, so overloads
/// get distinct references.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Callable {
    pub name: Arc<str>,
    #[serde(default)]
    pub receiver: Option<Arc<str>>,
    #[serde(default)]
    pub params: Arc<[Arc<str>]>,
}

impl Callable {
    pub fn new(name: &str, params: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            name: Arc::from(name),
            receiver: None,
            params: params
                .into_iter()
                .map(|p| Arc::from(p.as_ref()))
                .collect::<Vec<Arc<str>>>()
                .into(),
        }
    }

    pub fn with_receiver(mut self, receiver: &str) -> Self {
        self.receiver = Some(Arc::from(receiver));
        self
    }
}

/// Opaque identifier of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolRef {
    pub package: Option<Arc<str>>,
    /// Dot-separated nesting path of classes, e.g. `Outer.Inner`.
    pub classes: Option<Arc<str>>,
    pub callable: Option<Callable>,
    #[serde(default)]
    pub target: SymbolTarget,
}

impl SymbolRef {
    /// Reference to a package.
    pub fn package(package: &str) -> Self {
        Self {
            package: Some(Arc::from(package)),
            classes: None,
            callable: None,
            target: SymbolTarget::Declaration,
        }
    }

    /// Reference to a (possibly nested) class-like declaration.
    pub fn class(package: &str, classes: &str) -> Self {
        Self {
            classes: Some(Arc::from(classes)),
            ..Self::package(package)
        }
    }

    /// Reference to the module root. Modules have no package.
    pub fn module(name: &str) -> Self {
        Self {
            package: None,
            classes: Some(Arc::from(name)),
            callable: None,
            target: SymbolTarget::Declaration,
        }
    }

    /// Reference to a member (or top-level callable when `self` is a package).
    pub fn member(&self, callable: Callable) -> Self {
        Self {
            callable: Some(callable),
            target: SymbolTarget::Declaration,
            ..self.clone()
        }
    }

    /// Reference to a nested class of this class.
    pub fn nested(&self, name: &str) -> Self {
        let classes = match &self.classes {
            Some(outer) => {
                let mut path = String::from(outer.as_ref());
                path.push('.');
                path.push_str(name);
                Arc::from(path.as_str())
            }
            None => Arc::from(name),
        };
        Self {
            classes: Some(classes),
            callable: None,
            target: SymbolTarget::Declaration,
            ..self.clone()
        }
    }

    /// Reference to the n-th type parameter of this declaration.
    pub fn generic(&self, index: usize) -> Self {
        self.with_target(SymbolTarget::GenericParameter(index))
    }

    /// Reference to the n-th value parameter of this callable.
    pub fn parameter(&self, index: usize) -> Self {
        self.with_target(SymbolTarget::CallableParameter(index))
    }

    pub fn receiver(&self) -> Self {
        self.with_target(SymbolTarget::CallableReceiver)
    }

    pub fn with_target(&self, target: SymbolTarget) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }

    /// Simple name of the referenced class, if any (`Inner` for `Outer.Inner`).
    pub fn simple_class_name(&self) -> Option<&str> {
        self.classes
            .as_deref()
            .map(|path| path.rsplit('.').next().unwrap_or(path))
    }

    /// Reference with the target reset to the declaration itself.
    pub fn declaration(&self) -> Self {
        self.with_target(SymbolTarget::Declaration)
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/",
            self.package.as_deref().unwrap_or(""),
            self.classes.as_deref().unwrap_or("")
        )?;
        if let Some(callable) = &self.callable {
            if let Some(receiver) = &callable.receiver {
                write!(f, "{}.", receiver)?;
            }
            write!(f, "{}(", callable.name)?;
            for (i, param) in callable.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", param)?;
            }
            write!(f, ")")?;
        }
        match self.target {
            SymbolTarget::Declaration => write!(f, "/"),
            SymbolTarget::GenericParameter(i) => write!(f, "/generic#{}", i),
            SymbolTarget::CallableParameter(i) => write!(f, "/param#{}", i),
            SymbolTarget::CallableReceiver => write!(f, "/receiver"),
        }
    }
}
