use docmodel_types::SymbolRef;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by rewrite passes and pipelines.
///
/// The rewrite engine itself never fails; every error originates in a
/// pass-supplied rewrite and aborts that pass as a whole.
#[derive(Debug, Error)]
pub enum Error {
    /// A rewrite function rejected its input.
    #[error("pass `{pass}` failed{}: {message}", location(.symbol))]
    Rewrite {
        pass: String,
        /// Innermost declaration enclosing the failing type.
        symbol: Option<SymbolRef>,
        message: String,
    },

    /// A pass or the flattener met a type shape it cannot handle.
    #[error("unsupported type `{ty}`{}{}: {reason}", location(.symbol), raised_by(.pass))]
    UnsupportedType {
        /// Empty when raised outside a pass.
        pass: String,
        ty: String,
        symbol: Option<SymbolRef>,
        reason: String,
    },

    /// A type in the final forest could not be resolved and the pipeline was
    /// configured to reject that.
    #[error("unresolved type `{ty}` at {symbol}")]
    Unresolved { symbol: SymbolRef, ty: String },

    #[error("invalid options: {0}")]
    Options(String),
}

fn raised_by(pass: &str) -> String {
    if pass.is_empty() {
        String::new()
    } else {
        format!(" in pass `{}`", pass)
    }
}

fn location(symbol: &Option<SymbolRef>) -> String {
    symbol
        .as_ref()
        .map(|symbol| format!(" at {}", symbol))
        .unwrap_or_default()
}

impl Error {
    /// Error for a rewrite function to return; the engine fills in where.
    pub fn rewrite(message: impl Into<String>) -> Self {
        Error::Rewrite {
            pass: String::new(),
            symbol: None,
            message: message.into(),
        }
    }

    /// Error for a pass that cannot handle the shape of `ty`.
    pub fn unsupported(ty: impl ToString, reason: impl Into<String>) -> Self {
        Error::UnsupportedType {
            pass: String::new(),
            ty: ty.to_string(),
            symbol: None,
            reason: reason.into(),
        }
    }

    /// Attach the enclosing declaration, unless a more specific one is known.
    pub fn within(mut self, enclosing: &SymbolRef) -> Self {
        match &mut self {
            Error::Rewrite { symbol, .. } | Error::UnsupportedType { symbol, .. } => {
                if symbol.is_none() {
                    *symbol = Some(enclosing.clone());
                }
            }
            Error::Unresolved { .. } | Error::Options(_) => {}
        }
        self
    }

    /// Attach the name of the pass that raised this error.
    pub fn in_pass(mut self, name: &str) -> Self {
        match &mut self {
            Error::Rewrite { pass, .. } | Error::UnsupportedType { pass, .. } => {
                if pass.is_empty() {
                    *pass = name.to_string();
                }
            }
            Error::Unresolved { .. } | Error::Options(_) => {}
        }
        self
    }

    /// Symbol of the declaration the error points at, if any.
    pub fn symbol(&self) -> Option<&SymbolRef> {
        match self {
            Error::Rewrite { symbol, .. } | Error::UnsupportedType { symbol, .. } => {
                symbol.as_ref()
            }
            Error::Unresolved { symbol, .. } => Some(symbol),
            Error::Options(_) => None,
        }
    }
}
