use super::{FunctionType, NamedType, TypeArg, TypeExpr, Variance};
use alloc::string::String;
use core::fmt::{self, Write};

/// Formats types the way they read in a Kotlin signature.
///
/// - Named types: `Array<out Int>`, `Map<String, *>`
/// - Function types: `suspend Int.(String) -> Unit`, or their presentable
///   name when one is attached
/// - Wrappers: `T?`, `T & Any`; an alias prints as the alias itself
/// - Markers: `dynamic`, `<ERROR: reason>`, `^2` for a recursive reference
pub struct TypeFormatter {
    output: String,
}

impl TypeFormatter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn format(ty: &TypeExpr) -> String {
        let mut formatter = Self::new();
        formatter.ty(ty);
        formatter.output
    }

    pub fn format_arg(arg: &TypeArg) -> String {
        let mut formatter = Self::new();
        formatter.arg(arg);
        formatter.output
    }

    fn ty(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Named(named) => self.named(named),
            TypeExpr::Function(func) => match &func.presentable_name {
                Some(name) => self.output.push_str(name),
                None => self.function(func),
            },
            TypeExpr::TypeVar(var) => self.output.push_str(&var.name),
            TypeExpr::Nullable(inner) => {
                if matches!(&**inner, TypeExpr::Function(func) if func.presentable_name.is_none()) {
                    self.output.push('(');
                    self.ty(inner);
                    self.output.push(')');
                } else {
                    self.ty(inner);
                }
                self.output.push('?');
            }
            TypeExpr::NonNull(inner) => {
                self.ty(inner);
                self.output.push_str(" & Any");
            }
            TypeExpr::Alias(alias) => self.named(&alias.alias),
            TypeExpr::Unresolved(description) => {
                let _ = write!(self.output, "<ERROR: {}>", description);
            }
            TypeExpr::Dynamic => self.output.push_str("dynamic"),
            TypeExpr::Recursive(depth) => {
                let _ = write!(self.output, "^{}", depth);
            }
        }
    }

    fn function(&mut self, func: &FunctionType) {
        if func.is_suspendable {
            self.output.push_str("suspend ");
        }
        let (receiver, rest) = match func.args.split_first() {
            Some((first, rest)) if func.is_extension => (Some(first), rest),
            _ => (None, func.args.as_slice()),
        };
        let (ret, params) = match rest.split_last() {
            Some((ret, params)) => (Some(ret), params),
            None => (None, rest),
        };
        if let Some(receiver) = receiver {
            self.arg_type(receiver);
            self.output.push('.');
        }
        self.output.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.arg_type(param);
        }
        self.output.push_str(") -> ");
        match ret {
            Some(ret) => self.arg_type(ret),
            None => self.output.push_str("Unit"),
        }
    }

    fn named(&mut self, named: &NamedType) {
        let name = named.reference.classes.as_deref().unwrap_or("<anonymous>");
        self.output.push_str(name);
        if named.args.is_empty() {
            return;
        }
        self.output.push('<');
        for (i, arg) in named.args.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.arg(arg);
        }
        self.output.push('>');
    }

    fn arg(&mut self, arg: &TypeArg) {
        match arg {
            TypeArg::Star => self.output.push('*'),
            TypeArg::Variant(variance, ty) => {
                match variance {
                    Variance::Covariant => self.output.push_str("out "),
                    Variance::Contravariant => self.output.push_str("in "),
                    Variance::Invariant => {}
                }
                self.ty(ty);
            }
        }
    }

    /// Function type positions carry no use-site variance.
    fn arg_type(&mut self, arg: &TypeArg) {
        match arg {
            TypeArg::Star => self.output.push('*'),
            TypeArg::Variant(_, ty) => self.ty(ty),
        }
    }
}

impl Default for TypeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TypeFormatter::format(self))
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TypeFormatter::format_arg(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolRef;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn simple(name: &str) -> TypeExpr {
        TypeExpr::simple(SymbolRef::class("kotlin", name))
    }

    #[test]
    fn test_format_named() {
        let ty = TypeExpr::named(
            SymbolRef::class("kotlin.collections", "Map"),
            [TypeArg::invariant(simple("String")), TypeArg::Star],
        );
        assert_eq!(ty.to_string(), "Map<String, *>");
    }

    #[test]
    fn test_format_variance() {
        let ty = TypeExpr::named(
            SymbolRef::class("kotlin", "Comparator"),
            [TypeArg::contravariant(simple("Int"))],
        );
        assert_eq!(ty.to_string(), "Comparator<in Int>");
        assert_eq!(TypeArg::covariant(simple("Int")).to_string(), "out Int");
    }

    #[test]
    fn test_format_function() {
        let ty = TypeExpr::function(
            SymbolRef::class("kotlin.coroutines", "SuspendFunction2"),
            [
                TypeArg::invariant(simple("Int")),
                TypeArg::invariant(simple("String")),
                TypeArg::invariant(simple("Unit")),
            ],
            true,
            true,
        );
        assert_eq!(ty.to_string(), "suspend Int.(String) -> Unit");
    }

    #[test]
    fn test_format_nullable_function() {
        let func = TypeExpr::function(
            SymbolRef::class("kotlin", "Function0"),
            [TypeArg::invariant(simple("Unit"))],
            false,
            false,
        );
        assert_eq!(TypeExpr::nullable(func).to_string(), "(() -> Unit)?");
    }

    #[test]
    fn test_format_presentable_function() {
        let action = TypeExpr::function(
            SymbolRef::class("kotlin", "Function0"),
            [TypeArg::invariant(simple("Unit"))],
            false,
            false,
        )
        .with_presentable_name("Action");
        assert_eq!(action.to_string(), "Action");
        assert_eq!(TypeExpr::nullable(action).to_string(), "Action?");
        assert_eq!(simple("Int").with_presentable_name("Ignored").to_string(), "Int");
    }

    #[test]
    fn test_format_markers() {
        let owner = SymbolRef::class("p", "Box").generic(0);
        assert_eq!(TypeExpr::non_null(TypeExpr::type_var(owner, "T")).to_string(), "T & Any");
        assert_eq!(TypeExpr::Dynamic.to_string(), "dynamic");
        assert_eq!(TypeExpr::unresolved("Foo").to_string(), "<ERROR: Foo>");
        assert_eq!(TypeExpr::Recursive(2).to_string(), "^2");
    }

    #[test]
    fn test_format_alias_shows_alias() {
        let alias = NamedType {
            reference: SymbolRef::class("p", "UserId"),
            args: Vec::new(),
        };
        assert_eq!(TypeExpr::alias(alias, simple("Long")).to_string(), "UserId");
    }
}
