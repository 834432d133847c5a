//! Plain-text outline of a declaration forest.
//!
//! One declaration per line, indented by nesting depth, each rendered as a
//! Kotlin-like signature. Parameters and type parameters appear inline in
//! their owner's signature rather than on lines of their own.

use docmodel_core::model::*;
use docmodel_types::{TypeExpr, TypeFormatter, Variance};
use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::Arc;

const INDENT: &str = "  ";

/// Render a forest as an indented outline.
pub fn render(modules: &[Arc<Module>]) -> String {
    let mut renderer = Outline {
        output: String::new(),
        depth: 0,
    };
    walk(modules, &mut renderer);
    renderer.output
}

/// Signature line of a single declaration.
pub fn signature(decl: &Decl) -> String {
    let mut out = String::new();
    if let Some(visibility) = decl.info().effective_visibility() {
        let keyword = visibility.keyword();
        if !keyword.is_empty() && visibility != Visibility::Public {
            out.push_str(keyword);
            out.push(' ');
        }
    }
    match decl {
        Decl::Module(m) => {
            let _ = write!(out, "module {}", m.name());
            if !m.source_sets.is_empty() {
                let ids: Vec<&str> = m.source_sets.iter().map(|s| s.id.as_str()).collect();
                let _ = write!(out, " [{}]", ids.join(", "));
            }
        }
        Decl::Package(p) => {
            let _ = write!(out, "package {}", p.name());
        }
        Decl::ClassLike(c) => {
            let _ = write!(out, "{} {}", c.kind().keyword(), c.name());
            out.push_str(&generics(classlike_generics(c)));
            if let Some(supertypes) = c.supertypes() {
                let names: BTreeSet<String> = supertypes
                    .values()
                    .flatten()
                    .map(|s| s.reference.classes.as_deref().unwrap_or("?").to_string())
                    .collect();
                if !names.is_empty() {
                    let names: Vec<String> = names.into_iter().collect();
                    let _ = write!(out, " : {}", names.join(", "));
                }
            }
        }
        Decl::EnumEntry(e) => out.push_str(e.name()),
        Decl::TypeAlias(t) => {
            let _ = write!(out, "typealias {}{}", t.name(), generics(&t.generics));
            if let Some(underlying) = t.underlying.values().next() {
                let _ = write!(out, " = {}", underlying);
            }
        }
        Decl::Function(f) if f.is_constructor => {
            let _ = write!(out, "constructor({})", parameters(&f.parameters));
        }
        Decl::Function(f) => {
            out.push_str("fun ");
            if !f.generics.is_empty() {
                out.push_str(&generics(&f.generics));
                out.push(' ');
            }
            if let Some(receiver) = &f.receiver {
                let _ = write!(out, "{}.", receiver_type(&receiver.ty));
            }
            let _ = write!(
                out,
                "{}({}): {}",
                f.name(),
                parameters(&f.parameters),
                f.return_type
            );
        }
        Decl::Property(p) => {
            out.push_str(if p.is_mutable { "var " } else { "val " });
            if !p.generics.is_empty() {
                out.push_str(&generics(&p.generics));
                out.push(' ');
            }
            if let Some(receiver) = &p.receiver {
                let _ = write!(out, "{}.", receiver_type(&receiver.ty));
            }
            let _ = write!(out, "{}: {}", p.name(), p.ty);
        }
        Decl::Parameter(p) => {
            let _ = write!(out, "{}: {}", p.name(), p.ty);
        }
        Decl::TypeParam(t) => out.push_str(&type_param(t)),
    }
    out
}

struct Outline {
    output: String,
    depth: usize,
}

impl DeclVisitor for Outline {
    fn visit_decl(&mut self, decl: &Decl) {
        if matches!(decl, Decl::Parameter(_) | Decl::TypeParam(_)) {
            return;
        }
        let _ = writeln!(
            self.output,
            "{}{}",
            INDENT.repeat(self.depth),
            signature(decl)
        );
        // Accessors are part of the property line.
        if matches!(decl, Decl::Function(_) | Decl::Property(_)) {
            return;
        }
        self.depth += 1;
        self.super_visit_decl(decl);
        self.depth -= 1;
    }
}

fn classlike_generics(c: &ClassLike) -> &[Arc<TypeParam>] {
    match c {
        ClassLike::Class(c) => &c.generics,
        ClassLike::Interface(i) => &i.generics,
        ClassLike::Annotation(a) => &a.generics,
        ClassLike::Enum(e) => &e.generics,
        ClassLike::Object(_) => &[],
    }
}

fn generics(params: &[Arc<TypeParam>]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params.iter().map(|t| type_param(t)).collect();
    format!("<{}>", rendered.join(", "))
}

fn type_param(param: &TypeParam) -> String {
    let mut out = String::new();
    match param.variance {
        Variance::Covariant => out.push_str("out "),
        Variance::Contravariant => out.push_str("in "),
        Variance::Invariant => {}
    }
    out.push_str(param.name());
    if !param.bounds.is_empty() {
        let bounds: Vec<String> = param.bounds.iter().map(TypeFormatter::format).collect();
        let _ = write!(out, " : {}", bounds.join(" & "));
    }
    out
}

fn parameters(params: &[Arc<Parameter>]) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|p| format!("{}: {}", p.name(), p.ty))
        .collect();
    rendered.join(", ")
}

/// Function-typed receivers need parentheses: `(() -> Unit).invoke()`.
fn receiver_type(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Function(_) => format!("({})", ty),
        _ => ty.to_string(),
    }
}
