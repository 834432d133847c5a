//! Structural rewrite engine.
//!
//! A pass is a [`DeclRewriter`]: a [`TypeFolder`] plus one hook per
//! declaration kind. The default hooks walk every child collection, rebuild a
//! node only when one of its children or its own types changed, and hand back
//! the original `Arc` otherwise. Callers can rely on `Arc::ptr_eq` to detect
//! untouched subtrees.

mod pass;
mod pipeline;
mod primitive_arrays;
mod rebuild;


pub use pass::{TypeRewritePass, everywhere};
pub use pipeline::Pipeline;
pub use primitive_arrays::PrimitiveArrayPass;

use crate::errors::{Error, Result};
use crate::model::*;
use docmodel_types::{Folded, SymbolRef, TypeFolder, fold_list};
use rebuild::{Rebuild, fold_dependent, fold_opt};
use std::sync::Arc;
use tracing::debug;

/// A rewritten node paired with whether anything below it changed.
pub type Rewritten<T> = Folded<T>;

/// A rewrite pass over a declaration forest.
///
/// Override the `rewrite_*` hooks (or the inherited `fold_*` type hooks) and
/// call the matching `super_rewrite_*` to keep the generic traversal.
/// Failures abort the pass; nothing is applied partially.
pub trait DeclRewriter: TypeFolder<Error = Error> {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Modules rejected here are returned as-is without being traversed.
    fn applies_to(&self, _module: &Module) -> bool {
        true
    }

    fn rewrite_module(&mut self, module: &Arc<Module>) -> Result<Rewritten<Arc<Module>>> {
        self.super_rewrite_module(module)
    }

    fn super_rewrite_module(&mut self, module: &Arc<Module>) -> Result<Rewritten<Arc<Module>>> {
        let packages = fold_list(&module.packages, |p| {
            self.rewrite_package(p).map_err(within(p.symbol()))
        })?;
        Ok(Rebuild::new(module)
            .set(packages, Module::with_packages)
            .finish())
    }

    fn rewrite_package(&mut self, package: &Arc<Package>) -> Result<Rewritten<Arc<Package>>> {
        self.super_rewrite_package(package)
    }

    fn super_rewrite_package(
        &mut self,
        package: &Arc<Package>,
    ) -> Result<Rewritten<Arc<Package>>> {
        let classlikes = fold_list(&package.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        let typealiases = fold_list(&package.typealiases, |t| {
            self.rewrite_typealias(t).map_err(within(t.symbol()))
        })?;
        let functions = fold_list(&package.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&package.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        Ok(Rebuild::new(package)
            .set(classlikes, Package::with_classlikes)
            .set(typealiases, Package::with_typealiases)
            .set(functions, Package::with_functions)
            .set(properties, Package::with_properties)
            .finish())
    }

    fn rewrite_classlike(&mut self, classlike: &ClassLike) -> Result<Rewritten<ClassLike>> {
        self.super_rewrite_classlike(classlike)
    }

    /// Dispatch on the class-like variant. The variant never changes.
    fn super_rewrite_classlike(&mut self, classlike: &ClassLike) -> Result<Rewritten<ClassLike>> {
        Ok(match classlike {
            ClassLike::Class(c) => self.rewrite_class(c)?.map(ClassLike::Class),
            ClassLike::Interface(i) => self.rewrite_interface(i)?.map(ClassLike::Interface),
            ClassLike::Object(o) => self.rewrite_object(o)?.map(ClassLike::Object),
            ClassLike::Annotation(a) => self.rewrite_annotation(a)?.map(ClassLike::Annotation),
            ClassLike::Enum(e) => self.rewrite_enum(e)?.map(ClassLike::Enum),
        })
    }

    fn rewrite_class(&mut self, class: &Arc<Class>) -> Result<Rewritten<Arc<Class>>> {
        self.super_rewrite_class(class)
    }

    fn super_rewrite_class(&mut self, class: &Arc<Class>) -> Result<Rewritten<Arc<Class>>> {
        let constructors = fold_list(&class.constructors, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let generics = fold_list(&class.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        let functions = fold_list(&class.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&class.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        let classlikes = fold_list(&class.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        let companion = fold_opt(&class.companion, |o| {
            self.rewrite_object(o).map_err(within(o.symbol()))
        })?;
        Ok(Rebuild::new(class)
            .set(constructors, Class::with_constructors)
            .set(generics, Class::with_generics)
            .set(functions, Class::with_functions)
            .set(properties, Class::with_properties)
            .set(classlikes, Class::with_classlikes)
            .set(companion, Class::with_companion)
            .finish())
    }

    fn rewrite_interface(
        &mut self,
        interface: &Arc<Interface>,
    ) -> Result<Rewritten<Arc<Interface>>> {
        self.super_rewrite_interface(interface)
    }

    fn super_rewrite_interface(
        &mut self,
        interface: &Arc<Interface>,
    ) -> Result<Rewritten<Arc<Interface>>> {
        let generics = fold_list(&interface.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        let functions = fold_list(&interface.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&interface.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        let classlikes = fold_list(&interface.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        let companion = fold_opt(&interface.companion, |o| {
            self.rewrite_object(o).map_err(within(o.symbol()))
        })?;
        Ok(Rebuild::new(interface)
            .set(generics, Interface::with_generics)
            .set(functions, Interface::with_functions)
            .set(properties, Interface::with_properties)
            .set(classlikes, Interface::with_classlikes)
            .set(companion, Interface::with_companion)
            .finish())
    }

    fn rewrite_object(&mut self, object: &Arc<ObjectDecl>) -> Result<Rewritten<Arc<ObjectDecl>>> {
        self.super_rewrite_object(object)
    }

    fn super_rewrite_object(
        &mut self,
        object: &Arc<ObjectDecl>,
    ) -> Result<Rewritten<Arc<ObjectDecl>>> {
        let functions = fold_list(&object.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&object.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        let classlikes = fold_list(&object.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        Ok(Rebuild::new(object)
            .set(functions, ObjectDecl::with_functions)
            .set(properties, ObjectDecl::with_properties)
            .set(classlikes, ObjectDecl::with_classlikes)
            .finish())
    }

    fn rewrite_annotation(
        &mut self,
        annotation: &Arc<Annotation>,
    ) -> Result<Rewritten<Arc<Annotation>>> {
        self.super_rewrite_annotation(annotation)
    }

    fn super_rewrite_annotation(
        &mut self,
        annotation: &Arc<Annotation>,
    ) -> Result<Rewritten<Arc<Annotation>>> {
        let constructors = fold_list(&annotation.constructors, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let generics = fold_list(&annotation.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        let functions = fold_list(&annotation.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&annotation.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        let classlikes = fold_list(&annotation.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        let companion = fold_opt(&annotation.companion, |o| {
            self.rewrite_object(o).map_err(within(o.symbol()))
        })?;
        Ok(Rebuild::new(annotation)
            .set(constructors, Annotation::with_constructors)
            .set(generics, Annotation::with_generics)
            .set(functions, Annotation::with_functions)
            .set(properties, Annotation::with_properties)
            .set(classlikes, Annotation::with_classlikes)
            .set(companion, Annotation::with_companion)
            .finish())
    }

    fn rewrite_enum(&mut self, e: &Arc<Enum>) -> Result<Rewritten<Arc<Enum>>> {
        self.super_rewrite_enum(e)
    }

    fn super_rewrite_enum(&mut self, e: &Arc<Enum>) -> Result<Rewritten<Arc<Enum>>> {
        let entries = fold_list(&e.entries, |entry| {
            self.rewrite_enum_entry(entry).map_err(within(entry.symbol()))
        })?;
        let constructors = fold_list(&e.constructors, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let generics = fold_list(&e.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        let functions = fold_list(&e.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&e.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        let classlikes = fold_list(&e.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        let companion = fold_opt(&e.companion, |o| {
            self.rewrite_object(o).map_err(within(o.symbol()))
        })?;
        Ok(Rebuild::new(e)
            .set(entries, Enum::with_entries)
            .set(constructors, Enum::with_constructors)
            .set(generics, Enum::with_generics)
            .set(functions, Enum::with_functions)
            .set(properties, Enum::with_properties)
            .set(classlikes, Enum::with_classlikes)
            .set(companion, Enum::with_companion)
            .finish())
    }

    fn rewrite_enum_entry(&mut self, entry: &Arc<EnumEntry>) -> Result<Rewritten<Arc<EnumEntry>>> {
        self.super_rewrite_enum_entry(entry)
    }

    fn super_rewrite_enum_entry(
        &mut self,
        entry: &Arc<EnumEntry>,
    ) -> Result<Rewritten<Arc<EnumEntry>>> {
        let functions = fold_list(&entry.functions, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let properties = fold_list(&entry.properties, |p| {
            self.rewrite_property(p).map_err(within(p.symbol()))
        })?;
        let classlikes = fold_list(&entry.classlikes, |c| {
            self.rewrite_classlike(c).map_err(within(c.symbol()))
        })?;
        Ok(Rebuild::new(entry)
            .set(functions, EnumEntry::with_functions)
            .set(properties, EnumEntry::with_properties)
            .set(classlikes, EnumEntry::with_classlikes)
            .finish())
    }

    fn rewrite_typealias(&mut self, alias: &Arc<TypeAlias>) -> Result<Rewritten<Arc<TypeAlias>>> {
        self.super_rewrite_typealias(alias)
    }

    fn super_rewrite_typealias(
        &mut self,
        alias: &Arc<TypeAlias>,
    ) -> Result<Rewritten<Arc<TypeAlias>>> {
        let generics = fold_list(&alias.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        let ty = self
            .fold_ty(&alias.ty)
            .map_err(within(alias.symbol()))?
            .into_changed();
        let underlying = fold_dependent(&alias.underlying, |t| self.fold_ty(t))
            .map_err(within(alias.symbol()))?;
        Ok(Rebuild::new(alias)
            .set(generics, TypeAlias::with_generics)
            .set(ty, TypeAlias::with_ty)
            .set(underlying, TypeAlias::with_underlying)
            .finish())
    }

    fn rewrite_function(&mut self, function: &Arc<Function>) -> Result<Rewritten<Arc<Function>>> {
        self.super_rewrite_function(function)
    }

    fn super_rewrite_function(
        &mut self,
        function: &Arc<Function>,
    ) -> Result<Rewritten<Arc<Function>>> {
        let parameters = fold_list(&function.parameters, |p| {
            self.rewrite_parameter(p).map_err(within(p.symbol()))
        })?;
        let receiver = fold_opt(&function.receiver, |p| {
            self.rewrite_parameter(p).map_err(within(p.symbol()))
        })?;
        let return_type = self
            .fold_ty(&function.return_type)
            .map_err(within(function.symbol()))?
            .into_changed();
        let generics = fold_list(&function.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        Ok(Rebuild::new(function)
            .set(parameters, Function::with_parameters)
            .set(receiver, Function::with_receiver)
            .set(return_type, Function::with_return_type)
            .set(generics, Function::with_generics)
            .finish())
    }

    fn rewrite_property(&mut self, property: &Arc<Property>) -> Result<Rewritten<Arc<Property>>> {
        self.super_rewrite_property(property)
    }

    fn super_rewrite_property(
        &mut self,
        property: &Arc<Property>,
    ) -> Result<Rewritten<Arc<Property>>> {
        let ty = self
            .fold_ty(&property.ty)
            .map_err(within(property.symbol()))?
            .into_changed();
        let receiver = fold_opt(&property.receiver, |p| {
            self.rewrite_parameter(p).map_err(within(p.symbol()))
        })?;
        let getter = fold_opt(&property.getter, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let setter = fold_opt(&property.setter, |f| {
            self.rewrite_function(f).map_err(within(f.symbol()))
        })?;
        let generics = fold_list(&property.generics, |t| {
            self.rewrite_type_param(t).map_err(within(t.symbol()))
        })?;
        Ok(Rebuild::new(property)
            .set(ty, Property::with_ty)
            .set(receiver, Property::with_receiver)
            .set(getter, Property::with_getter)
            .set(setter, Property::with_setter)
            .set(generics, Property::with_generics)
            .finish())
    }

    fn rewrite_parameter(
        &mut self,
        parameter: &Arc<Parameter>,
    ) -> Result<Rewritten<Arc<Parameter>>> {
        self.super_rewrite_parameter(parameter)
    }

    fn super_rewrite_parameter(
        &mut self,
        parameter: &Arc<Parameter>,
    ) -> Result<Rewritten<Arc<Parameter>>> {
        let ty = self
            .fold_ty(&parameter.ty)
            .map_err(within(parameter.symbol()))?
            .into_changed();
        Ok(Rebuild::new(parameter).set(ty, Parameter::with_ty).finish())
    }

    fn rewrite_type_param(&mut self, param: &Arc<TypeParam>) -> Result<Rewritten<Arc<TypeParam>>> {
        self.super_rewrite_type_param(param)
    }

    fn super_rewrite_type_param(
        &mut self,
        param: &Arc<TypeParam>,
    ) -> Result<Rewritten<Arc<TypeParam>>> {
        let bounds = fold_list(&param.bounds, |b| self.fold_ty(b))
            .map_err(within(param.symbol()))?;
        Ok(Rebuild::new(param)
            .set(bounds, TypeParam::with_bounds)
            .finish())
    }
}

/// Tag an error with `symbol` unless it already names a declaration.
fn within(symbol: &SymbolRef) -> impl FnOnce(Error) -> Error + '_ {
    move |e| e.within(symbol)
}

/// Run one pass over a module forest.
///
/// Modules the pass does not apply to, and modules it leaves untouched, are
/// returned as the same `Arc`. The first error aborts the whole pass.
pub fn apply_pass<P: DeclRewriter + ?Sized>(
    modules: &[Arc<Module>],
    pass: &mut P,
) -> Result<Vec<Arc<Module>>> {
    let mut out = Vec::with_capacity(modules.len());
    let mut changed = 0usize;
    for module in modules {
        if !pass.applies_to(module) {
            debug!(
                pass = pass.name(),
                module = module.name(),
                "Pass does not apply, skipping"
            );
            out.push(module.clone());
            continue;
        }
        let rewritten = pass
            .rewrite_module(module)
            .map_err(|e| e.within(module.symbol()).in_pass(pass.name()))?;
        if rewritten.changed {
            changed += 1;
        }
        out.push(rewritten.value);
    }
    debug!(
        pass = pass.name(),
        changed,
        total = modules.len(),
        "Pass finished"
    );
    Ok(out)
}
