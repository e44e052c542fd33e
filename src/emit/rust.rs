//! Rust back-end.
//!
//! The root becomes an enum with one tuple variant per grammar variant, each holding
//! a boxed struct of the same name. The root stays a tag plus a pointer, so fields may
//! hold it directly, in an `Option` or in a `Vec`. Fields that hold a variant struct
//! are boxed as well. A field declared as exactly a variant type still takes that
//! type by value in `new`.

use crate::emit::{Backend, CodeWriter, GeneratorOptions, Operation, TypeScope, VisitorContract};
use crate::grammar::naming::{map_type_names, rust_ident, to_snake_case};
use crate::grammar::{FieldDescriptor, GrammarModel, VariantDescriptor};

pub struct RustBackend;

fn derive_attr(out: &mut CodeWriter, options: &GeneratorOptions) {
    if !options.derives.is_empty() {
        out.line(format!("#[derive({})]", options.derives.join(", ")));
    }
}

fn visitor_param(contract: &VisitorContract) -> String {
    format!("visitor: &mut dyn {}<R>", contract.visitor_name())
}

fn storage_type(scope: &TypeScope, field: &FieldDescriptor) -> String {
    map_type_names(field.type_name(), |name| {
        scope.is_variant(name).then(|| format!("Box<{name}>"))
    })
}

/// Parameter type in `new`: the declared type, unless a variant sits inside it.
fn param_type(scope: &TypeScope, field: &FieldDescriptor) -> String {
    if scope.is_variant(field.type_name()) {
        field.type_name().to_string()
    } else {
        storage_type(scope, field)
    }
}

impl Backend for RustBackend {
    fn prologue(&self, out: &mut CodeWriter, _model: &GrammarModel, options: &GeneratorOptions) {
        if options.imports.is_empty() {
            return;
        }
        out.blank();
        for import in &options.imports {
            out.line(format!("use {import};"));
        }
    }

    fn base_type(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        contract: &VisitorContract,
        options: &GeneratorOptions,
    ) {
        let root = model.root_name();

        out.blank();
        out.line(format!(
            "/// Any `{root}` node. Dispatch with [`{root}::accept`]."
        ));
        derive_attr(out, options);
        out.line(format!("pub enum {root} {{"));
        out.indent();
        for variant in model.variants() {
            let name = variant.variant_name();
            out.line(format!("{name}(Box<{name}>),"));
        }
        out.dedent();
        out.line("}");

        out.blank();
        out.line(format!("impl {root} {{"));
        out.indent();
        out.line(format!(
            "pub fn accept<R>(&self, {}) -> R {{",
            visitor_param(contract)
        ));
        out.indent();
        out.line("match self {");
        out.indent();
        for variant in model.variants() {
            out.line(format!(
                "{root}::{}(node) => node.accept(visitor),",
                variant.variant_name()
            ));
        }
        out.dedent();
        out.line("}");
        out.dedent();
        out.line("}");
        out.dedent();
        out.line("}");
    }

    fn visitor_declaration(&self, out: &mut CodeWriter, contract: &VisitorContract) {
        let param = rust_ident(&to_snake_case(contract.root_name()));

        out.blank();
        out.line(format!(
            "/// One operation per `{}` variant.",
            contract.root_name()
        ));
        out.line(format!("pub trait {}<R> {{", contract.visitor_name()));
        out.indent();
        for operation in contract.operations() {
            out.line(format!(
                "fn {}(&mut self, {param}: &{}) -> R;",
                to_snake_case(operation.name()),
                operation.variant()
            ));
        }
        out.dedent();
        out.line("}");
    }

    fn open_variant(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        variant: &VariantDescriptor,
        options: &GeneratorOptions,
    ) {
        let scope = TypeScope::new(model, options);
        let name = variant.variant_name();
        let fields = variant.fields();

        out.blank();
        derive_attr(out, options);
        if fields.is_empty() {
            out.line(format!("pub struct {name} {{}}"));
        } else {
            out.line(format!("pub struct {name} {{"));
            out.indent();
            for field in fields {
                out.line(format!(
                    "pub {}: {},",
                    rust_ident(field.field_name()),
                    storage_type(&scope, field)
                ));
            }
            out.dedent();
            out.line("}");
        }

        out.blank();
        out.line(format!("impl {name} {{"));
        out.indent();

        let params = fields
            .iter()
            .map(|f| format!("{}: {}", rust_ident(f.field_name()), param_type(&scope, f)))
            .collect::<Vec<_>>()
            .join(", ");
        out.line(format!("pub fn new({params}) -> Self {{"));
        out.indent();
        if fields.is_empty() {
            out.line("Self {}");
        } else {
            out.line("Self {");
            out.indent();
            for field in fields {
                let ident = rust_ident(field.field_name());
                if scope.is_variant(field.type_name()) {
                    out.line(format!("{ident}: Box::new({ident}),"));
                } else {
                    out.line(format!("{ident},"));
                }
            }
            out.dedent();
            out.line("}");
        }
        out.dedent();
        out.line("}");
    }

    fn dispatch(&self, out: &mut CodeWriter, contract: &VisitorContract, operation: &Operation) {
        out.blank();
        out.line(format!(
            "pub fn accept<R>(&self, {}) -> R {{",
            visitor_param(contract)
        ));
        out.indent();
        out.line(format!("visitor.{}(self)", to_snake_case(operation.name())));
        out.dedent();
        out.line("}");
    }

    fn close_variant(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        variant: &VariantDescriptor,
        _options: &GeneratorOptions,
    ) {
        let root = model.root_name();
        let name = variant.variant_name();

        out.dedent();
        out.line("}");

        out.blank();
        out.line(format!("impl From<{name}> for {root} {{"));
        out.indent();
        out.line(format!("fn from(node: {name}) -> Self {{"));
        out.indent();
        out.line(format!("{root}::{name}(Box::new(node))"));
        out.dedent();
        out.line("}");
        out.dedent();
        out.line("}");
    }

    fn epilogue(&self, _out: &mut CodeWriter, _model: &GrammarModel) {}
}
