//! C++ back-end: a header with a templated abstract base, a visitor class and one
//! `final` class per variant. Every node type a field mentions, from this tree or a
//! sibling tree, is owned through `std::unique_ptr`, including inside containers.

use crate::emit::{Backend, CodeWriter, GeneratorOptions, Operation, TypeScope, VisitorContract};
use crate::grammar::naming::{cpp_ident, map_type_names, to_snake_case};
use crate::grammar::{FieldDescriptor, GrammarModel, VariantDescriptor};

pub struct CppBackend;

// Extra indent for constructor initializer lists.
const INIT_INDENT: &str = "    ";

fn include_guard(model: &GrammarModel) -> String {
    format!("{}_H", to_snake_case(model.root_name()).to_uppercase())
}

/// `<...>` includes are kept as written, anything else becomes a quoted include.
fn include_path(import: &str) -> String {
    if import.starts_with('<') || import.starts_with('"') {
        import.to_string()
    } else {
        format!("\"{import}\"")
    }
}

fn template_line(out: &mut CodeWriter) {
    out.line("template <typename R>");
}

fn forward_declaration(out: &mut CodeWriter, name: &str) {
    out.blank();
    template_line(out);
    out.line(format!("class {name};"));
}

/// Type of the stored member and of the constructor parameter.
fn owned_type(scope: &TypeScope, field: &FieldDescriptor) -> String {
    map_type_names(field.type_name(), |name| {
        scope
            .is_node(name)
            .then(|| format!("std::unique_ptr<{name}<R>>"))
    })
}

fn member_name(field: &FieldDescriptor) -> String {
    format!("m_{}", field.field_name())
}

fn deleted_copies(out: &mut CodeWriter, name: &str) {
    out.line(format!("{name}(const {name}&) = delete;"));
    out.line(format!("{name}& operator=(const {name}&) = delete;"));
}

impl Backend for CppBackend {
    fn prologue(&self, out: &mut CodeWriter, model: &GrammarModel, options: &GeneratorOptions) {
        let guard = include_guard(model);
        out.line(format!("#ifndef {guard}"));
        out.line(format!("#define {guard}"));

        out.blank();
        out.line("#include <memory>");
        out.line("#include <utility>");
        for import in &options.imports {
            out.line(format!("#include {}", include_path(import)));
        }

        let external = TypeScope::new(model, options).external_references();
        for (sibling, _) in &external {
            out.line(format!("#include \"{sibling}.h\""));
        }
        for name in external.iter().flat_map(|(_, names)| names) {
            forward_declaration(out, name);
        }

        forward_declaration(out, &format!("{}Visitor", model.root_name()));
        for variant in model.variants() {
            forward_declaration(out, variant.variant_name());
        }
    }

    fn base_type(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        contract: &VisitorContract,
        _options: &GeneratorOptions,
    ) {
        let root = model.root_name();

        out.blank();
        template_line(out);
        out.line(format!("class {root} {{"));
        out.line("  public:");
        out.indent();
        out.line(format!("{root}() = default;"));
        deleted_copies(out, root);
        out.line(format!("virtual ~{root}() = default;"));
        out.blank();
        out.line(format!(
            "virtual R accept({}<R>& visitor) const = 0;",
            contract.visitor_name()
        ));
        out.dedent();
        out.line("};");
    }

    fn visitor_declaration(&self, out: &mut CodeWriter, contract: &VisitorContract) {
        let visitor = contract.visitor_name();
        let param = cpp_ident(&to_snake_case(contract.root_name()));

        out.blank();
        template_line(out);
        out.line(format!("class {visitor} {{"));
        out.line("  public:");
        out.indent();
        out.line(format!("virtual ~{visitor}() = default;"));
        out.blank();
        for operation in contract.operations() {
            out.line(format!(
                "virtual R {}(const {}<R>& {param}) = 0;",
                operation.name(),
                operation.variant()
            ));
        }
        out.dedent();
        out.line("};");
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
        template_line(out);
        out.line(format!(
            "class {name} final : public {}<R> {{",
            model.root_name()
        ));
        out.line("  public:");
        out.indent();

        if fields.is_empty() {
            out.line(format!("{name}() = default;"));
        } else {
            let params = fields
                .iter()
                .map(|f| format!("{} {}", owned_type(&scope, f), cpp_ident(f.field_name())))
                .collect::<Vec<_>>()
                .join(", ");
            let inits = fields
                .iter()
                .map(|f| format!("{}{{std::move({})}}", member_name(f), cpp_ident(f.field_name())))
                .collect::<Vec<_>>()
                .join(", ");
            let explicit = if fields.len() == 1 { "explicit " } else { "" };
            out.line(format!("{explicit}{name}({params})"));
            out.line(format!("{INIT_INDENT}: {inits} {{}}"));
        }
        out.blank();
        deleted_copies(out, name);
    }

    fn dispatch(&self, out: &mut CodeWriter, contract: &VisitorContract, operation: &Operation) {
        out.blank();
        out.line(format!(
            "R accept({}<R>& visitor) const override {{",
            contract.visitor_name()
        ));
        out.indent();
        out.line(format!("return visitor.{}(*this);", operation.name()));
        out.dedent();
        out.line("}");
    }

    fn close_variant(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        variant: &VariantDescriptor,
        options: &GeneratorOptions,
    ) {
        let scope = TypeScope::new(model, options);
        let fields = variant.fields();

        for field in fields {
            let accessor = cpp_ident(field.field_name());
            out.blank();
            if scope.is_node(field.type_name()) {
                out.line(format!(
                    "const {}<R>& {accessor}() const {{",
                    field.type_name()
                ));
                out.indent();
                out.line(format!("return *{};", member_name(field)));
            } else {
                out.line(format!("const {}& {accessor}() const {{", owned_type(&scope, field)));
                out.indent();
                out.line(format!("return {};", member_name(field)));
            }
            out.dedent();
            out.line("}");
        }
        out.dedent();

        if !fields.is_empty() {
            out.blank();
            out.line("  private:");
            out.indent();
            for field in fields {
                out.line(format!("{} {};", owned_type(&scope, field), member_name(field)));
            }
            out.dedent();
        }
        out.line("};");
    }

    fn epilogue(&self, out: &mut CodeWriter, model: &GrammarModel) {
        out.blank();
        out.line(format!("#endif // {}", include_guard(model)));
    }
}
