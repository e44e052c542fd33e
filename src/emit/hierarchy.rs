//! The type hierarchy emitter: base type, visitor contract and one concrete type per
//! variant, rendered in model order into a single [`EmittedUnit`].

use std::path::{Path, PathBuf};

use crate::emit::{CodeWriter, GeneratorOptions, VisitorContract};
use crate::grammar::GrammarModel;

/// Fully rendered output for one grammar model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedUnit {
    root_name: String,
    extension: &'static str,
    text: String,
}

impl EmittedUnit {
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `<rootName>.<extension>`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.root_name, self.extension)
    }

    /// The path this unit is written to inside `output_directory`.
    pub fn target_path(&self, output_directory: &Path) -> PathBuf {
        output_directory.join(self.file_name())
    }
}

/// Renders `model` for the target selected in `options`.
pub fn emit(model: &GrammarModel, options: &GeneratorOptions) -> EmittedUnit {
    let backend = options.target.backend();
    let contract = VisitorContract::derive(model);
    let mut out = CodeWriter::new();

    out.line(format!(
        "// @generated by astgen from the `{}` grammar. Do not edit by hand.",
        model.root_name()
    ));
    backend.prologue(&mut out, model, options);
    backend.base_type(&mut out, model, &contract, options);
    contract.emit_declaration(backend, &mut out);

    for (variant, operation) in model.variants().iter().zip(contract.operations()) {
        backend.open_variant(&mut out, model, variant, options);
        contract.emit_dispatch(backend, operation, &mut out);
        backend.close_variant(&mut out, model, variant, options);
    }
    backend.epilogue(&mut out, model);

    EmittedUnit {
        root_name: model.root_name().to_string(),
        extension: options.target.extension(),
        text: out.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Target;

    #[test]
    fn test_file_name_follows_root_and_target() {
        let model = GrammarModel::build("Stmt", &["Print : Expr expression"]).unwrap();
        let rust = emit(&model, &GeneratorOptions::new(Target::Rust));
        let cpp = emit(&model, &GeneratorOptions::new(Target::Cpp));
        assert_eq!(rust.file_name(), "Stmt.rs");
        assert_eq!(cpp.file_name(), "Stmt.h");
        assert_eq!(
            cpp.target_path(Path::new("out")),
            Path::new("out").join("Stmt.h")
        );
    }

    #[test]
    fn test_variants_rendered_in_model_order() {
        let model = GrammarModel::build(
            "Expr",
            &["Unary : Token operator, Expr right", "Binary : Expr left, Expr right"],
        )
        .unwrap();
        for target in [Target::Rust, Target::Cpp] {
            let unit = emit(&model, &GeneratorOptions::new(target));
            let text = unit.text();
            let unary = text.find("class Unary final").or_else(|| text.find("pub struct Unary"));
            let binary = text.find("class Binary final").or_else(|| text.find("pub struct Binary"));
            assert!(unary.unwrap() < binary.unwrap(), "{target:?}");
        }
    }
}
