//! The generator core: a pure transformation from
//! `(output directory, root name, grammar lines)` to a written file.
//!
//! Validation and rendering both finish before anything touches the filesystem, so a
//! malformed grammar never leaves a partial file behind.

use std::path::{Path, PathBuf};

use crate::emit::{emit, EmittedUnit, GeneratorOptions};
use crate::errors::AstGenError;
use crate::grammar::GrammarModel;
use crate::syntax::Definition;
use crate::writer::write_unit;

/// Validates and renders a grammar without writing anything.
pub fn render<S: AsRef<str>>(
    root_name: &str,
    grammar_lines: &[S],
    options: &GeneratorOptions,
) -> Result<EmittedUnit, AstGenError> {
    let model = GrammarModel::build(root_name, grammar_lines)?;
    Ok(emit(&model, options))
}

/// Generates `<output_directory>/<root_name>.rs` with default options.
///
/// ```rust,no_run
/// use std::path::Path;
/// let path = astgen::generate(
///     Path::new("src/ast"),
///     "Expr",
///     &["Binary : Expr left, Token operator, Expr right", "Literal : Object value"],
/// )?;
/// assert!(path.ends_with("Expr.rs"));
/// # Ok::<(), astgen::AstGenError>(())
/// ```
pub fn generate<S: AsRef<str>>(
    output_directory: &Path,
    root_name: &str,
    grammar_lines: &[S],
) -> Result<PathBuf, AstGenError> {
    generate_with(output_directory, root_name, grammar_lines, &GeneratorOptions::default())
}

/// Generates one file for `root_name` using `options`.
pub fn generate_with<S: AsRef<str>>(
    output_directory: &Path,
    root_name: &str,
    grammar_lines: &[S],
    options: &GeneratorOptions,
) -> Result<PathBuf, AstGenError> {
    let unit = render(root_name, grammar_lines, options)?;
    write_unit(&unit, output_directory)
}

/// Renders every tree of a definition file. Fails on the first invalid tree.
///
/// Each tree sees the other trees of the file as siblings, so a field of one tree
/// may name the types of another.
pub fn render_definition(
    definition: &Definition,
    options: &GeneratorOptions,
) -> Result<Vec<EmittedUnit>, AstGenError> {
    let models = definition.models()?;
    let units = models
        .iter()
        .map(|model| {
            let mut tree_options = options.clone();
            tree_options.siblings.extend(
                models
                    .iter()
                    .filter(|other| other.root_name() != model.root_name())
                    .cloned(),
            );
            emit(model, &tree_options)
        })
        .collect();
    Ok(units)
}

/// Writes one file per tree of `definition`, in file order.
///
/// Every tree is validated and rendered before the first file is written.
pub fn generate_definition(
    output_directory: &Path,
    definition: &Definition,
    options: &GeneratorOptions,
) -> Result<Vec<PathBuf>, AstGenError> {
    let units = render_definition(definition, options)?;
    units
        .iter()
        .map(|unit| write_unit(unit, output_directory))
        .collect()
}
