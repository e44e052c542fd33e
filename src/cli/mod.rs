//! The astgen Command-Line Interface.
//!
//! This module turns command-line arguments into calls to the generator core and is
//! the only place that reads files named on the command line or prints to the
//! terminal.

use std::path::Path;
use std::{fs, process};

use clap::Parser;
use miette::IntoDiagnostic;

use crate::cli::args::{AstGenArgs, Command, EmitArgs};
use crate::cli::output::StatusPrinter;
use crate::emit::{GeneratorOptions, Target};
use crate::errors::{print_error, AstGenError};
use crate::generator::{generate_definition, render_definition};
use crate::syntax::{parse_definition, Definition};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = AstGenArgs::parse();

    let result = match args.command {
        Command::Generate {
            file,
            output_directory,
            emit,
            quiet,
        } => handle_generate(file.as_deref(), &output_directory, &emit, quiet),
        Command::Check { file, emit, quiet } => handle_check(file.as_deref(), &emit, quiet),
        Command::Show { file, emit, root } => handle_show(file.as_deref(), &emit, root.as_deref()),
        Command::Model { file } => handle_model(file.as_deref()),
    };

    if let Err(report) = result {
        print_error(report);
        process::exit(1);
    }
}

/// Reads and parses `file`, or returns the built-in definition.
pub fn load_definition(file: Option<&Path>) -> Result<Definition, AstGenError> {
    let Some(path) = file else {
        return Definition::builtin();
    };
    let source = fs::read_to_string(path).map_err(|source| AstGenError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    parse_definition(&path.display().to_string(), &source)
}

/// File directives first, then the ones given on the command line.
fn options_for(definition: &Definition, emit: &EmitArgs) -> GeneratorOptions {
    let mut options = definition.options(emit.target);
    options.imports.extend(emit.imports.iter().cloned());
    options.derives.extend(
        emit.derive
            .iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    );
    options
}

fn warn_ignored_derives(printer: &mut StatusPrinter, options: &GeneratorOptions) {
    if options.target == Target::Cpp && !options.derives.is_empty() {
        printer.note("Ignoring", "derives, they only apply to the Rust target");
    }
}

// ============================================================================
// SUBCOMMAND HANDLERS
// ============================================================================

fn handle_generate(
    file: Option<&Path>,
    output_directory: &Path,
    emit: &EmitArgs,
    quiet: bool,
) -> miette::Result<()> {
    let mut printer = StatusPrinter::new(quiet);
    let definition = load_definition(file)?;
    let options = options_for(&definition, emit);
    warn_ignored_derives(&mut printer, &options);

    let paths = generate_definition(output_directory, &definition, &options)?;
    for (tree, path) in definition.trees.iter().zip(&paths) {
        printer.status("Generated", &format!("{} -> {}", tree.root, path.display()));
    }
    Ok(())
}

fn handle_check(file: Option<&Path>, emit: &EmitArgs, quiet: bool) -> miette::Result<()> {
    let mut printer = StatusPrinter::new(quiet);
    let definition = load_definition(file)?;
    let options = options_for(&definition, emit);
    warn_ignored_derives(&mut printer, &options);

    for unit in render_definition(&definition, &options)? {
        printer.status("Checked", &format!("{} ({})", unit.root_name(), unit.file_name()));
    }
    Ok(())
}

fn handle_show(file: Option<&Path>, emit: &EmitArgs, root: Option<&str>) -> miette::Result<()> {
    let definition = load_definition(file)?;
    let options = options_for(&definition, emit);
    let units = render_definition(&definition, &options)?;

    let selected: Vec<_> = units
        .iter()
        .filter(|unit| root.map_or(true, |r| unit.root_name() == r))
        .collect();
    if let (Some(root), true) = (root, selected.is_empty()) {
        let available = units
            .iter()
            .map(|unit| unit.root_name())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AstGenError::UnknownTree {
            root: root.to_string(),
            available,
        }
        .into());
    }

    for (i, unit) in selected.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", unit.text());
    }
    Ok(())
}

fn handle_model(file: Option<&Path>) -> miette::Result<()> {
    let definition = load_definition(file)?;
    let models = definition.models()?;
    let json = serde_json::to_string_pretty(&models).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_directives_follow_file_directives() {
        let definition =
            parse_definition("d.ast", "import \"a::A\"\nderive \"Debug\"\ntree T {\n Nil :\n}\n")
                .unwrap();
        let emit = EmitArgs {
            target: Target::Rust,
            derive: vec!["Clone".to_string(), " ".to_string()],
            imports: vec!["b::B".to_string()],
        };
        let options = options_for(&definition, &emit);
        assert_eq!(options.imports, ["a::A", "b::B"]);
        assert_eq!(options.derives, ["Debug", "Clone"]);
    }

    #[test]
    fn test_missing_definition_file() {
        let err = load_definition(Some(Path::new("does/not/exist.ast"))).unwrap_err();
        assert!(matches!(err, AstGenError::Input { .. }));
    }

    #[test]
    fn test_args_parse() {
        let args = AstGenArgs::try_parse_from([
            "astgen", "generate", "expr.ast", "-o", "out", "--target", "cpp", "--derive",
            "Debug,Clone",
        ])
        .unwrap();
        match args.command {
            Command::Generate {
                file,
                output_directory,
                emit,
                quiet,
            } => {
                assert_eq!(file.as_deref(), Some(Path::new("expr.ast")));
                assert_eq!(output_directory, Path::new("out"));
                assert_eq!(emit.target, Target::Cpp);
                assert_eq!(emit.derive, ["Debug", "Clone"]);
                assert!(!quiet);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_output_directory() {
        assert!(AstGenArgs::try_parse_from(["astgen", "generate"]).is_err());
    }
}
