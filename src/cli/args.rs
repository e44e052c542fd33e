//! Command-line arguments: one subcommand per way of consuming a definition file
//! (write, validate, print, dump the model), sharing the target and directive flags.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::emit::Target;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "astgen",
    version,
    about = "Generates syntax tree types and visitor contracts from a compact grammar."
)]
pub struct AstGenArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the grammar and write one file per tree.
    Generate {
        /// Definition file. Defaults to the built-in `Expr` grammar.
        file: Option<PathBuf>,
        /// Existing directory that receives the generated files.
        #[arg(short = 'o', long, required = true)]
        output_directory: PathBuf,
        #[command(flatten)]
        emit: EmitArgs,
        /// Do not print status lines.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Validate and render the grammar without writing anything.
    Check {
        /// Definition file. Defaults to the built-in `Expr` grammar.
        file: Option<PathBuf>,
        #[command(flatten)]
        emit: EmitArgs,
        /// Do not print status lines.
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the generated text to stdout.
    Show {
        /// Definition file. Defaults to the built-in `Expr` grammar.
        file: Option<PathBuf>,
        #[command(flatten)]
        emit: EmitArgs,
        /// Only print the tree with this root name.
        #[arg(long)]
        root: Option<String>,
    },
    /// Print the validated grammar models as JSON.
    Model {
        /// Definition file. Defaults to the built-in `Expr` grammar.
        file: Option<PathBuf>,
    },
}

/// Options shared by every subcommand that renders output.
#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Language of the generated files.
    #[arg(long, value_enum, default_value_t = Target::Rust)]
    pub target: Target,
    /// Comma-separated derives added to every generated Rust type.
    #[arg(long, value_delimiter = ',')]
    pub derive: Vec<String>,
    /// Extra import, emitted as `use <PATH>;` or `#include <PATH>`. Repeatable.
    #[arg(long = "import", value_name = "PATH")]
    pub imports: Vec<String>,
}
