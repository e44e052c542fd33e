//! Definition files.
//!
//! A definition file holds one or more `tree` blocks plus `import` and `derive`
//! directives shared by every tree in the file:
//!
//! ```text
//! import "crate::token::Token"
//! derive "Debug, Clone"
//!
//! tree Expr {
//!     Binary  : Expr left, Token operator, Expr right
//!     Literal : Object value
//! }
//! ```
//!
//! Parsing only records positions; [`Definition::models`] runs each tree through the
//! grammar model builder and points any failure at the offending line.

use std::collections::HashSet;

use miette::SourceSpan;

use crate::emit::{GeneratorOptions, Target};
use crate::errors::{AstGenError, ErrorContext, SourceArc};
use crate::grammar::GrammarModel;

pub mod parser;

pub use parser::parse_definition;

/// The grammar the generator falls back to when no definition file is given: the
/// expression trees of a tree-walking interpreter.
pub const BUILTIN_DEFINITION: &str = "\
tree Expr {
    Binary   : Expr left, Token operator, Expr right
    Grouping : Expr expression
    Literal  : Object value
    Unary    : Token operator, Expr right
}
";

/// One grammar line exactly as written, with its position in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarLine {
    pub text: String,
    /// 1-based line number.
    pub line: usize,
    pub span: SourceSpan,
}

/// A `tree Name { ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDefinition {
    pub root: String,
    pub line: usize,
    /// Span of the tree name.
    pub span: SourceSpan,
    pub lines: Vec<GrammarLine>,
}

/// A parsed definition file.
#[derive(Debug, Clone)]
pub struct Definition {
    source: SourceArc,
    pub imports: Vec<String>,
    pub derives: Vec<String>,
    pub trees: Vec<TreeDefinition>,
}

impl Definition {
    pub(crate) fn new(source: SourceArc) -> Self {
        Self {
            source,
            imports: Vec::new(),
            derives: Vec::new(),
            trees: Vec::new(),
        }
    }

    /// The built-in `Expr` definition.
    pub fn builtin() -> Result<Self, AstGenError> {
        parse_definition("<builtin>", BUILTIN_DEFINITION)
    }

    /// Builds and validates one grammar model per tree, in file order.
    ///
    /// Fails on the first invalid tree; errors are located in the definition file.
    pub fn models(&self) -> Result<Vec<GrammarModel>, AstGenError> {
        let mut seen = HashSet::new();
        let mut models = Vec::with_capacity(self.trees.len());

        for tree in &self.trees {
            if !seen.insert(tree.root.as_str()) {
                return Err(AstGenError::DuplicateTree {
                    root: tree.root.clone(),
                    ctx: ErrorContext::located(tree.line, self.source.clone(), tree.span),
                });
            }

            let lines: Vec<&str> = tree.lines.iter().map(|l| l.text.as_str()).collect();
            let model = GrammarModel::build(&tree.root, &lines).map_err(|e| self.locate(e, tree))?;
            models.push(model);
        }
        Ok(models)
    }

    /// Generator options carrying this file's directives.
    pub fn options(&self, target: Target) -> GeneratorOptions {
        GeneratorOptions {
            target,
            imports: self.imports.clone(),
            derives: self.derives.clone(),
            siblings: Vec::new(),
        }
    }

    /// Moves a builder error from "nth line of the tree" onto the file itself.
    fn locate(&self, error: AstGenError, tree: &TreeDefinition) -> AstGenError {
        let located = error
            .line()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| tree.lines.get(index));

        let ctx = match located {
            Some(line) => ErrorContext::located(line.line, self.source.clone(), line.span),
            None => ErrorContext::located(tree.line, self.source.clone(), tree.span),
        };
        error.with_context(ctx)
    }
}
