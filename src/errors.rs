//! astgen error handling.
//!
//! Every failure the generator can report is one variant of [`AstGenError`]. Each
//! variant carries the offending input verbatim, and grammar errors carry an
//! [`ErrorContext`] locating them: a line number, and when the grammar came from a
//! definition file, the file itself plus a span for a labelled `miette` report.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, Report, SourceCode, SourceSpan};
use thiserror::Error;

pub type SourceArc = Arc<NamedSource<String>>;

// ============================================================================
// ERROR CONTEXT
// ============================================================================

/// Location information attached to grammar errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// 1-based line number of the offending grammar line.
    pub line: Option<usize>,
    /// The definition file the grammar was read from, if any.
    pub source: Option<SourceArc>,
    /// Span of the offending text within `source`.
    pub span: Option<SourceSpan>,
}

impl ErrorContext {
    /// An empty context: no line, no source.
    pub fn none() -> Self {
        Self::default()
    }

    /// A context that only knows the line number.
    pub fn at_line(line: usize) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    /// A fully located context inside a definition file.
    pub fn located(line: usize, source: SourceArc, span: SourceSpan) -> Self {
        Self {
            line: Some(line),
            source: Some(source),
            span: Some(span),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, " on line {line}"),
            None => Ok(()),
        }
    }
}

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Unified error type for every astgen failure mode.
#[derive(Debug, Error)]
pub enum AstGenError {
    #[error("invalid root type name `{root}`{ctx}: {reason}")]
    InvalidRootName {
        root: String,
        reason: String,
        ctx: ErrorContext,
    },
    #[error("grammar for `{root}` declares no variants{ctx}")]
    EmptyGrammar { root: String, ctx: ErrorContext },
    #[error("malformed variant `{line_text}`{ctx}: {reason}")]
    MalformedVariant {
        line_text: String,
        reason: String,
        ctx: ErrorContext,
    },
    #[error("malformed field `{fragment}`{ctx}: {reason}")]
    MalformedField {
        fragment: String,
        reason: String,
        ctx: ErrorContext,
    },
    #[error("variant `{variant}` is declared more than once{ctx}")]
    DuplicateVariant { variant: String, ctx: ErrorContext },
    #[error("field `{field}` is declared more than once in variant `{variant}`{ctx}")]
    DuplicateField {
        variant: String,
        field: String,
        ctx: ErrorContext,
    },
    #[error("tree `{root}` is defined more than once{ctx}")]
    DuplicateTree { root: String, ctx: ErrorContext },
    #[error("syntax error in definition file{ctx}: {message}")]
    Syntax { message: String, ctx: ErrorContext },
    #[error("no tree named `{root}` in the definition (trees: {available})")]
    UnknownTree { root: String, available: String },
    #[error("output directory `{}` {reason}", path.display())]
    OutputDirectory {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },
    #[error("cannot read definition file `{}`", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AstGenError {
    pub(crate) fn malformed_variant(line_text: &str, reason: impl Into<String>) -> Self {
        AstGenError::MalformedVariant {
            line_text: line_text.to_string(),
            reason: reason.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub(crate) fn malformed_field(fragment: &str, reason: impl Into<String>) -> Self {
        AstGenError::MalformedField {
            fragment: fragment.to_string(),
            reason: reason.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub(crate) fn invalid_root(root: &str, reason: impl Into<String>) -> Self {
        AstGenError::InvalidRootName {
            root: root.to_string(),
            reason: reason.into(),
            ctx: ErrorContext::none(),
        }
    }

    pub(crate) fn output_directory(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        source: Option<io::Error>,
    ) -> Self {
        AstGenError::OutputDirectory {
            path: path.into(),
            reason: reason.into(),
            source,
        }
    }

    /// Returns the location context, for the variants that have one.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            AstGenError::InvalidRootName { ctx, .. }
            | AstGenError::EmptyGrammar { ctx, .. }
            | AstGenError::MalformedVariant { ctx, .. }
            | AstGenError::MalformedField { ctx, .. }
            | AstGenError::DuplicateVariant { ctx, .. }
            | AstGenError::DuplicateField { ctx, .. }
            | AstGenError::DuplicateTree { ctx, .. }
            | AstGenError::Syntax { ctx, .. } => Some(ctx),
            AstGenError::UnknownTree { .. }
            | AstGenError::OutputDirectory { .. }
            | AstGenError::Input { .. } => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            AstGenError::InvalidRootName { ctx, .. }
            | AstGenError::EmptyGrammar { ctx, .. }
            | AstGenError::MalformedVariant { ctx, .. }
            | AstGenError::MalformedField { ctx, .. }
            | AstGenError::DuplicateVariant { ctx, .. }
            | AstGenError::DuplicateField { ctx, .. }
            | AstGenError::DuplicateTree { ctx, .. }
            | AstGenError::Syntax { ctx, .. } => Some(ctx),
            AstGenError::UnknownTree { .. }
            | AstGenError::OutputDirectory { .. }
            | AstGenError::Input { .. } => None,
        }
    }

    /// Replaces the location context. Variants without one are returned unchanged.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if let Some(ctx) = self.context_mut() {
            *ctx = context;
        }
        self
    }

    /// Records the 1-based grammar line the error was found on.
    pub fn at_line(mut self, line: usize) -> Self {
        if let Some(ctx) = self.context_mut() {
            ctx.line = Some(line);
        }
        self
    }

    /// The line number recorded for this error, if any.
    pub fn line(&self) -> Option<usize> {
        self.context().and_then(|ctx| ctx.line)
    }

    fn code_suffix(&self) -> &'static str {
        match self {
            AstGenError::InvalidRootName { .. } => "invalid_root_name",
            AstGenError::EmptyGrammar { .. } => "empty_grammar",
            AstGenError::MalformedVariant { .. } => "malformed_variant",
            AstGenError::MalformedField { .. } => "malformed_field",
            AstGenError::DuplicateVariant { .. } => "duplicate_variant",
            AstGenError::DuplicateField { .. } => "duplicate_field",
            AstGenError::DuplicateTree { .. } => "duplicate_tree",
            AstGenError::Syntax { .. } => "syntax",
            AstGenError::UnknownTree { .. } => "unknown_tree",
            AstGenError::OutputDirectory { .. } => "output_directory",
            AstGenError::Input { .. } => "input",
        }
    }

    fn help_text(&self) -> Option<&'static str> {
        match self {
            AstGenError::InvalidRootName { .. } => {
                Some("the root name becomes a type name and must be a plain identifier")
            }
            AstGenError::EmptyGrammar { .. } => {
                Some("add at least one line of the form `Name : Type field, ...`")
            }
            AstGenError::MalformedVariant { .. } => {
                Some("grammar lines have the form `Name : Type field, Type field, ...`")
            }
            AstGenError::MalformedField { .. } => {
                Some("each field is a type followed by a name, e.g. `Expr left`")
            }
            AstGenError::DuplicateVariant { .. } => Some("variant names must be unique"),
            AstGenError::DuplicateField { .. } => {
                Some("field names must be unique within a variant")
            }
            AstGenError::DuplicateTree { .. } => {
                Some("each tree is written to its own file and needs a unique name")
            }
            AstGenError::UnknownTree { .. } => {
                Some("pass one of the tree names declared in the definition file")
            }
            AstGenError::OutputDirectory { .. } => {
                Some("create the directory first, or pass an existing one with --output-directory")
            }
            AstGenError::Syntax { .. } | AstGenError::Input { .. } => None,
        }
    }

    fn label_text(&self) -> String {
        match self {
            AstGenError::InvalidRootName { .. } => "invalid root name".to_string(),
            AstGenError::EmptyGrammar { .. } => "no variants".to_string(),
            AstGenError::MalformedVariant { reason, .. }
            | AstGenError::MalformedField { reason, .. } => reason.clone(),
            AstGenError::DuplicateVariant { .. } => "declared again here".to_string(),
            AstGenError::DuplicateField { field, .. } => format!("`{field}` repeated"),
            AstGenError::DuplicateTree { .. } => "defined again here".to_string(),
            AstGenError::Syntax { message, .. } => message.clone(),
            AstGenError::UnknownTree { .. }
            | AstGenError::OutputDirectory { .. }
            | AstGenError::Input { .. } => String::new(),
        }
    }
}

impl Diagnostic for AstGenError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("astgen::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.context()
            .and_then(|ctx| ctx.source.as_ref())
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ctx = self.context()?;
        ctx.source.as_ref()?;
        let span = ctx.span?;
        let label = LabeledSpan::new_with_span(Some(self.label_text()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an error with full miette diagnostics on stderr.
pub fn print_error(error: impl Into<Report>) {
    let report: Report = error.into();
    eprintln!("{report:?}");
}
