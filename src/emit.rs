//! Text emission for a validated [`GrammarModel`](crate::grammar::GrammarModel).
//!
//! The [`hierarchy`] emitter walks the model and drives a target [`Backend`]; the
//! [`visitor`] module owns the visitor contract and the per-variant dispatch. Output
//! is built line by line through a [`CodeWriter`] and depends only on the model and
//! the [`GeneratorOptions`], so identical input always renders identical text.

use clap::ValueEnum;

use crate::grammar::naming::mentioned_type_names;
use crate::grammar::{GrammarModel, VariantDescriptor};

pub mod cpp;
pub mod hierarchy;
pub mod rust;
pub mod visitor;

pub use hierarchy::{emit, EmittedUnit};
pub use visitor::{Operation, VisitorContract};

// ============================================================================
// OPTIONS
// ============================================================================

/// Language of the emitted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Target {
    /// A Rust module: an enum over one struct per variant plus a visitor trait.
    #[default]
    Rust,
    /// A C++ header: a templated class hierarchy plus a visitor class.
    Cpp,
}

impl Target {
    /// File extension of the emitted file, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Rust => "rs",
            Target::Cpp => "h",
        }
    }

    pub(crate) fn backend(self) -> &'static dyn Backend {
        match self {
            Target::Rust => &rust::RustBackend,
            Target::Cpp => &cpp::CppBackend,
        }
    }
}

/// Caller-supplied knobs for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub target: Target,
    /// Emitted verbatim in the target's import syntax, in order.
    pub imports: Vec<String>,
    /// Derive list for every emitted Rust type. Ignored for C++.
    pub derives: Vec<String>,
    /// Other trees rendered alongside this one. Fields may name their types.
    pub siblings: Vec<GrammarModel>,
}

impl GeneratorOptions {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}

// ============================================================================
// TYPE SCOPE
// ============================================================================

/// The node types one emitted file can refer to: those of its own tree, then those of
/// the sibling trees in [`GeneratorOptions::siblings`].
pub(crate) struct TypeScope<'a> {
    model: &'a GrammarModel,
    siblings: &'a [GrammarModel],
}

impl<'a> TypeScope<'a> {
    pub(crate) fn new(model: &'a GrammarModel, options: &'a GeneratorOptions) -> Self {
        Self {
            model,
            siblings: &options.siblings,
        }
    }

    /// The tree declaring `name`, own tree first.
    fn owner(&self, name: &str) -> Option<&'a GrammarModel> {
        std::iter::once(self.model)
            .chain(self.siblings.iter())
            .find(|model| model.is_model_type(name))
    }

    /// True for the root or a variant of any tree in scope.
    pub(crate) fn is_node(&self, name: &str) -> bool {
        self.owner(name).is_some()
    }

    /// True for a variant of any tree in scope.
    pub(crate) fn is_variant(&self, name: &str) -> bool {
        self.owner(name).is_some_and(|model| model.root_name() != name)
    }

    /// Sibling trees whose types this tree's fields mention, in sibling order, each
    /// with the mentioned names in first-use order.
    pub(crate) fn external_references(&self) -> Vec<(&'a str, Vec<&'a str>)> {
        let mentioned: Vec<&'a str> = self
            .model
            .variants()
            .iter()
            .flat_map(|variant| variant.fields())
            .flat_map(|field| mentioned_type_names(field.type_name()))
            .filter(|name| !self.model.is_model_type(name))
            .collect();

        self.siblings
            .iter()
            .filter(|sibling| sibling.root_name() != self.model.root_name())
            .filter_map(|sibling| {
                let mut names: Vec<&'a str> = Vec::new();
                for &name in &mentioned {
                    if sibling.is_model_type(name) && !names.contains(&name) {
                        names.push(name);
                    }
                }
                (!names.is_empty()).then(|| (sibling.root_name(), names))
            })
            .collect()
    }
}

// ============================================================================
// CODE WRITER
// ============================================================================

const INDENT: &str = "    ";

/// Line-oriented text buffer with an indentation level.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    level: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    /// Writes an empty line, never more than one in a row.
    pub fn blank(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with("\n\n") {
            self.buf.push('\n');
        }
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

// ============================================================================
// BACKEND SEAM
// ============================================================================

/// Renders the pieces of one target language. The call order is fixed by
/// [`hierarchy::emit`]: prologue, base type, visitor declaration, then for each
/// variant `open_variant`, `dispatch`, `close_variant`, and finally the epilogue.
pub(crate) trait Backend {
    fn prologue(&self, out: &mut CodeWriter, model: &GrammarModel, options: &GeneratorOptions);

    fn base_type(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        contract: &VisitorContract,
        options: &GeneratorOptions,
    );

    fn visitor_declaration(&self, out: &mut CodeWriter, contract: &VisitorContract);

    fn open_variant(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        variant: &VariantDescriptor,
        options: &GeneratorOptions,
    );

    fn dispatch(&self, out: &mut CodeWriter, contract: &VisitorContract, operation: &Operation);

    fn close_variant(
        &self,
        out: &mut CodeWriter,
        model: &GrammarModel,
        variant: &VariantDescriptor,
        options: &GeneratorOptions,
    );

    fn epilogue(&self, out: &mut CodeWriter, model: &GrammarModel);
}
