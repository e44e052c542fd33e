//! The grammar model: a root type name plus its ordered variants.
//!
//! [`GrammarModel::build`] is the single validation boundary of the generator. Every
//! later stage takes a `&GrammarModel` and assumes it is well-formed.

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::{AstGenError, ErrorContext};
use crate::grammar::naming::{is_identifier, is_reserved_type_name};
use crate::grammar::variant::VariantDescriptor;

/// A validated tree family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarModel {
    root_name: String,
    variants: Vec<VariantDescriptor>,
}

impl GrammarModel {
    /// Parses and validates every grammar line for `root_name`.
    ///
    /// Errors raised while parsing a line record that line's 1-based position in
    /// `lines`.
    ///
    /// ```rust
    /// use astgen::grammar::GrammarModel;
    /// let model = GrammarModel::build("Expr", &["Literal : Object value"]).unwrap();
    /// assert_eq!(model.root_name(), "Expr");
    /// assert_eq!(model.variants().len(), 1);
    /// ```
    pub fn build<S: AsRef<str>>(root_name: &str, lines: &[S]) -> Result<Self, AstGenError> {
        let root = root_name.trim();
        if root.is_empty() {
            return Err(AstGenError::invalid_root(root_name, "root name is empty"));
        }
        if !is_identifier(root) {
            return Err(AstGenError::invalid_root(
                root_name,
                "root name is not a plain identifier",
            ));
        }
        if is_reserved_type_name(root) {
            return Err(AstGenError::invalid_root(
                root_name,
                "root name is reserved in generated code",
            ));
        }
        if lines.is_empty() {
            return Err(AstGenError::EmptyGrammar {
                root: root.to_string(),
                ctx: ErrorContext::none(),
            });
        }

        let mut variants = Vec::with_capacity(lines.len());
        let mut seen = HashSet::new();
        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            let variant = VariantDescriptor::parse(line.as_ref())
                .map_err(|e| e.at_line(line_number))?;

            if variant.variant_name() == root {
                return Err(AstGenError::malformed_variant(
                    line.as_ref().trim(),
                    format!("variant name collides with the root type `{root}`"),
                )
                .at_line(line_number));
            }
            if variant.variant_name() == format!("{root}Visitor") {
                return Err(AstGenError::malformed_variant(
                    line.as_ref().trim(),
                    format!("variant name collides with the visitor `{root}Visitor`"),
                )
                .at_line(line_number));
            }
            if !seen.insert(variant.variant_name().to_string()) {
                return Err(AstGenError::DuplicateVariant {
                    variant: variant.variant_name().to_string(),
                    ctx: ErrorContext::at_line(line_number),
                });
            }
            variants.push(variant);
        }

        Ok(Self {
            root_name: root.to_string(),
            variants,
        })
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn variants(&self) -> &[VariantDescriptor] {
        &self.variants
    }

    /// True if `type_name` names the root or one of the variants of this model.
    pub fn is_model_type(&self, type_name: &str) -> bool {
        type_name == self.root_name
            || self
                .variants
                .iter()
                .any(|v| v.variant_name() == type_name)
    }
}
