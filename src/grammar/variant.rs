//! Variant descriptor parsing: one `"<Name> : <field>, <field>, ..."` grammar line.

use std::collections::HashSet;

use serde::Serialize;

use crate::errors::{AstGenError, ErrorContext};
use crate::grammar::field::FieldDescriptor;
use crate::grammar::naming::{cpp_ident, is_identifier, is_reserved_type_name, rust_ident};

/// One concrete node kind of the tree family, with its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDescriptor {
    variant_name: String,
    fields: Vec<FieldDescriptor>,
}

impl VariantDescriptor {
    /// Parses one grammar line.
    ///
    /// The line is split on its first `:`. Field order is kept exactly as written,
    /// since it becomes the initializer parameter order downstream. An empty field
    /// list is legal and yields a variant with no fields.
    pub fn parse(line: &str) -> Result<Self, AstGenError> {
        let Some((name_part, field_part)) = line.split_once(':') else {
            return Err(AstGenError::malformed_variant(
                line.trim(),
                "missing `:` separator",
            ));
        };

        let variant_name = name_part.trim();
        if variant_name.is_empty() {
            return Err(AstGenError::malformed_variant(
                line.trim(),
                "empty variant name",
            ));
        }
        if !is_identifier(variant_name) {
            return Err(AstGenError::malformed_variant(
                line.trim(),
                format!("`{variant_name}` is not a valid variant name"),
            ));
        }
        if is_reserved_type_name(variant_name) {
            return Err(AstGenError::malformed_variant(
                line.trim(),
                format!("`{variant_name}` is reserved in generated code"),
            ));
        }

        let fields = if field_part.trim().is_empty() {
            Vec::new()
        } else {
            field_part
                .split(',')
                .map(FieldDescriptor::parse)
                .collect::<Result<Vec<_>, _>>()?
        };

        // Names must stay distinct once escaped for either target: `self` is
        // spelled `self_` in Rust and `operator` is spelled `operator_` in C++.
        let mut seen_rust = HashSet::new();
        let mut seen_cpp = HashSet::new();
        for field in &fields {
            let rust = rust_ident(field.field_name());
            let rust = rust.trim_start_matches("r#").to_string();
            let fresh_rust = seen_rust.insert(rust);
            let fresh_cpp = seen_cpp.insert(cpp_ident(field.field_name()));
            if !(fresh_rust && fresh_cpp) {
                return Err(AstGenError::DuplicateField {
                    variant: variant_name.to_string(),
                    field: field.field_name().to_string(),
                    ctx: ErrorContext::none(),
                });
            }
        }

        Ok(Self {
            variant_name: variant_name.to_string(),
            fields,
        })
    }

    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}
