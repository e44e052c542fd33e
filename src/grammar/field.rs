//! Field descriptor parsing: one `"<Type> <name>"` fragment of a grammar line.

use serde::Serialize;

use crate::errors::AstGenError;
use crate::grammar::naming::is_identifier;

/// One typed field of a variant, e.g. `Expr left`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    type_name: String,
    field_name: String,
}

impl FieldDescriptor {
    /// Parses a single comma-separated field fragment.
    ///
    /// The fragment is trimmed, then split on its first run of whitespace into the
    /// type token and the name token.
    ///
    /// ```rust
    /// use astgen::grammar::FieldDescriptor;
    /// let field = FieldDescriptor::parse("  Token operator ").unwrap();
    /// assert_eq!(field.type_name(), "Token");
    /// assert_eq!(field.field_name(), "operator");
    /// ```
    pub fn parse(fragment: &str) -> Result<Self, AstGenError> {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            return Err(AstGenError::malformed_field(trimmed, "empty field"));
        }

        let Some((type_name, rest)) = trimmed.split_once(char::is_whitespace) else {
            return Err(AstGenError::malformed_field(
                trimmed,
                "expected a type followed by a field name",
            ));
        };
        let field_name = rest.trim_start();

        if field_name.contains(char::is_whitespace) {
            return Err(AstGenError::malformed_field(
                trimmed,
                "field name contains whitespace",
            ));
        }
        if !is_identifier(field_name) {
            return Err(AstGenError::malformed_field(
                trimmed,
                format!("`{field_name}` is not a valid field name"),
            ));
        }

        if field_name == "_" {
            return Err(AstGenError::malformed_field(trimmed, "`_` cannot name a field"));
        }

        Ok(Self {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }
}
