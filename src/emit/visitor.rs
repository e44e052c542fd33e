//! The visitor contract: one operation per variant, plus the per-variant dispatch
//! that routes a visitor to its single matching operation.

use crate::emit::{Backend, CodeWriter};
use crate::grammar::GrammarModel;

/// One visitor operation, e.g. `visitBinary` for the `Binary` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    variant: String,
}

impl Operation {
    /// Language-neutral operation name, `visit<Variant>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variant this operation handles.
    pub fn variant(&self) -> &str {
        &self.variant
    }
}

/// The closed set of operations a consumer implements to handle every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorContract {
    root: String,
    visitor_name: String,
    operations: Vec<Operation>,
}

impl VisitorContract {
    /// Derives one operation per variant, in the model's variant order.
    pub fn derive(model: &GrammarModel) -> Self {
        let operations = model
            .variants()
            .iter()
            .map(|variant| Operation {
                name: format!("visit{}", variant.variant_name()),
                variant: variant.variant_name().to_string(),
            })
            .collect();

        Self {
            root: model.root_name().to_string(),
            visitor_name: format!("{}Visitor", model.root_name()),
            operations,
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// Name of the emitted visitor type, `<Root>Visitor`.
    pub fn visitor_name(&self) -> &str {
        &self.visitor_name
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub(crate) fn emit_declaration(&self, backend: &dyn Backend, out: &mut CodeWriter) {
        backend.visitor_declaration(out, self);
    }

    pub(crate) fn emit_dispatch(
        &self,
        backend: &dyn Backend,
        operation: &Operation,
        out: &mut CodeWriter,
    ) {
        backend.dispatch(out, self, operation);
    }
}
