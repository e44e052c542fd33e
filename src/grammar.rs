//! Grammar parsing and the validated grammar model.
//!
//! A grammar is a root type name plus an ordered list of lines such as
//! `Binary : Expr left, Token operator, Expr right`. Lines are parsed into
//! [`VariantDescriptor`]s, each holding its [`FieldDescriptor`]s, and collected into
//! a [`GrammarModel`].

pub mod field;
pub mod model;
pub mod naming;
pub mod variant;

pub use field::FieldDescriptor;
pub use model::GrammarModel;
pub use variant::VariantDescriptor;
