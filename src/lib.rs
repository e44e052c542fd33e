//! astgen: generates a syntax tree type family and its visitor contract from a
//! compact grammar description.
//!
//! ```rust
//! use astgen::{render, GeneratorOptions};
//! let unit = render(
//!     "Expr",
//!     &["Binary : Expr left, Token operator, Expr right", "Literal : Object value"],
//!     &GeneratorOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(unit.file_name(), "Expr.rs");
//! assert!(unit.text().contains("pub trait ExprVisitor<R>"));
//! ```

pub use crate::emit::{EmittedUnit, GeneratorOptions, Target};
pub use crate::errors::AstGenError;
pub use crate::generator::{
    generate, generate_definition, generate_with, render, render_definition,
};
pub use crate::grammar::{FieldDescriptor, GrammarModel, VariantDescriptor};
pub use crate::syntax::{parse_definition, Definition};

pub mod cli;
pub mod emit;
pub mod errors;
pub mod generator;
pub mod grammar;
pub mod syntax;
pub mod writer;
