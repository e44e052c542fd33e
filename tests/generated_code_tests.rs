//! Generated code must build. The Rust fixture is compiled into this test crate; the
//! C++ headers are compiled and run when a C++ compiler is installed.

mod common;

use std::fs;
use std::process::Command;

use astgen::{generate_definition, parse_definition, render, GeneratorOptions, Target};
use common::ScratchDir;

const EXPR_TREE: &[&str] = &[
    "Binary      : Expr left, Token operator, Expr right",
    "Call        : Expr callee, Vec<Expr> arguments",
    "Conditional : Expr condition, Expr consequent, Option<Expr> alternative",
    "Literal     : f64 value",
    "Chain       : Literal head, Option<Chain> rest",
    "Nil         :",
];

#[allow(dead_code)]
mod expr_tree {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Token {
        Plus,
        Star,
    }

    include!("fixtures/expr_tree.rs");
}

use expr_tree::*;

fn expr_tree_options() -> GeneratorOptions {
    GeneratorOptions {
        derives: vec!["Debug".to_string(), "Clone".to_string(), "PartialEq".to_string()],
        ..GeneratorOptions::default()
    }
}

struct Evaluator;

impl ExprVisitor<f64> for Evaluator {
    fn visit_binary(&mut self, expr: &Binary) -> f64 {
        let left = expr.left.accept(self);
        let right = expr.right.accept(self);
        match expr.operator {
            Token::Plus => left + right,
            Token::Star => left * right,
        }
    }

    fn visit_call(&mut self, expr: &Call) -> f64 {
        let mut total = expr.callee.accept(self);
        for argument in &expr.arguments {
            total += argument.accept(self);
        }
        total
    }

    fn visit_conditional(&mut self, expr: &Conditional) -> f64 {
        if expr.condition.accept(self) != 0.0 {
            return expr.consequent.accept(self);
        }
        match &expr.alternative {
            Some(alternative) => alternative.accept(self),
            None => 0.0,
        }
    }

    fn visit_literal(&mut self, expr: &Literal) -> f64 {
        expr.value
    }

    fn visit_chain(&mut self, expr: &Chain) -> f64 {
        let head = self.visit_literal(&expr.head);
        head + expr.rest.as_ref().map_or(0.0, |rest| self.visit_chain(rest))
    }

    fn visit_nil(&mut self, _expr: &Nil) -> f64 {
        0.0
    }
}

// ---
// Rust
// ---

#[test]
fn test_rust_fixture_matches_renderer() {
    let unit = render("Expr", EXPR_TREE, &expr_tree_options()).unwrap();
    assert_eq!(unit.text(), include_str!("fixtures/expr_tree.rs"));
}

#[test]
fn test_generated_rust_dispatches() {
    // 2 + 3 * 4
    let sum: Expr = Binary::new(
        Literal::new(2.0).into(),
        Token::Plus,
        Binary::new(Literal::new(3.0).into(), Token::Star, Literal::new(4.0).into()).into(),
    )
    .into();
    let conditional = Conditional::new(Nil::new().into(), Literal::new(1.0).into(), Some(sum.clone()));
    let chain = Chain::new(
        Literal::new(5.0),
        Some(Box::new(Chain::new(Literal::new(6.0), None))),
    );
    let call: Expr = Call::new(Literal::new(1.0).into(), vec![conditional.into(), chain.into()]).into();

    assert_eq!(sum.accept(&mut Evaluator), 14.0);
    assert_eq!(call.accept(&mut Evaluator), 26.0);
    assert_eq!(sum.clone(), sum);
    assert!(std::mem::size_of::<Expr>() <= 2 * std::mem::size_of::<usize>());
}

// ---
// C++
// ---

const INTERPRETER: &str = r#"import "<vector>"

tree Expr {
    Binary  : Expr left, Token operator, Expr right
    Literal : Object value
    Call    : Expr callee, std::vector<Expr> arguments
}

tree Stmt {
    Print : Expr expression
    Block : std::vector<Stmt> statements
    Break :
}
"#;

fn cpp_compiler() -> Option<String> {
    std::env::var("CXX")
        .into_iter()
        .chain(["c++", "g++", "clang++"].map(String::from))
        .find(|cc| {
            Command::new(cc)
                .arg("--version")
                .output()
                .is_ok_and(|out| out.status.success())
        })
}

#[test]
fn test_generated_cpp_compiles_and_dispatches() {
    let Some(compiler) = cpp_compiler() else {
        eprintln!("no C++ compiler found, skipping");
        return;
    };
    let dir = ScratchDir::new("cpp-build");
    let definition = parse_definition("interpreter.ast", INTERPRETER).unwrap();
    generate_definition(dir.path(), &definition, &definition.options(Target::Cpp)).unwrap();

    let driver = dir.path().join("main.cpp");
    fs::write(&driver, include_str!("fixtures/interpreter_driver.cpp")).unwrap();
    let binary = dir.path().join("interpreter");

    let build = Command::new(&compiler)
        .args(["-std=c++17", "-Wall", "-I"])
        .arg(dir.path())
        .arg(&driver)
        .arg("-o")
        .arg(&binary)
        .output()
        .unwrap();
    assert!(
        build.status.success(),
        "{compiler} failed:\n{}",
        String::from_utf8_lossy(&build.stderr)
    );

    let run = Command::new(&binary).status().unwrap();
    assert!(run.success());
}
