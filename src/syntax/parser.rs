//! Definition file parser.
//!
//! Converts definition file text into a [`Definition`]. This parser is purely
//! structural: grammar lines are kept verbatim with their positions and only
//! validated when the definition is turned into grammar models.

use std::sync::Arc;

use miette::{NamedSource, SourceSpan};
use pest::error::{Error, InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::errors::{AstGenError, ErrorContext, SourceArc};
use crate::syntax::{Definition, GrammarLine, TreeDefinition};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct DefinitionParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses the definition file `name` with contents `source_text`.
pub fn parse_definition(name: &str, source_text: &str) -> Result<Definition, AstGenError> {
    let source: SourceArc = Arc::new(NamedSource::new(name, source_text.to_string()));
    let mut definition = Definition::new(source.clone());

    let mut pairs = DefinitionParser::parse(Rule::definition, source_text)
        .map_err(|e| convert_parse_error(e, &source))?;
    let Some(root) = pairs.next() else {
        return Ok(definition);
    };

    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::import => definition.imports.push(string_value(pair)),
            Rule::derive => definition.derives.extend(split_list(&string_value(pair))),
            Rule::tree => definition.trees.push(build_tree(pair)),
            _ => {}
        }
    }
    Ok(definition)
}

// ============================================================================
// BUILDERS
// ============================================================================

fn build_tree(pair: Pair<Rule>) -> TreeDefinition {
    let mut tree = TreeDefinition {
        root: String::new(),
        line: pair.line_col().0,
        span: to_source_span(&pair),
        lines: Vec::new(),
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => {
                tree.root = inner.as_str().to_string();
                tree.line = inner.line_col().0;
                tree.span = to_source_span(&inner);
            }
            Rule::grammar_line => tree.lines.push(GrammarLine {
                text: inner.as_str().to_string(),
                line: inner.line_col().0,
                span: to_source_span(&inner),
            }),
            _ => {}
        }
    }
    tree
}

fn string_value(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::string)
        .and_then(|s| s.into_inner().next())
        .map(|content| content.as_str().to_string())
        .unwrap_or_default()
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn to_source_span(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start()..span.end()).into()
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &SourceArc) -> AstGenError {
    let error = error.renamed_rules(|rule| match rule {
        Rule::kw_tree => "`tree`".to_string(),
        Rule::kw_import => "`import`".to_string(),
        Rule::kw_derive => "`derive`".to_string(),
        Rule::ident => "a tree name".to_string(),
        Rule::string => "a quoted string".to_string(),
        Rule::grammar_line => "a grammar line".to_string(),
        other => format!("{other:?}"),
    });

    let span: SourceSpan = match error.location {
        InputLocation::Pos(pos) => (pos, 0).into(),
        InputLocation::Span((start, end)) => (start..end).into(),
    };
    let line = match error.line_col {
        LineColLocation::Pos((line, _)) | LineColLocation::Span((line, _), _) => line,
    };

    AstGenError::Syntax {
        message: error.variant.message().into_owned(),
        ctx: ErrorContext::located(line, source.clone(), span),
    }
}
