//! Identifier helpers shared by the grammar parsers and the target back-ends.

/// Returns true if `text` is a plain ASCII identifier: a letter or underscore
/// followed by letters, digits or underscores.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Converts a `CamelCase` name into `snake_case`.
///
/// ```rust
/// use astgen::grammar::naming::to_snake_case;
/// assert_eq!(to_snake_case("Binary"), "binary");
/// assert_eq!(to_snake_case("IfStmt"), "if_stmt");
/// assert_eq!(to_snake_case("visitHTTPCall"), "visit_http_call");
/// ```
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

// These cannot be raw identifiers.
const RUST_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

// Names the generated code itself uses for types or type parameters.
const GENERATED_TYPE_NAMES: &[&str] = &["Box", "From", "R", "std"];

/// Returns true if `name` cannot name a generated type: a keyword of either target
/// or a name the generated code already uses.
pub fn is_reserved_type_name(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
        || RUST_PATH_KEYWORDS.contains(&name)
        || CPP_KEYWORDS.contains(&name)
        || GENERATED_TYPE_NAMES.contains(&name)
}

/// Byte ranges of the plain type names inside a type token. Segments of a path such
/// as `ast::Expr` are left out, as are numbers.
fn type_name_ranges(type_name: &str) -> Vec<(usize, usize)> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut ranges = Vec::new();
    let mut offset = 0;
    while let Some(found) = type_name[offset..].find(is_word) {
        let start = offset + found;
        let end = type_name[start..]
            .find(|c: char| !is_word(c))
            .map_or(type_name.len(), |len| start + len);
        let in_path = type_name[..start].ends_with("::") || type_name[end..].starts_with("::");
        if !in_path && is_identifier(&type_name[start..end]) {
            ranges.push((start, end));
        }
        offset = end;
    }
    ranges
}

/// The plain type names mentioned by a type token, in order.
///
/// ```rust
/// use astgen::grammar::naming::mentioned_type_names;
/// assert_eq!(mentioned_type_names("HashMap<String, Vec<Expr>>"), ["HashMap", "String", "Vec", "Expr"]);
/// assert_eq!(mentioned_type_names("ast::Expr"), Vec::<&str>::new());
/// ```
pub fn mentioned_type_names(type_name: &str) -> Vec<&str> {
    type_name_ranges(type_name)
        .into_iter()
        .map(|(start, end)| &type_name[start..end])
        .collect()
}

/// Rewrites the plain type names of a type token. Names for which `rewrite` returns
/// `None` are kept as written.
pub fn map_type_names(type_name: &str, mut rewrite: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(type_name.len());
    let mut copied = 0;
    for (start, end) in type_name_ranges(type_name) {
        if let Some(replacement) = rewrite(&type_name[start..end]) {
            out.push_str(&type_name[copied..start]);
            out.push_str(&replacement);
            copied = end;
        }
    }
    out.push_str(&type_name[copied..]);
    out
}

/// Spells `name` as a Rust identifier, escaping keywords.
pub fn rust_ident(name: &str) -> String {
    if RUST_PATH_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Spells `name` as a C++ identifier, appending `_` to reserved words and to the
/// template parameter `R`.
pub fn cpp_ident(name: &str) -> String {
    if CPP_KEYWORDS.contains(&name) || name == "R" {
        format!("{name}_")
    } else {
        name.to_string()
    }
}
