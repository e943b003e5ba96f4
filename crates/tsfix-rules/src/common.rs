//! Rule builders shared by several targets

use tsfix_core::Rule;

/// Directive silencing `@typescript-eslint/no-explicit-any`
pub const NO_EXPLICIT_ANY: &str = "// eslint-disable-next-line @typescript-eslint/no-explicit-any";

/// Directive silencing `security/detect-object-injection`
pub const OBJECT_INJECTION: &str = "// eslint-disable-next-line security/detect-object-injection";

/// Insert an object-injection suppression on its own line above `statement`
///
/// The statement must start its line. The directive takes the statement's
/// indentation and line ending, and a statement already preceded by the
/// directive is left alone.
pub fn suppress_object_injection(name: &str, statement: &str) -> Rule {
    // Group 4 holds the `\r` of a CRLF line, empty otherwise
    Rule::pattern(
        name,
        format!("Suppress object-injection warning on `{}`", statement),
        format!(r"(?m)^([ \t]*)({})([^\n]*?)(\r?)$", regex::escape(statement)),
        format!("${{1}}{}${{4}}\n${{1}}${{2}}${{3}}${{4}}", OBJECT_INJECTION),
    )
    .scope("statement at the start of its own line")
    .not_preceded_by(OBJECT_INJECTION)
}

/// Append a no-explicit-any suppression after `needle`
pub fn suppress_explicit_any(name: &str, needle: &str) -> Rule {
    let suffix = format!(" {}", NO_EXPLICIT_ANY);
    Rule::literal(
        name,
        format!("Suppress explicit-any warning on `{}`", needle),
        needle,
        format!("{}{}", needle, suffix),
    )
    .scope("end of the line that opens the block")
    .not_followed_by(suffix)
}

/// Give single-expression JSX event handlers a block body
///
/// `params` lists the accepted handler parameter names as regex
/// alternatives, for example `e|v|` (the empty alternative matches
/// handlers written without a parameter).
pub fn void_event_handler(params: &str) -> Rule {
    Rule::pattern(
        "void_event_handler",
        "Wrap event handler bodies in braces so they return void",
        format!(r"(on[A-Z][a-zA-Z]*=\{{(?:{})\s*=>)\s*([^{{}}\n]+)\}}", params),
        "${1} { ${2}; }}",
    )
    .scope("single-line JSX attribute `onX={param => expr}`")
}
