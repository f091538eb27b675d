//! Fixed JavaScript fragments used by the transpiler.

pub const ENTRY_POINT: &str = "main";

pub const EMPTY_BODY: &str = "{ }";

pub const ALWAYS_TRUE_LOOP: &str = "while (true)";

pub fn entry_call() -> String {
    format!("{ENTRY_POINT}();\n")
}

/// Integral values print without a fractional part (`3`), others with one
/// (`2.5`).
pub fn render_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{value}")
    }
}

/// Statements end with `;` inside a brace pair.
pub fn render_body(statements: &[String]) -> String {
    if statements.is_empty() {
        return EMPTY_BODY.to_string();
    }
    let mut body = String::from("{ ");
    for statement in statements {
        body.push_str(statement);
        body.push_str("; ");
    }
    body.push('}');
    body
}

/// Collapse every whitespace run into one space.
pub fn squish(source: &str) -> String {
    source.split_whitespace().collect::<Vec<_>>().join(" ")
}
