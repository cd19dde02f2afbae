//! Page-context scripts and JSON payloads handed to the graphing page.
//!
//! The LaTeX crosses one string-literal boundary on its way into the page,
//! so it is backslash-escaped here, immediately before interpolation and
//! nowhere else.

use gratex_latex::escape_for_embedding;
use serde_json::json;

use crate::request::GraphMode;
use crate::viewport::MathBounds;

/// Script that clears the mode's calculator and loads one expression.
/// Throws inside the page when the calculator global is missing, which the
/// driver surfaces as a failed evaluation.
pub fn set_expression_script(mode: GraphMode, latex: &str) -> String {
    let global = mode.calculator_global();
    let escaped = escape_for_embedding(latex);
    format!(
        r#"() => {{
    if (window.GraTeX && window.GraTeX.{global}) {{
        window.GraTeX.{global}.setBlank();
        window.GraTeX.{global}.setExpression({{latex: "{escaped}"}});
    }} else {{
        throw new Error("GraTeX.{global} is not available");
    }}
}}"#
    )
}

/// Script that applies viewport bounds to the 2-D calculator. Resolves to
/// `true` when the page accepted the bounds.
pub fn set_bounds_script(bounds: &MathBounds) -> String {
    format!(
        r#"() => {{
    if (window.GraTeX && window.GraTeX.calculator2D) {{
        try {{
            window.GraTeX.calculator2D.setMathBounds({{left: {}, right: {}, bottom: {}, top: {}}});
            return true;
        }} catch (e) {{
            return false;
        }}
    }}
    return false;
}}"#,
        bounds.left, bounds.right, bounds.bottom, bounds.top
    )
}

/// The `{"latex": …}` object `setExpression` accepts.
pub fn expression_value(latex: &str) -> serde_json::Value {
    json!({ "latex": latex })
}

/// [`expression_value`] serialized with JSON quoting rules. Parsing the
/// text back yields the exact input string.
pub fn expression_json(latex: &str) -> String {
    expression_value(latex).to_string()
}
