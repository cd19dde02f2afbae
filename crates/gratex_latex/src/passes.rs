//! The individual rewrite passes of the translation pipeline.
//!
//! Each pass is a small value owning its compiled patterns. Passes are pure
//! string-to-string rewrites; none of them knows about the others, and the
//! pipeline order lives in [`crate::translator::Translator`].

use regex::Regex;

use crate::error::PassError;

/// Function names recognized by the bracketing and implicit-multiplication
/// passes. Longer names precede their prefixes so the generated alternation
/// never stops at `sin` inside `sinh`.
pub(crate) const FUNCTION_NAMES: &[&str] = &[
    "floor", "asin", "acos", "atan", "sinh", "cosh", "tanh", "sqrt", "ceil", "abs", "sin", "cos",
    "tan", "sec", "csc", "cot", "exp", "log", "ln",
];

/// Greek-letter names spelled out in ASCII source.
const GREEK_NAMES: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "theta", "lambda", "mu", "pi", "sigma", "phi",
    "omega",
];

/// A single text-rewriting stage. Stages must tolerate any input string and
/// report failure instead of panicking; the pipeline skips a failed stage.
pub trait RewritePass: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, input: &str) -> Result<String, PassError>;
}

fn compile(pattern: &str) -> Result<Regex, PassError> {
    Regex::new(pattern).map_err(|e| PassError::Pattern(e.to_string()))
}

/// True when `head` (the text left of an opening parenthesis) ends in a
/// recognized function name, i.e. the parenthesis opens a call.
fn ends_with_function_name(head: &str) -> bool {
    FUNCTION_NAMES.iter().any(|name| head.ends_with(name))
}

/// `sinx` -> `sin(x)`: a function name directly followed by a bare
/// variable-like token gains explicit call parentheses.
pub struct BracketFunctionArgs {
    bare_call: Regex,
}

impl BracketFunctionArgs {
    pub fn new() -> Result<Self, PassError> {
        let pattern = format!(r"\b({})([a-zA-Z][a-zA-Z0-9]*)", FUNCTION_NAMES.join("|"));
        Ok(Self {
            bare_call: compile(&pattern)?,
        })
    }
}

impl RewritePass for BracketFunctionArgs {
    fn name(&self) -> &'static str {
        "bracket_function_args"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        Ok(self.bare_call.replace_all(input, "${1}(${2})").into_owned())
    }
}

/// Insert `*` where adjacency means multiplication: `2x`, `x2`, `)y`, `3(`.
/// An opening parenthesis that completes a function call is left alone.
pub struct InsertImplicitMul {
    digit_letter: Regex,
    letter_digit: Regex,
    after_close: Regex,
    before_open: Regex,
}

impl InsertImplicitMul {
    pub fn new() -> Result<Self, PassError> {
        Ok(Self {
            digit_letter: compile(r"(\d)([a-zA-Z])")?,
            letter_digit: compile(r"([a-zA-Z])(\d)")?,
            after_close: compile(r"\)([0-9a-zA-Z])")?,
            before_open: compile(r"[0-9a-zA-Z]\(")?,
        })
    }

    /// Rewrite `<alnum>(` to `<alnum>*(` except after a function name.
    fn star_before_open(&self, s: &str) -> Result<String, PassError> {
        let mut out = String::with_capacity(s.len() + 8);
        let mut last = 0;
        for m in self.before_open.find_iter(s) {
            // Match is two ASCII bytes; the parenthesis sits at end - 1.
            let paren = m.end() - 1;
            let head = s
                .get(..paren)
                .ok_or_else(|| PassError::Rewrite(format!("split off char boundary at {paren}")))?;
            out.push_str(&s[last..paren]);
            if !ends_with_function_name(head) {
                out.push('*');
            }
            out.push('(');
            last = m.end();
        }
        out.push_str(&s[last..]);
        Ok(out)
    }
}

impl RewritePass for InsertImplicitMul {
    fn name(&self) -> &'static str {
        "insert_implicit_mul"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        let out = self.digit_letter.replace_all(input, "${1}*${2}");
        let out = self.letter_digit.replace_all(&out, "${1}*${2}");
        let out = self.after_close.replace_all(&out, ")*${1}");
        self.star_before_open(&out)
    }
}

/// `**` -> `^`.
pub struct NormalizePowers;

impl RewritePass for NormalizePowers {
    fn name(&self) -> &'static str {
        "normalize_powers"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        Ok(input.replace("**", "^"))
    }
}

/// Rewrite recognized call forms into their LaTeX spellings.
///
/// The argument is everything up to the first closing parenthesis, so nested
/// parentheses inside an argument are not understood. `floor` and `ceil`
/// have no row here and pass through literally.
pub struct MapFunctions {
    rows: Vec<(Regex, &'static str)>,
}

impl MapFunctions {
    pub fn new() -> Result<Self, PassError> {
        let table: &[(&str, &str)] = &[
            ("sin", r"\sin\left(${1}\right)"),
            ("cos", r"\cos\left(${1}\right)"),
            ("tan", r"\tan\left(${1}\right)"),
            ("sec", r"\sec\left(${1}\right)"),
            ("csc", r"\csc\left(${1}\right)"),
            ("cot", r"\cot\left(${1}\right)"),
            ("asin", r"\arcsin\left(${1}\right)"),
            ("acos", r"\arccos\left(${1}\right)"),
            ("atan", r"\arctan\left(${1}\right)"),
            ("sinh", r"\sinh\left(${1}\right)"),
            ("cosh", r"\cosh\left(${1}\right)"),
            ("tanh", r"\tanh\left(${1}\right)"),
            ("ln", r"\ln\left(${1}\right)"),
            ("log", r"\log\left(${1}\right)"),
            ("sqrt", r"\sqrt{${1}}"),
            ("exp", r"e^{${1}}"),
            ("abs", r"\left|${1}\right|"),
        ];
        let mut rows = Vec::with_capacity(table.len());
        for (name, replacement) in table {
            rows.push((compile(&format!(r"\b{name}\(([^)]+)\)"))?, *replacement));
        }
        Ok(Self { rows })
    }
}

impl RewritePass for MapFunctions {
    fn name(&self) -> &'static str {
        "map_functions"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        let mut out = input.to_owned();
        for (pattern, replacement) in &self.rows {
            out = pattern.replace_all(&out, *replacement).into_owned();
        }
        Ok(out)
    }
}

/// `(A)/(B)` -> `\frac{A}{B}` anywhere; a bare `N/D` only directly after an
/// `=`. Every other `/` stays literal.
pub struct NormalizeFractions {
    paren_ratio: Regex,
    eq_ratio: Regex,
}

impl NormalizeFractions {
    pub fn new() -> Result<Self, PassError> {
        Ok(Self {
            paren_ratio: compile(r"\(([^)]+)\)/\(([^)]+)\)")?,
            // Trailing whitespace/end is captured and re-emitted because the
            // engine has no lookahead.
            eq_ratio: compile(r"([^=]+=\s*)([^/\s]+)/([^/\s]+)(\s|$)")?,
        })
    }
}

impl RewritePass for NormalizeFractions {
    fn name(&self) -> &'static str {
        "normalize_fractions"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        let out = self.paren_ratio.replace_all(input, r"\frac{${1}}{${2}}");
        let out = self.eq_ratio.replace_all(&out, r"${1}\frac{${2}}{${3}}${4}");
        Ok(out.into_owned())
    }
}

/// `<=`, `>=`, `<`, `>` to LaTeX relations. Two-character operators are
/// replaced before their one-character prefixes.
pub struct MapRelationalOps;

impl RewritePass for MapRelationalOps {
    fn name(&self) -> &'static str {
        "map_relational_ops"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        Ok(input
            .replace("<=", r"\le")
            .replace(">=", r"\ge")
            .replace('<', r"\lt")
            .replace('>', r"\gt"))
    }
}

/// Spell ASCII Greek-letter names and the literal characters θ and π as
/// LaTeX macros.
pub struct MapGreekSymbols {
    names: Regex,
}

impl MapGreekSymbols {
    pub fn new() -> Result<Self, PassError> {
        let pattern = format!(r"\b({})\b", GREEK_NAMES.join("|"));
        Ok(Self {
            names: compile(&pattern)?,
        })
    }
}

impl RewritePass for MapGreekSymbols {
    fn name(&self) -> &'static str {
        "map_greek_symbols"
    }

    fn apply(&self, input: &str) -> Result<String, PassError> {
        let out = self.names.replace_all(input, r"\${1}");
        Ok(out.replace('θ', r"\theta").replace('π', r"\pi"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pass: &dyn RewritePass, input: &str) -> String {
        pass.apply(input).unwrap()
    }

    #[test]
    fn brackets_bare_function_arguments() {
        let pass = BracketFunctionArgs::new().unwrap();
        assert_eq!(run(&pass, "sinx"), "sin(x)");
        assert_eq!(run(&pass, "sinhx"), "sinh(x)");
        assert_eq!(run(&pass, "asinx"), "asin(x)");
        assert_eq!(run(&pass, "floorx"), "floor(x)");
        assert_eq!(run(&pass, "lnx + logy"), "ln(x) + log(y)");
        assert_eq!(run(&pass, "sinx + cosx"), "sin(x) + cos(x)");
    }

    #[test]
    fn bracketing_leaves_explicit_calls_alone() {
        let pass = BracketFunctionArgs::new().unwrap();
        assert_eq!(run(&pass, "sin(x)"), "sin(x)");
        assert_eq!(run(&pass, "sqrt(x+1)"), "sqrt(x+1)");
    }

    #[test]
    fn bracketing_needs_a_word_boundary() {
        let pass = BracketFunctionArgs::new().unwrap();
        // No boundary between `x` and `s`, so nothing to bracket.
        assert_eq!(run(&pass, "xsinx"), "xsinx");
    }

    #[test]
    fn inserts_multiplication_for_adjacency() {
        let pass = InsertImplicitMul::new().unwrap();
        assert_eq!(run(&pass, "2x"), "2*x");
        assert_eq!(run(&pass, "x2"), "x*2");
        assert_eq!(run(&pass, "(x+1)2"), "(x+1)*2");
        assert_eq!(run(&pass, "(x+1)y"), "(x+1)*y");
        assert_eq!(run(&pass, "2(x+1)"), "2*(x+1)");
        assert_eq!(run(&pass, "x(y)"), "x*(y)");
    }

    #[test]
    fn call_parentheses_are_not_multiplication() {
        let pass = InsertImplicitMul::new().unwrap();
        assert_eq!(run(&pass, "sin(x)"), "sin(x)");
        assert_eq!(run(&pass, "2sin(x)"), "2*sin(x)");
        assert_eq!(run(&pass, "sqrt(2)"), "sqrt(2)");
        assert_eq!(run(&pass, "log(x) + x(1)"), "log(x) + x*(1)");
    }

    #[test]
    fn greek_characters_do_not_trigger_multiplication() {
        let pass = InsertImplicitMul::new().unwrap();
        assert_eq!(run(&pass, "3θ"), "3θ");
    }

    #[test]
    fn double_star_becomes_caret() {
        assert_eq!(run(&NormalizePowers, "x**2"), "x^2");
        assert_eq!(run(&NormalizePowers, "2**x**2"), "2^x^2");
        assert_eq!(run(&NormalizePowers, "x^2"), "x^2");
    }

    #[test]
    fn maps_calls_to_latex_commands() {
        let pass = MapFunctions::new().unwrap();
        assert_eq!(run(&pass, "sin(x)"), r"\sin\left(x\right)");
        assert_eq!(run(&pass, "asin(x)"), r"\arcsin\left(x\right)");
        assert_eq!(run(&pass, "sinh(t)"), r"\sinh\left(t\right)");
        assert_eq!(run(&pass, "sqrt(x+1)"), r"\sqrt{x+1}");
        assert_eq!(run(&pass, "exp(x)"), "e^{x}");
        assert_eq!(run(&pass, "abs(x-1)"), r"\left|x-1\right|");
    }

    #[test]
    fn unmapped_names_pass_through() {
        let pass = MapFunctions::new().unwrap();
        assert_eq!(run(&pass, "floor(x)"), "floor(x)");
        assert_eq!(run(&pass, "ceil(x)"), "ceil(x)");
    }

    #[test]
    fn parenthesized_ratio_becomes_frac() {
        let pass = NormalizeFractions::new().unwrap();
        assert_eq!(run(&pass, "(a)/(b)"), r"\frac{a}{b}");
        assert_eq!(run(&pass, "(x+1)/(x-1)"), r"\frac{x+1}{x-1}");
    }

    #[test]
    fn bare_ratio_needs_an_equals_sign() {
        let pass = NormalizeFractions::new().unwrap();
        assert_eq!(run(&pass, "y = 1/x"), r"y = \frac{1}{x}");
        assert_eq!(run(&pass, "1/x"), "1/x");
        assert_eq!(run(&pass, "y = a/b + c/d"), r"y = \frac{a}{b} + c/d");
    }

    #[test]
    fn relational_operators_map_longest_first() {
        assert_eq!(run(&MapRelationalOps, "x <= 1"), r"x \le 1");
        assert_eq!(run(&MapRelationalOps, "x >= y > z"), r"x \ge y \gt z");
        assert_eq!(run(&MapRelationalOps, "a < b"), r"a \lt b");
    }

    #[test]
    fn greek_names_need_word_boundaries() {
        let pass = MapGreekSymbols::new().unwrap();
        assert_eq!(run(&pass, "2*pi"), r"2*\pi");
        assert_eq!(run(&pass, "theta + phi"), r"\theta + \phi");
        assert_eq!(run(&pass, "pie"), "pie");
        assert_eq!(run(&pass, "spin"), "spin");
    }

    #[test]
    fn literal_greek_characters_map_too() {
        let pass = MapGreekSymbols::new().unwrap();
        assert_eq!(run(&pass, "3θ"), r"3\theta");
        assert_eq!(run(&pass, "π/2"), r"\pi/2");
    }

    #[test]
    fn call_detection_checks_the_text_before_the_parenthesis() {
        assert!(ends_with_function_name("sin"));
        assert!(ends_with_function_name("2*sin"));
        assert!(ends_with_function_name("x+sqrt"));
        assert!(!ends_with_function_name("x"));
        assert!(!ends_with_function_name(""));
    }
}
