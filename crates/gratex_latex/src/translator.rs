//! The translation pipeline: an ordered sequence of rewrite passes applied
//! to one expression string.

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::PassError;
use crate::passes::{
    BracketFunctionArgs, InsertImplicitMul, MapFunctions, MapGreekSymbols, MapRelationalOps,
    NormalizeFractions, NormalizePowers, RewritePass,
};

/// Turns graphing shorthand (`sinx`, `2x`, `(a)/(b)`, `x>=2`, `pi`) into
/// LaTeX the calculator accepts. Input that already contains a backslash is
/// considered LaTeX and returned untouched.
///
/// The translator is stateless after construction and safe to share across
/// threads; [`translate`] uses one process-wide instance.
pub struct Translator {
    passes: Vec<Box<dyn RewritePass>>,
}

static DEFAULT_TRANSLATOR: Lazy<Translator> = Lazy::new(Translator::new);

impl Translator {
    pub fn new() -> Self {
        let mut passes: Vec<Box<dyn RewritePass>> = Vec::new();
        // CRITICAL ORDER: function names are recognized and bracketed before
        // generic `*` insertion; structural rewrites (calls, fractions) run
        // before the purely lexical relation and Greek substitutions.
        add(&mut passes, BracketFunctionArgs::new());
        add(&mut passes, InsertImplicitMul::new());
        passes.push(Box::new(NormalizePowers));
        add(&mut passes, MapFunctions::new());
        add(&mut passes, NormalizeFractions::new());
        passes.push(Box::new(MapRelationalOps));
        add(&mut passes, MapGreekSymbols::new());
        Translator { passes }
    }

    /// Translate one expression. Never fails: a pass that reports an error
    /// is skipped and the best-effort result of the remaining passes is
    /// returned.
    pub fn translate(&self, source: &str) -> String {
        if source.contains('\\') {
            return source.to_owned();
        }
        let mut current = source.to_owned();
        for pass in &self.passes {
            match pass.apply(&current) {
                Ok(next) => {
                    if next != current {
                        debug!(pass = pass.name(), from = %current, to = %next, "rewrite");
                        current = next;
                    }
                }
                Err(e) => {
                    warn!(pass = pass.name(), error = %e, "pass skipped");
                }
            }
        }
        current
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Push a pass, or disable it when its patterns failed to build.
fn add<P: RewritePass + 'static>(
    passes: &mut Vec<Box<dyn RewritePass>>,
    built: Result<P, PassError>,
) {
    match built {
        Ok(pass) => passes.push(Box::new(pass)),
        Err(e) => warn!(error = %e, "rewrite pass disabled"),
    }
}

/// Translate with the process-wide default [`Translator`].
pub fn translate(source: &str) -> String {
    DEFAULT_TRANSLATOR.translate(source)
}
