//! Translation of human-typed graphing shorthand into LaTeX.
//!
//! The entry point is [`translate`]: `sin(x)` becomes `\sin\left(x\right)`,
//! `sqrt(x^2+1)` becomes `\sqrt{x^2+1}`, `x>=2` becomes `x\ge2`, and text
//! that already contains a backslash is passed through unchanged. The
//! rewrite is best-effort: whatever it does not recognize is left exactly
//! as typed.
//!
//! [`escape_for_embedding`] prepares a translated expression for
//! interpolation into a generated script or JSON payload.

pub mod error;
pub mod escape;
pub mod passes;
pub mod translator;

pub use error::PassError;
pub use escape::{escape_for_embedding, unescape_embedded};
pub use passes::RewritePass;
pub use translator::{translate, Translator};
