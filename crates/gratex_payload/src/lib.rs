//! Request model and page payloads for the GraTeX graphing page.
//!
//! This crate turns a user's expression plus options into everything the
//! page automation needs: validated request data, the viewport bounds for a
//! zoom level, the page-context scripts, and a serialized render session
//! with explicit retry semantics. It contains no automation itself.

pub mod request;
pub mod script;
pub mod session;
pub mod viewport;

pub use request::{GraphMode, GraphRequest, LabelSize, RequestError, RequestWarning, ZoomLevel};
pub use script::{expression_json, expression_value, set_bounds_script, set_expression_script};
pub use session::{
    GraphEngine, RenderJob, RenderOutcome, Session, SessionError, DEFAULT_MAX_ATTEMPTS,
};
pub use viewport::MathBounds;
