//! JSON output types for the non-interactive CLI API.
//!
//! These structures back the `--format json` flag of `translate` and
//! `payload`, for scripting and notebook use.

use gratex_payload::{GraphMode, RequestWarning};
use serde::Serialize;

/// Version of the JSON output shapes below.
pub const SCHEMA_VERSION: u32 = 1;

/// Result of `translate --format json`.
#[derive(Serialize, Debug)]
pub struct TranslateJsonOutput {
    pub schema_version: u32,
    pub source: String,
    pub latex: String,
    /// Backslash-escaped LaTeX, ready for script interpolation.
    pub escaped: String,
}

/// Result of `payload --format json`.
#[derive(Serialize, Debug)]
pub struct PayloadJsonOutput {
    pub schema_version: u32,
    pub mode: GraphMode,
    pub label_size: u8,
    pub zoom: i8,
    pub latex: String,
    /// The `{"latex": …}` object the calculator accepts.
    pub expression_json: serde_json::Value,
    pub expression_script: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds_script: Option<String>,
    pub warnings: Vec<RequestWarning>,
}
