//! Exclusive render sessions over a pluggable graph engine.
//!
//! Rendering drives one shared page, so at most one render may be in flight;
//! everyone else queues. The engine itself stays a trait seam: tests script
//! it, production wires in the real page driver.

use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

use crate::request::{GraphRequest, LabelSize, RequestWarning};
use crate::script::{set_bounds_script, set_expression_script};
use crate::viewport::MathBounds;

/// How many times a recoverable failure is retried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// What one render attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Finished graph as raster bytes.
    Image(Vec<u8>),
    /// Transient failure; another attempt may succeed.
    Retry { reason: String },
    /// Permanent failure; report it, do not retry.
    Failed { reason: String },
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("render failed: {0}")]
    Render(String),
    #[error("gave up after {attempts} attempts: {reason}")]
    RetriesExhausted { attempts: usize, reason: String },
    #[error("render session poisoned by an earlier panic")]
    Poisoned,
}

/// Everything an engine needs to render one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    /// Translated expression, ready for the calculator.
    pub latex: String,
    /// Script loading the expression into the right calculator.
    pub expression_script: String,
    /// Script applying the zoomed viewport; `None` at the default zoom and
    /// for 3-D graphs.
    pub bounds_script: Option<String>,
    pub label_size: LabelSize,
    /// Sanitization notes to pass on to the user.
    pub warnings: Vec<RequestWarning>,
}

impl RenderJob {
    /// Translate the request's expression and prepare the page scripts.
    pub fn prepare(request: &GraphRequest) -> RenderJob {
        let (request, warnings) = request.clone().sanitized();
        let latex = gratex_latex::translate(&request.expression);
        let expression_script = set_expression_script(request.mode, &latex);
        let bounds_script = (request.mode.supports_zoom() && !request.zoom.is_default())
            .then(|| set_bounds_script(&MathBounds::for_zoom(request.zoom)));
        RenderJob {
            latex,
            expression_script,
            bounds_script,
            label_size: request.label_size,
            warnings,
        }
    }
}

/// The engine seam: whatever actually drives the graphing page.
pub trait GraphEngine {
    fn submit(&mut self, job: &RenderJob) -> RenderOutcome;
}

/// Exclusive, serialized access to one engine. Callers queue on the inner
/// lock; each render owns the engine for its whole attempt sequence.
pub struct Session<E> {
    engine: Mutex<E>,
    max_attempts: usize,
}

impl<E: GraphEngine> Session<E> {
    pub fn new(engine: E) -> Self {
        Session {
            engine: Mutex::new(engine),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(engine: E, max_attempts: usize) -> Self {
        Session {
            engine: Mutex::new(engine),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Render one job, retrying recoverable failures up to the attempt
    /// budget.
    pub fn render(&self, job: &RenderJob) -> Result<Vec<u8>, SessionError> {
        let mut engine = self.engine.lock().map_err(|_| SessionError::Poisoned)?;
        let mut last_reason = String::new();
        for attempt in 1..=self.max_attempts {
            match engine.submit(job) {
                RenderOutcome::Image(image) => {
                    debug!(attempt, "render finished");
                    return Ok(image);
                }
                RenderOutcome::Retry { reason } => {
                    warn!(attempt, max = self.max_attempts, reason = %reason, "render attempt failed");
                    last_reason = reason;
                }
                RenderOutcome::Failed { reason } => {
                    return Err(SessionError::Render(reason));
                }
            }
        }
        Err(SessionError::RetriesExhausted {
            attempts: self.max_attempts,
            reason: last_reason,
        })
    }
}
