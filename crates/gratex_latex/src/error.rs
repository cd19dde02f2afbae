use thiserror::Error;

/// Failure of a single rewrite pass. The pipeline treats any of these as
/// "skip this pass and keep going", never as a hard error.
#[derive(Error, Debug)]
pub enum PassError {
    #[error("Pattern error: {0}")]
    Pattern(String),
    #[error("Rewrite error: {0}")]
    Rewrite(String),
}
