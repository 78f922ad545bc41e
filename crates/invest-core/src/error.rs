//! Error contract between tools and the agent runtime

use thiserror::Error;

/// Result alias for tool invocations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure surfaced to the agent runtime by the tool layer
///
/// Data problems inside an investment lookup never reach this type; the
/// tool implementations fold those into error envelopes. What remains is
/// addressing failures and genuine processing faults.
#[derive(Debug, Error)]
pub enum Error {
    /// No tool is registered under the requested name
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A tool failed while processing its input
    #[error("tool processing failed: {0}")]
    ProcessingFailed(String),
}
