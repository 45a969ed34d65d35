//! Errors at the data-source boundary. The graph builder and layout engine
//! have no failure modes of their own.

use thiserror::Error;

/// Failure to obtain or decode a dataset document.
#[derive(Error, Debug)]
pub enum LoadError {
	/// The request could not be issued or the transport failed.
	#[error("request failed: {0}")]
	Request(String),

	/// The server answered with a non-success status.
	#[error("HTTP {0}")]
	Status(u16),

	/// The response body could not be read as text.
	#[error("unreadable response body: {0}")]
	Body(String),

	/// The document is not a valid dataset.
	#[error("invalid dataset document: {0}")]
	Parse(#[from] serde_json::Error),
}
