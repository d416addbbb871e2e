use thiserror::Error;

/// Errors raised while building or walking a chain.
#[derive(Debug, Error)]
pub enum MarkovError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// The walk reached a window the build never recorded. This breaks the
	/// build/generate handoff and aborts the run.
	#[error("Internal consistency fault: no state for prefix ({0})")]
	MissingState(String),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
