pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Store error: {message}")]
	Store { message: String },
	#[error("Shape error: {message}")]
	Shape { message: String },
	#[error(transparent)]
	Tokenizer(#[from] ragtune_tokenize::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
}
impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<ragtune_ragged::Error> for Error {
	fn from(err: ragtune_ragged::Error) -> Self {
		match err {
			ragtune_ragged::Error::InvalidBatchSize =>
				Self::InvalidRequest { message: err.to_string() },
			ragtune_ragged::Error::LengthMismatch { .. }
			| ragtune_ragged::Error::ShapeMismatch { .. } => Self::Shape { message: err.to_string() },
		}
	}
}

impl From<ragtune_ragged::FlattenApplyError<Error>> for Error {
	fn from(err: ragtune_ragged::FlattenApplyError<Error>) -> Self {
		match err {
			ragtune_ragged::FlattenApplyError::Shape(inner) => inner.into(),
			ragtune_ragged::FlattenApplyError::Transform(inner) => inner,
		}
	}
}

impl From<ragtune_executor::Error<Error>> for Error {
	fn from(err: ragtune_executor::Error<Error>) -> Self {
		match err {
			ragtune_executor::Error::InvalidBatchSize =>
				Self::InvalidRequest { message: err.to_string() },
			ragtune_executor::Error::TaskFailure { source, .. } => source,
		}
	}
}
