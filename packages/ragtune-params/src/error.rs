pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Malformed literal {input:?}: {message}")]
	MalformedLiteral { input: String, message: String },
	#[error("Key {key:?} not found.")]
	MissingKey { key: String },
	#[error(transparent)]
	Regex(#[from] regex::Error),
}
