pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Paired sequences must have the same length: expected {expected}, got {actual}.")]
	LengthMismatch { expected: usize, actual: usize },
	#[error("Declared row lengths sum to {declared} but the flat sequence has {actual} elements.")]
	ShapeMismatch { declared: usize, actual: usize },
	#[error("batch_size must be greater than zero.")]
	InvalidBatchSize,
}

/// Failure of [`crate::flatten_apply`], either in the shape contract or inside the transform.
#[derive(Debug, thiserror::Error)]
pub enum FlattenApplyError<E> {
	#[error(transparent)]
	Shape(#[from] Error),
	#[error(transparent)]
	Transform(E),
}
