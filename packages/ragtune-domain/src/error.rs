pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Row columns must be aligned: {column} has {actual} values, expected {expected}.")]
	MisalignedColumns { column: &'static str, expected: usize, actual: usize },
	#[error(transparent)]
	Regex(#[from] regex::Error),
}
