use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("Config is not valid TOML: {0}")]
	Syntax(#[from] toml::de::Error),
	#[error("{message}")]
	Validation { message: String },
}
