pub mod rows;
pub mod text;

mod error;

pub use error::{Error, Result};
