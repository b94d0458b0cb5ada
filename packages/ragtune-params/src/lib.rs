//! Parameter spaces: the value model, literal coercion, dictionary normalization, and
//! combination expansion.

pub mod combination;
pub mod literal;
pub mod normalize;
pub mod value;

mod error;

pub use combination::expand;
pub use error::{Error, Result};
pub use literal::parse_literal;
pub use normalize::{
	coerce_parenthesized_strings, filter_keys, replace_key, substitute_environment,
	substitute_environment_with,
};
pub use value::{ParamMap, ParamValue};
