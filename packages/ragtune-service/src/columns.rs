//! Maps raw operation results into named columns, decoupled from the transforms that produce
//! them.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

pub type Columns = Map<String, Value>;

/// Names the parts of `results`.
///
/// With one name the whole result becomes that column. With several, `results` must serialize to
/// a sequence with exactly one element per name.
pub fn to_columns<T>(names: &[&str], results: T) -> Result<Columns>
where
	T: Serialize,
{
	let value = serde_json::to_value(results)?;

	if let [name] = names {
		return Ok(Columns::from_iter([(name.to_string(), value)]));
	}

	let Value::Array(parts) = value else {
		return Err(Error::InvalidRequest {
			message: format!("{} column names need a sequence of results.", names.len()),
		});
	};

	if parts.len() != names.len() {
		return Err(Error::InvalidRequest {
			message: format!("Got {} results for {} column names.", parts.len(), names.len()),
		});
	}

	Ok(names.iter().map(|name| name.to_string()).zip(parts).collect())
}

/// Runs `op` and names its output with [`to_columns`].
pub fn tabulate<F, T>(names: &[&str], op: F) -> Result<Columns>
where
	F: FnOnce() -> Result<T>,
	T: Serialize,
{
	to_columns(names, op()?)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn single_name_takes_the_whole_result() {
		let columns = to_columns(&["retrieved_ids"], vec![vec!["a", "b"], vec!["c"]]).unwrap();

		assert_eq!(Value::Object(columns), json!({ "retrieved_ids": [["a", "b"], ["c"]] }));
	}

	#[test]
	fn several_names_zip_with_result_parts() {
		let columns = tabulate(&["contents", "ids", "scores"], || {
			Ok((vec![vec!["x"]], vec![vec!["d1"]], vec![vec![0.5]]))
		})
		.unwrap();

		assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["contents", "ids", "scores"]);
		assert_eq!(columns["scores"], json!([[0.5]]));
	}

	#[test]
	fn mismatched_part_count_is_rejected() {
		let err = to_columns(&["a", "b", "c"], (1, 2)).unwrap_err();

		assert!(matches!(err, Error::InvalidRequest { .. }));
	}

	#[test]
	fn operation_errors_pass_through() {
		let err = tabulate(&["a"], || -> Result<Vec<u8>> {
			Err(Error::NotFound { message: "x".to_string() })
		})
		.unwrap_err();

		assert!(matches!(err, Error::NotFound { .. }));
	}
}
