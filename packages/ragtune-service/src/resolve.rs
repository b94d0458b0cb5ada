//! Resolution of document ids to corpus column values.

use serde_json::Value;

use crate::{Error, KeyedStore, Result, Row};

/// Resolves one id to the value of `column` in its row.
///
/// The empty id means no reference was requested and resolves to `None`.
pub fn resolve_one<S>(store: &S, id: &str, column: &str) -> Result<Option<Value>>
where
	S: KeyedStore + ?Sized,
{
	if id.is_empty() {
		return Ok(None);
	}

	let row = store.fetch(&[id])?.into_iter().next().flatten();

	column_value(id, row, column).map(Some)
}

/// Resolves every id of every row with a single store fetch and keeps the ragged shape.
///
/// Empty ids resolve to `None`. An empty input row comes back as `[None]`.
pub fn resolve_many<S>(
	store: &S,
	ids: Vec<Vec<String>>,
	column: &str,
) -> Result<Vec<Vec<Option<Value>>>>
where
	S: KeyedStore + ?Sized,
{
	let resolved = ragtune_ragged::flatten_apply(ids, |flat: Vec<Option<String>>| {
		let requested: Vec<&str> =
			flat.iter().flatten().map(String::as_str).filter(|id| !id.is_empty()).collect();
		let mut rows = store.fetch(&requested)?.into_iter();

		if rows.len() != requested.len() {
			return Err(Error::Store {
				message: format!("Store returned {} rows for {} ids.", rows.len(), requested.len()),
			});
		}

		flat.iter()
			.map(|id| match id.as_deref() {
				None | Some("") => Ok(None),
				Some(id) => column_value(id, rows.next().flatten(), column).map(Some),
			})
			.collect::<Result<Vec<_>>>()
	})?;

	Ok(resolved)
}

fn column_value(id: &str, row: Option<Row>, column: &str) -> Result<Value> {
	let Some(mut row) = row else {
		return Err(Error::NotFound { message: format!("doc_id {id} not found in corpus.") });
	};

	row.remove(column).ok_or_else(|| Error::InvalidRequest {
		message: format!("Corpus row {id} has no column {column}."),
	})
}
