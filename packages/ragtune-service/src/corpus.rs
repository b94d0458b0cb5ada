use std::collections::HashMap;

use serde_json::Value;

use crate::{KeyedStore, Result, Row};

/// An in-memory corpus table keyed by one string column.
///
/// When several rows share a key, the first one wins.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
	rows: Vec<Row>,
	by_id: HashMap<String, usize>,
}
impl MemoryCorpus {
	pub fn new(id_column: &str, rows: Vec<Row>) -> Self {
		let mut by_id = HashMap::with_capacity(rows.len());

		for (position, row) in rows.iter().enumerate() {
			if let Some(Value::String(id)) = row.get(id_column) {
				by_id.entry(id.clone()).or_insert(position);
			}
		}

		Self { rows, by_id }
	}

	pub fn from_config(cfg: &ragtune_config::Corpus, rows: Vec<Row>) -> Self {
		Self::new(&cfg.id_column, rows)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl KeyedStore for MemoryCorpus {
	fn fetch(&self, ids: &[&str]) -> Result<Vec<Option<Row>>> {
		Ok(ids
			.iter()
			.map(|id| self.by_id.get(*id).map(|&position| self.rows[position].clone()))
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn row(value: Value) -> Row {
		value.as_object().cloned().unwrap()
	}

	#[test]
	fn first_row_wins_for_duplicate_keys() {
		let corpus = MemoryCorpus::new("doc_id", vec![
			row(json!({ "doc_id": "a", "contents": "first" })),
			row(json!({ "doc_id": "a", "contents": "second" })),
			row(json!({ "doc_id": 7, "contents": "numeric key" })),
		]);
		let fetched = corpus.fetch(&["a", "missing"]).unwrap();

		assert_eq!(fetched[0].as_ref().and_then(|r| r.get("contents")), Some(&json!("first")));
		assert!(fetched[1].is_none());
		assert_eq!(corpus.len(), 3);
	}
}
