use std::fmt;

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, MapAccess, SeqAccess, Visitor},
	ser::{SerializeMap, SerializeSeq},
};

/// A configuration leaf or container.
///
/// `Tuple` never comes out of a deserializer; it is produced by literal coercion and is treated
/// as one opaque value by [`crate::expand`], while `List` is a set of candidates.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	Tuple(Vec<ParamValue>),
	List(Vec<ParamValue>),
	Map(ParamMap),
}
impl ParamValue {
	/// Whether the value can take part in duplicate removal.
	///
	/// Lists and maps cannot. A tuple can when all of its elements can.
	pub fn is_hashable(&self) -> bool {
		match self {
			Self::List(_) | Self::Map(_) => false,
			Self::Tuple(items) => items.iter().all(Self::is_hashable),
			_ => true,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(value) => Some(value),
			_ => None,
		}
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for ParamValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl<T> From<Vec<T>> for ParamValue
where
	T: Into<ParamValue>,
{
	fn from(values: Vec<T>) -> Self {
		Self::List(values.into_iter().map(Into::into).collect())
	}
}

impl From<ParamMap> for ParamValue {
	fn from(value: ParamMap) -> Self {
		Self::Map(value)
	}
}

impl Serialize for ParamValue {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Float(value) => serializer.serialize_f64(*value),
			Self::Str(value) => serializer.serialize_str(value),
			Self::Tuple(items) | Self::List(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;

				for item in items {
					seq.serialize_element(item)?;
				}

				seq.end()
			},
			Self::Map(map) => map.serialize(serializer),
		}
	}
}

impl<'de> Deserialize<'de> for ParamValue {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_any(ParamValueVisitor)
	}
}

struct ParamValueVisitor;
impl<'de> Visitor<'de> for ParamValueVisitor {
	type Value = ParamValue;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a configuration value")
	}

	fn visit_bool<E>(self, value: bool) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Bool(value))
	}

	fn visit_i64<E>(self, value: i64) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Int(value))
	}

	fn visit_u64<E>(self, value: u64) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(i64::try_from(value).map(ParamValue::Int).unwrap_or(ParamValue::Float(value as f64)))
	}

	fn visit_f64<E>(self, value: f64) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Float(value))
	}

	fn visit_str<E>(self, value: &str) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Str(value.to_string()))
	}

	fn visit_string<E>(self, value: String) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Str(value))
	}

	fn visit_unit<E>(self) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Null)
	}

	fn visit_none<E>(self) -> Result<ParamValue, E>
	where
		E: de::Error,
	{
		Ok(ParamValue::Null)
	}

	fn visit_some<D>(self, deserializer: D) -> Result<ParamValue, D::Error>
	where
		D: Deserializer<'de>,
	{
		ParamValue::deserialize(deserializer)
	}

	fn visit_seq<A>(self, mut seq: A) -> Result<ParamValue, A::Error>
	where
		A: SeqAccess<'de>,
	{
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));

		while let Some(item) = seq.next_element()? {
			items.push(item);
		}

		Ok(ParamValue::List(items))
	}

	fn visit_map<A>(self, access: A) -> Result<ParamValue, A::Error>
	where
		A: MapAccess<'de>,
	{
		ParamMapVisitor.visit_map(access).map(ParamValue::Map)
	}
}

/// A string-keyed map that keeps insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamMap {
	entries: Vec<(String, ParamValue)>,
}
impl ParamMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.entries.iter().find(|(name, _)| name == key).map(|(_, value)| value)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Binds `key` to `value`, keeping the key's original position when it already exists.
	pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
		let key = key.into();

		match self.entries.iter_mut().find(|(name, _)| *name == key) {
			Some((_, slot)) => Some(std::mem::replace(slot, value)),
			None => {
				self.entries.push((key, value));

				None
			},
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub fn values_mut(&mut self) -> impl Iterator<Item = &mut ParamValue> {
		self.entries.iter_mut().map(|(_, value)| value)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(key, _)| key.as_str())
	}
}

impl<K> FromIterator<(K, ParamValue)> for ParamMap
where
	K: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, ParamValue)>,
	{
		let mut map = Self::new();

		for (key, value) in iter {
			map.insert(key, value);
		}

		map
	}
}

impl IntoIterator for ParamMap {
	type IntoIter = std::vec::IntoIter<(String, ParamValue)>;
	type Item = (String, ParamValue);

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl Serialize for ParamMap {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;

		for (key, value) in &self.entries {
			map.serialize_entry(key, value)?;
		}

		map.end()
	}
}

impl<'de> Deserialize<'de> for ParamMap {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(ParamMapVisitor)
	}
}

struct ParamMapVisitor;
impl<'de> Visitor<'de> for ParamMapVisitor {
	type Value = ParamMap;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a map of configuration values")
	}

	fn visit_map<A>(self, mut access: A) -> Result<ParamMap, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut map = ParamMap::new();

		while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
			map.insert(key, value);
		}

		Ok(map)
	}
}
