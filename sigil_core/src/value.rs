use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::SigilResult;
use crate::tokens::Argument;

/// A callable token value. Invoked with the token's argument list (empty
/// when the source has no argument list) and produces another value.
pub type TokenFn = Arc<dyn Fn(&[Argument]) -> SigilResult<Value> + Send + Sync>;

/// A value held by a token map.
///
/// Represented as an explicit tagged variant so the resolver dispatches on
/// the tag rather than inspecting runtime types.
#[derive(Clone, Default)]
pub enum Value {
	/// The absence marker. Renders as nothing and suppresses the suffix.
	#[default]
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	/// A nested map, traversed by multi-segment paths.
	Map(TokenMap),
	/// A callable value-producer.
	Func(TokenFn),
}

impl Value {
	/// Wrap a closure as a callable value.
	pub fn func<F>(func: F) -> Self
	where
		F: Fn(&[Argument]) -> SigilResult<Value> + Send + Sync + 'static,
	{
		Value::Func(Arc::new(func))
	}

	/// A short noun for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "boolean",
			Value::Number(_) => "number",
			Value::String(_) => "string",
			Value::Map(_) => "map",
			Value::Func(_) => "function",
		}
	}

	/// Render the value as output text. `None` for maps and functions,
	/// which have no textual form.
	pub(crate) fn render(&self) -> Option<String> {
		match self {
			Value::Null => Some(String::new()),
			Value::Bool(value) => Some(value.to_string()),
			Value::Number(value) => Some(value.to_string()),
			Value::String(value) => Some(value.clone()),
			Value::Map(_) | Value::Func(_) => None,
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("Null"),
			Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
			Value::Number(value) => f.debug_tuple("Number").field(value).finish(),
			Value::String(value) => f.debug_tuple("String").field(value).finish(),
			Value::Map(value) => f.debug_tuple("Map").field(value).finish(),
			Value::Func(_) => f.write_str("Func(..)"),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(value as f64)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(f64::from(value))
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<TokenMap> for Value {
	fn from(value: TokenMap) -> Self {
		Value::Map(value)
	}
}

/// A lookup source mapping string keys to values. Multiple maps may be
/// supplied as an ordered slice; resolution is first-map-wins per path.
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct TokenMap(HashMap<String, Value>);

impl TokenMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insertion for literal map construction.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}
}

impl<K, V> FromIterator<(K, V)> for TokenMap
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for TokenMap
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}
