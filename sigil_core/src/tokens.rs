use std::fmt::Display;

use serde::Serialize;

/// One located placeholder occurrence in source text.
///
/// The byte span covers the entire matched construct — sigil, path,
/// argument list, and suffix. The suffix is also recorded separately so the
/// engine can decide whether to re-emit it after substitution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
	/// The dotted key path, e.g. `["theme", "primary"]` for `$theme.primary`.
	pub path: Vec<String>,
	/// Literal arguments from a call-style list, e.g. `$scale(2, "rem")`.
	/// `None` when no argument list is present in source; `Some(vec![])` for
	/// an empty list `()`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub args: Option<Vec<Argument>>,
	/// Trailing unit-like run (e.g. `px`, `%`), re-emitted after the
	/// substituted value unless the value is the absence marker.
	pub suffix: String,
	/// Byte offset of the sigil in the normalized input.
	pub start: usize,
	/// Byte offset one past the end of the construct (suffix included).
	pub end: usize,
}

impl Token {
	/// The path rendered back to its dotted source form.
	pub fn dotted_path(&self) -> String {
		self.path.join(".")
	}
}

/// A literal argument inside a token's call-style argument list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Argument {
	/// A quoted string value, e.g. `"hello"` or `'world'`.
	String(String),
	/// A numeric value (integer or float), e.g. `42` or `3.14`.
	Number(OrderedFloat),
	/// A boolean value: `true` or `false`.
	Boolean(bool),
}

impl Display for Argument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Argument::String(value) => write!(f, "{value}"),
			Argument::Number(value) => write!(f, "{value}"),
			Argument::Boolean(value) => write!(f, "{value}"),
		}
	}
}

impl Argument {
	/// The argument as an `f64` when it is numeric.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Argument::Number(value) => Some(value.0),
			_ => None,
		}
	}

	/// The argument as a `&str` when it is a string.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Argument::String(value) => Some(value.as_str()),
			_ => None,
		}
	}
}

/// A float wrapper that implements `PartialEq` via approximate comparison,
/// allowing `Argument` to derive `PartialEq` cleanly.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
	fn eq(&self, other: &Self) -> bool {
		float_cmp::approx_eq!(f64, self.0, other.0)
	}
}

impl Display for OrderedFloat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<f64> for OrderedFloat {
	fn from(value: f64) -> Self {
		Self(value)
	}
}
