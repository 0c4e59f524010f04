use crate::SigilError;
use crate::tokens::Argument;
use crate::tokens::OrderedFloat;
use crate::tokens::Token;
use crate::value::TokenMap;
use crate::value::Value;

/// Build an expected token for scanner assertions.
pub fn token(
	path: &[&str],
	args: Option<Vec<Argument>>,
	suffix: &str,
	start: usize,
	end: usize,
) -> Token {
	Token {
		path: path.iter().map(ToString::to_string).collect(),
		args,
		suffix: suffix.to_string(),
		start,
		end,
	}
}

pub fn string_arg(value: &str) -> Argument {
	Argument::String(value.to_string())
}

pub fn number_arg(value: f64) -> Argument {
	Argument::Number(OrderedFloat(value))
}

pub fn boolean_arg(value: bool) -> Argument {
	Argument::Boolean(value)
}

/// The flat map used across the engine and project tests.
pub fn color_map() -> TokenMap {
	TokenMap::from([("color", "blue"), ("pad", "2rem")])
}

/// A nested map with a callable spacing scale and a deliberate null.
pub fn theme_map() -> TokenMap {
	let theme = TokenMap::new()
		.with("primary", "#0af")
		.with("secondary", "#f50");

	TokenMap::new()
		.with("theme", theme)
		.with("spacing", spacing_func())
		.with("shadow", Value::Null)
}

/// Multiplies the 8px base step by the first numeric argument.
pub fn spacing_func() -> Value {
	Value::func(|args| {
		let factor = args.first().and_then(Argument::as_number).unwrap_or(1.0);
		Ok(Value::Number(factor * 8.0))
	})
}

/// Sums every numeric argument.
pub fn sum_func() -> Value {
	Value::func(|args| {
		let total: f64 = args.iter().filter_map(Argument::as_number).sum();
		Ok(Value::Number(total))
	})
}

/// Always fails, for invocation-error tests.
pub fn failing_func() -> Value {
	Value::func(|_| {
		Err(SigilError::Invocation {
			path: "broken".to_string(),
			reason: "boom".to_string(),
		})
	})
}
