use crate::SigilError;
use crate::SigilResult;
use crate::tokens::Argument;
use crate::value::Value;

/// Evaluate a looked-up value against a token's argument list.
///
/// A callable is invoked with the arguments (empty when the source has no
/// argument list) and its failure surfaces as an invocation error. Supplying
/// an argument list against a non-callable value is an error; a non-callable
/// value without arguments passes through unchanged.
pub fn resolve(value: &Value, args: Option<&[Argument]>, path: &str) -> SigilResult<Value> {
	match value {
		Value::Func(func) => {
			func(args.unwrap_or(&[])).map_err(|error| {
				SigilError::Invocation {
					path: path.to_string(),
					reason: error.to_string(),
				}
			})
		}
		_ if args.is_some() => Err(SigilError::NotInvocable(path.to_string())),
		other => Ok(other.clone()),
	}
}

/// Render a resolved value with its suffix appended.
///
/// The absence marker renders as nothing and suppresses the suffix, so a
/// unit trailer never survives a value that was deliberately mapped to
/// null. Maps and functions have no textual form.
pub fn render(value: &Value, suffix: &str, path: &str) -> SigilResult<String> {
	if matches!(value, Value::Null) {
		return Ok(String::new());
	}

	let Some(mut rendered) = value.render() else {
		return Err(SigilError::Unprintable {
			path: path.to_string(),
			kind: value.kind(),
		});
	};

	rendered.push_str(suffix);
	Ok(rendered)
}
