use std::path::Path;
use std::path::PathBuf;

use crate::SigilError;
use crate::SigilResult;
use crate::value::TokenMap;
use crate::value::Value;

/// Read a token map from a data file, picking the format from the file
/// extension.
pub fn load_token_map(path: &Path) -> SigilResult<TokenMap> {
	let content = std::fs::read_to_string(path).map_err(|e| {
		SigilError::DataFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})?;
	let format = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	parse_token_map(&content, format.as_str(), &path.display().to_string())
}

/// Load several token maps in precedence order: the first map wins during
/// lookup.
pub fn load_token_maps(paths: &[PathBuf]) -> SigilResult<Vec<TokenMap>> {
	paths.iter().map(|path| load_token_map(path)).collect()
}

/// Parse a data file's content into a token map based on its format.
pub fn parse_token_map(content: &str, format: &str, path_display: &str) -> SigilResult<TokenMap> {
	let json = match format {
		"json" => {
			serde_json::from_str(content).map_err(|e| {
				SigilError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?
		}
		"toml" => {
			let toml_value: toml::Value = toml::from_str(content).map_err(|e| {
				SigilError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?;
			toml_to_json(toml_value, path_display)?
		}
		"yaml" | "yml" => {
			serde_yaml_ng::from_str(content).map_err(|e| {
				SigilError::DataFile {
					path: path_display.to_string(),
					reason: e.to_string(),
				}
			})?
		}
		other => return Err(SigilError::UnsupportedDataFormat(other.to_string())),
	};

	let serde_json::Value::Object(object) = json else {
		return Err(SigilError::DataFile {
			path: path_display.to_string(),
			reason: "top level must be a table of token values".to_string(),
		});
	};

	json_object_to_map(object, path_display)
}

fn json_object_to_map(
	object: serde_json::Map<String, serde_json::Value>,
	path_display: &str,
) -> SigilResult<TokenMap> {
	object
		.into_iter()
		.map(|(key, value)| Ok((key, json_to_value(value, path_display)?)))
		.collect()
}

fn json_to_value(value: serde_json::Value, path_display: &str) -> SigilResult<Value> {
	let value = match value {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(boolean) => Value::Bool(boolean),
		serde_json::Value::Number(number) => {
			Value::Number(number.as_f64().ok_or_else(|| {
				SigilError::UnconvertibleValue {
					path: path_display.to_string(),
					value: number.to_string(),
				}
			})?)
		}
		serde_json::Value::String(string) => Value::String(string),
		serde_json::Value::Array(items) => {
			// Scalar arrays collapse to a single comma-separated value, so a
			// list stays usable where the host format expects one (font
			// stacks, shorthand lists).
			let parts = items
				.into_iter()
				.map(|item| {
					json_to_value(item, path_display)?.render().ok_or_else(|| {
						SigilError::UnconvertibleValue {
							path: path_display.to_string(),
							value: "nested table inside an array".to_string(),
						}
					})
				})
				.collect::<SigilResult<Vec<String>>>()?;
			Value::String(parts.join(","))
		}
		serde_json::Value::Object(object) => Value::Map(json_object_to_map(object, path_display)?),
	};

	Ok(value)
}

/// Convert a `toml::Value` to a `serde_json::Value`.
fn toml_to_json(value: toml::Value, path_display: &str) -> SigilResult<serde_json::Value> {
	let json = match value {
		toml::Value::String(string) => serde_json::Value::String(string),
		toml::Value::Integer(integer) => serde_json::Value::Number(serde_json::Number::from(integer)),
		toml::Value::Float(float) => {
			serde_json::Value::Number(serde_json::Number::from_f64(float).ok_or_else(|| {
				SigilError::UnconvertibleValue {
					path: path_display.to_string(),
					value: float.to_string(),
				}
			})?)
		}
		toml::Value::Boolean(boolean) => serde_json::Value::Bool(boolean),
		toml::Value::Datetime(datetime) => serde_json::Value::String(datetime.to_string()),
		toml::Value::Array(array) => {
			let items: SigilResult<Vec<serde_json::Value>> = array
				.into_iter()
				.map(|item| toml_to_json(item, path_display))
				.collect();
			serde_json::Value::Array(items?)
		}
		toml::Value::Table(table) => {
			let mut map = serde_json::Map::new();
			for (key, item) in table {
				map.insert(key, toml_to_json(item, path_display)?);
			}
			serde_json::Value::Object(map)
		}
	};

	Ok(json)
}
