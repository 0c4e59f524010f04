use crate::value::TokenMap;
use crate::value::Value;

/// Resolve a dotted key path against an ordered list of token maps.
///
/// Maps are tried in order and the first to resolve the full path wins,
/// regardless of the kind of value found. Any failure inside a map — a
/// missing key at any depth, or a non-map met while segments remain — falls
/// through to the next map. `None` when no map resolves the full path.
pub fn lookup<'a>(maps: &'a [TokenMap], path: &[String]) -> Option<&'a Value> {
	maps.iter().find_map(|map| lookup_in(map, path))
}

fn lookup_in<'a>(map: &'a TokenMap, path: &[String]) -> Option<&'a Value> {
	let (first, rest) = path.split_first()?;
	let value = map.get(first)?;

	if rest.is_empty() {
		return Some(value);
	}

	match value {
		Value::Map(nested) => lookup_in(nested, rest),
		_ => None,
	}
}
