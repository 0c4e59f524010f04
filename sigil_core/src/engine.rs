use tracing::error;
use unicode_normalization::IsNormalized;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::is_nfc_quick;

use crate::SigilError;
use crate::SigilResult;
use crate::lookup::lookup;
use crate::resolve::render;
use crate::resolve::resolve;
use crate::scanner::scan;
use crate::tokens::Token;
use crate::value::TokenMap;

/// The reference shown by the default sink when the caller supplies none.
pub const DEFAULT_REFERENCE: &str = r"¯\_(ツ)_/¯";

/// Configuration for a single [`replace_all`] call.
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
	/// Advisory label echoed alongside reported failures, typically the
	/// source file path.
	pub reference: String,
	/// Whether an unresolved path is a reportable failure. When `false`,
	/// unknown tokens are silently left as their original source text.
	pub error_if_missing: bool,
}

impl Default for ReplaceOptions {
	fn default() -> Self {
		Self {
			reference: DEFAULT_REFERENCE.to_string(),
			error_if_missing: true,
		}
	}
}

impl ReplaceOptions {
	/// Default options with the reference set, typically to a file path.
	pub fn with_reference(reference: impl Into<String>) -> Self {
		Self {
			reference: reference.into(),
			..Self::default()
		}
	}
}

/// The non-aborting error callback: every per-token failure is routed
/// through `report` and the rewrite continues. A sink returning `Err`
/// escalates and aborts the whole call — an explicit caller choice to
/// convert non-fatal into fatal.
pub trait ErrorSink {
	fn report(
		&mut self,
		error: &SigilError,
		token: &Token,
		options: &ReplaceOptions,
	) -> SigilResult<()>;
}

/// The default sink: logs the reference, the failure, and a structured dump
/// of the offending token. Never escalates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
	fn report(
		&mut self,
		error: &SigilError,
		token: &Token,
		options: &ReplaceOptions,
	) -> SigilResult<()> {
		let dump = serde_json::to_string_pretty(token).unwrap_or_else(|_| format!("{token:?}"));
		error!(reference = %options.reference, "{error}\n{dump}");
		Ok(())
	}
}

/// A single reported failure, captured for later inspection.
#[derive(Debug, Clone)]
pub struct ErrorReport {
	/// The rendered failure message.
	pub message: String,
	/// The offending token's dotted path.
	pub path: String,
	/// The offending token's span in the normalized input.
	pub start: usize,
	pub end: usize,
}

/// A sink that records every reported failure. Never escalates.
#[derive(Debug, Default)]
pub struct CollectSink {
	pub reports: Vec<ErrorReport>,
}

impl ErrorSink for CollectSink {
	fn report(
		&mut self,
		error: &SigilError,
		token: &Token,
		_options: &ReplaceOptions,
	) -> SigilResult<()> {
		self.reports.push(ErrorReport {
			message: error.to_string(),
			path: token.dotted_path(),
			start: token.start,
			end: token.end,
		});
		Ok(())
	}
}

/// Adapter turning a closure into an [`ErrorSink`].
pub struct FnSink<F>(pub F);

impl<F> ErrorSink for FnSink<F>
where
	F: FnMut(&SigilError, &Token, &ReplaceOptions) -> SigilResult<()>,
{
	fn report(
		&mut self,
		error: &SigilError,
		token: &Token,
		options: &ReplaceOptions,
	) -> SigilResult<()> {
		(self.0)(error, token, options)
	}
}

/// Expand every token in `content` against the ordered `maps`, reporting
/// failures through the default [`LogSink`].
///
/// The returned text is always best-effort: resolved tokens are substituted
/// and everything else is left as literal source text.
pub fn replace_all(
	maps: &[TokenMap],
	content: &str,
	options: &ReplaceOptions,
) -> SigilResult<String> {
	replace_all_with(maps, content, options, &mut LogSink)
}

/// [`replace_all`] with a caller-supplied error sink.
pub fn replace_all_with(
	maps: &[TokenMap],
	content: &str,
	options: &ReplaceOptions,
	sink: &mut dyn ErrorSink,
) -> SigilResult<String> {
	let mut content = normalize(content);
	let mut tokens = scan(&content);

	// Work from back to front of the content, otherwise a length-changing
	// replacement near the start would invalidate the stored offsets of
	// every later token.
	tokens.reverse();

	for token in &tokens {
		match replace_token(maps, &content, token) {
			Ok(Some(next)) => content = next,
			Ok(None) => {
				if options.error_if_missing {
					let error = SigilError::MissingToken(token.dotted_path());
					sink.report(&error, token, options)?;
				}
			}
			Err(error) => sink.report(&error, token, options)?,
		}
	}

	Ok(content)
}

/// Replace a single token in `content`. `Ok(None)` when the path is absent
/// from every map; resolution failures bubble up for the sink.
fn replace_token(maps: &[TokenMap], content: &str, token: &Token) -> SigilResult<Option<String>> {
	let Some(value) = lookup(maps, &token.path) else {
		return Ok(None);
	};

	let path = token.dotted_path();
	let resolved = resolve(value, token.args.as_deref(), &path)?;
	let replacement = render(&resolved, &token.suffix, &path)?;

	Ok(Some(splice(content, token.start, token.end, &replacement)))
}

fn splice(content: &str, start: usize, end: usize, replacement: &str) -> String {
	let mut buf = String::with_capacity(content.len() - (end - start) + replacement.len());
	buf.push_str(&content[..start]);
	buf.push_str(replacement);
	buf.push_str(&content[end..]);
	buf
}

/// Offsets are computed against a canonical representation, so equivalent
/// inputs always scan and splice identically.
fn normalize(content: &str) -> String {
	match is_nfc_quick(content.chars()) {
		IsNormalized::Yes => content.to_string(),
		IsNormalized::No | IsNormalized::Maybe => content.nfc().collect(),
	}
}
