use std::path::Path;
use std::path::PathBuf;

use crate::SigilResult;
use crate::engine::ReplaceOptions;
use crate::engine::replace_all;
use crate::project::ProcessOptions;
use crate::project::process_tree;
use crate::value::TokenMap;

/// A single style block handed over by a host markup compiler.
#[derive(Debug, Clone, Copy)]
pub struct StyleBlock<'a> {
	/// The raw style text between the host's style tags.
	pub content: &'a str,
	/// The block's declared language attribute, when present.
	pub lang: Option<&'a str>,
	/// The file the block came from, used as the diagnostic reference.
	pub filename: Option<&'a Path>,
}

/// Options for a [`Preprocessor`].
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
	/// When set, the whole source tree under this root is processed once,
	/// on the first style block the host hands over.
	pub root: Option<PathBuf>,
	/// Amalgamated destination for the tree sweep (see
	/// [`ProcessOptions::out`]).
	pub out: Option<PathBuf>,
	/// Language attributes accepted for expansion. `None` matches blocks
	/// without a `lang` attribute.
	pub langs: Vec<Option<String>>,
	/// Whether unresolved tokens are reported as failures.
	pub error_if_missing: bool,
}

impl Default for PreprocessOptions {
	fn default() -> Self {
		Self {
			root: None,
			out: None,
			langs: vec![None, Some("sig".to_string()), Some("text/sig".to_string())],
			error_if_missing: true,
		}
	}
}

/// Adapter between a host markup compiler and the rewrite engine.
///
/// The one-shot tree sweep is tracked as instance state rather than a
/// process-wide flag, so several preprocessors can coexist and each primes
/// its own tree exactly once.
#[derive(Debug)]
pub struct Preprocessor {
	maps: Vec<TokenMap>,
	options: PreprocessOptions,
	primed: bool,
}

impl Preprocessor {
	pub fn new(maps: Vec<TokenMap>, options: PreprocessOptions) -> Self {
		Self {
			maps,
			options,
			primed: false,
		}
	}

	/// Process one style block.
	///
	/// Returns `Ok(None)` when the block's language is not accepted, leaving
	/// the block for other preprocessors in the host's chain.
	pub fn style(&mut self, block: &StyleBlock<'_>) -> SigilResult<Option<String>> {
		if !self.primed {
			self.primed = true;

			if let Some(root) = &self.options.root {
				let process = ProcessOptions {
					src: root.clone(),
					out: self.options.out.clone(),
					error_if_missing: self.options.error_if_missing,
					..ProcessOptions::default()
				};
				process_tree(&self.maps, &process)?;
			}
		}

		if !self.accepts(block.lang) {
			return Ok(None);
		}

		let reference = block
			.filename
			.map_or_else(|| "inline style block".to_string(), |f| f.display().to_string());
		let options = ReplaceOptions {
			reference,
			error_if_missing: self.options.error_if_missing,
		};

		replace_all(&self.maps, block.content, &options).map(Some)
	}

	fn accepts(&self, lang: Option<&str>) -> bool {
		self.options
			.langs
			.iter()
			.any(|candidate| candidate.as_deref() == lang)
	}
}
