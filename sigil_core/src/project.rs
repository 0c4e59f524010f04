use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::WalkBuilder;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::SigilResult;
use crate::engine::ReplaceOptions;
use crate::engine::replace_all;
use crate::value::TokenMap;

/// File extension of stylesheet sources containing tokens.
pub const SOURCE_EXTENSION: &str = "sig";
/// File extension of the compiled output written next to each source.
pub const OUTPUT_EXTENSION: &str = "css";

/// Options for a single sweep over a source tree.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
	/// Root directory searched for source files.
	pub src: PathBuf,
	/// Amalgamated destination. When set, every compiled file is appended to
	/// this one path; when `None`, each source gets a sibling output file.
	pub out: Option<PathBuf>,
	/// Gitignore-style patterns excluded from the sweep, relative to `src`.
	pub exclude_patterns: Vec<String>,
	/// Whether unresolved tokens are reported as failures.
	pub error_if_missing: bool,
	/// When `true`, `.gitignore` files are not used for filtering.
	pub disable_gitignore: bool,
}

impl Default for ProcessOptions {
	fn default() -> Self {
		Self {
			src: PathBuf::from("./src"),
			out: None,
			exclude_patterns: vec![],
			error_if_missing: true,
			disable_gitignore: false,
		}
	}
}

/// Result of sweeping a source tree.
#[derive(Debug, Default)]
pub struct ProcessSummary {
	/// Source files that compiled and were written out.
	pub processed: Vec<PathBuf>,
	/// Number of files that failed outright (unreadable, unwritable).
	/// Token-level failures are reported through the engine's sink and do
	/// not fail the file.
	pub errors: usize,
}

impl ProcessSummary {
	/// Returns true when every discovered file was processed.
	pub fn is_ok(&self) -> bool {
		self.errors == 0
	}
}

/// Discover every source file under `options.src` and expand its tokens.
///
/// Files are processed in sorted path order so amalgamated output is
/// deterministic. A file that fails is logged and counted; the sweep always
/// continues to the remaining files.
pub fn process_tree(maps: &[TokenMap], options: &ProcessOptions) -> SigilResult<ProcessSummary> {
	let files = list_source_files(&options.src, &options.exclude_patterns, options.disable_gitignore);

	if let Some(out) = &options.out {
		// The amalgamated destination accumulates appends; output from a
		// previous sweep must not survive into this one.
		if out.exists() {
			std::fs::remove_file(out)?;
		}
	}

	let mut summary = ProcessSummary::default();

	for file in files {
		match process_file(maps, &file, options) {
			Ok(()) => {
				debug!("processed {}", file.display());
				summary.processed.push(file);
			}
			Err(e) => {
				error!("{}: {e}", file.display());
				summary.errors += 1;
			}
		}
	}

	Ok(summary)
}

/// Walk `src` and return every source file, sorted, minus exclusions.
fn list_source_files(src: &Path, exclude_patterns: &[String], disable_gitignore: bool) -> Vec<PathBuf> {
	let exclude_set = build_glob_set(exclude_patterns);
	let mut files = vec![];

	for entry in WalkBuilder::new(src).git_ignore(!disable_gitignore).build() {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				warn!("skipping unreadable entry: {e}");
				continue;
			}
		};

		let path = entry.path();
		if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
			continue;
		}
		if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
			continue;
		}

		let relative = path.strip_prefix(src).unwrap_or(path);
		if exclude_set.is_match(relative) {
			continue;
		}

		files.push(path.to_path_buf());
	}

	files.sort();
	files
}

/// Build a `GlobSet` from a list of glob pattern strings.
fn build_glob_set(patterns: &[String]) -> GlobSet {
	let mut builder = GlobSetBuilder::new();

	for pattern in patterns {
		match Glob::new(pattern) {
			Ok(glob) => {
				builder.add(glob);
			}
			Err(e) => warn!("invalid exclude pattern `{pattern}`: {e}"),
		}
	}

	builder.build().unwrap_or_else(|_| GlobSet::empty())
}

fn process_file(maps: &[TokenMap], file: &Path, options: &ProcessOptions) -> SigilResult<()> {
	let content = std::fs::read_to_string(file)?;
	let replace_options = ReplaceOptions {
		reference: file.display().to_string(),
		error_if_missing: options.error_if_missing,
	};

	let css = replace_all(maps, &content, &replace_options)?;
	let css = css.trim();

	match &options.out {
		Some(out) => append_output(out, css),
		None => {
			let sibling = file.with_extension(OUTPUT_EXTENSION);
			std::fs::write(sibling, format!("{css}\n"))?;
			Ok(())
		}
	}
}

fn append_output(out: &Path, css: &str) -> SigilResult<()> {
	if let Some(parent) = out.parent() {
		std::fs::create_dir_all(parent)?;
	}

	let mut file = std::fs::OpenOptions::new()
		.create(true)
		.append(true)
		.open(out)?;
	write!(file, "{css}\n\n")?;

	Ok(())
}
