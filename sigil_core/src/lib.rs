//! `sigil_core` is the core library for the sigil token expansion engine.
//! It locates `$token` placeholders in arbitrary text and replaces them with
//! values drawn from one or more ordered token maps, which may hold
//! literals, nested maps, or callable value-producers.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw text
//!   → Scanner (locates every `$path.to.value(args)suffix` with its byte span)
//!   → Lookup (walks the dotted path through the ordered map list)
//!   → Resolver (invokes callables, validates arguments, appends the suffix)
//!   → Engine (splices replacements back to front, routes failures to a sink)
//! ```
//!
//! ## Modules
//!
//! - [`data`] — Token map loading from JSON, TOML, and YAML data files.
//! - [`project`] — Source tree sweeps: compile every `.sig` file to CSS,
//!   sibling-per-file or amalgamated into one destination.
//!
//! ## Key Types
//!
//! - [`Token`] — A located placeholder with its path, arguments, suffix, and
//!   byte span.
//! - [`Value`] — A token map entry: literal, nested map, or callable.
//! - [`TokenMap`] — An ordered-precedence lookup source.
//! - [`ReplaceOptions`] / [`ErrorSink`] — Per-call configuration and the
//!   non-aborting failure channel.
//!
//! ## Quick Start
//!
//! ```rust
//! use sigil_core::ReplaceOptions;
//! use sigil_core::TokenMap;
//! use sigil_core::replace_all;
//!
//! let theme = TokenMap::from([("color", "blue")]);
//! let css = replace_all(&[theme], ".a{color:$color}", &ReplaceOptions::default()).unwrap();
//! assert_eq!(css, ".a{color:blue}");
//! ```
//!
//! A failure on one token never aborts the rewrite: unresolved or erroring
//! tokens are reported through the sink and left verbatim in the output.

pub use data::*;
pub use engine::*;
pub use error::*;
pub use lookup::*;
pub use preprocess::*;
pub use project::*;
pub use resolve::*;
pub use scanner::*;
pub use tokens::*;
pub use value::*;

pub mod data;
mod engine;
mod error;
mod lookup;
mod preprocess;
pub mod project;
mod resolve;
mod scanner;
mod tokens;
mod value;

#[cfg(test)]
mod __fixtures;
