use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	version,
	about = "Expand $tokens in stylesheet sources into plain CSS.",
	long_about = "sigil is a token replacement engine for stylesheets. Values are defined once in \
	              token map files and referenced anywhere in your styles as `$path.to.value`, \
	              with optional call-style arguments and unit suffixes such as \
	              `$spacing(2)rem`.\n\nQuick start:\n  sigil init     Create a sample token map \
	              and stylesheet\n  sigil build    Compile every .sig file to CSS\n  sigil expand  \
	              Expand a single file to stdout"
)]
pub struct SigilCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Expand every `.sig` file under the source tree into CSS.
	///
	/// Discovers source files recursively (respecting `.gitignore`), expands
	/// their tokens against the supplied maps, and writes each result to a
	/// sibling `.css` file — or amalgamates everything into a single
	/// destination with `--out`. Unresolved tokens are reported to stderr
	/// and left in place; the sweep never stops early.
	Build(BuildArgs),
	/// Expand a single file to stdout.
	///
	/// Reads the file (or stdin when the path is `-`), expands its tokens
	/// against the supplied maps, and prints the result. Useful for
	/// piping and quick experiments.
	Expand(ExpandArgs),
	/// Create a sample token map and stylesheet source.
	///
	/// Writes `tokens.toml` and `src/theme.sig` into the current directory.
	/// Existing files are left untouched and this command exits
	/// successfully.
	Init,
}

#[derive(Args)]
pub struct BuildArgs {
	/// Root directory to search for `.sig` source files.
	#[arg(long, default_value = "./src")]
	pub src: PathBuf,

	/// Amalgamate all output into this single CSS file instead of writing
	/// sibling `.css` files.
	#[arg(long)]
	pub out: Option<PathBuf>,

	/// Token map data file (json, toml, yaml). Repeatable; earlier maps take
	/// precedence over later ones.
	#[arg(long = "map", short)]
	pub maps: Vec<PathBuf>,

	/// Leave unknown tokens in place without reporting errors.
	#[arg(long, default_value_t = false)]
	pub allow_missing: bool,

	/// Gitignore-style patterns to exclude from the sweep, relative to the
	/// source root.
	#[arg(long = "exclude")]
	pub exclude: Vec<String>,

	/// Watch for source changes and rebuild automatically.
	#[arg(long, default_value_t = false)]
	pub watch: bool,
}

#[derive(Args)]
pub struct ExpandArgs {
	/// The file to expand, or `-` for stdin.
	pub file: PathBuf,

	/// Token map data file (json, toml, yaml). Repeatable; earlier maps take
	/// precedence over later ones.
	#[arg(long = "map", short)]
	pub maps: Vec<PathBuf>,

	/// Leave unknown tokens in place without reporting errors.
	#[arg(long, default_value_t = false)]
	pub allow_missing: bool,
}
