use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use owo_colors::OwoColorize;
use sigil_cli::BuildArgs;
use sigil_cli::Commands;
use sigil_cli::ExpandArgs;
use sigil_cli::SigilCli;
use sigil_core::AnyEmptyResult;
use sigil_core::AnyResult;
use sigil_core::ProcessOptions;
use sigil_core::ReplaceOptions;
use sigil_core::load_token_maps;
use sigil_core::process_tree;
use sigil_core::project::SOURCE_EXTENSION;
use sigil_core::replace_all;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SigilCli::parse();

	// Respect the NO_COLOR env var, the --no-color flag, and the terminal's
	// own capabilities.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Build(build)) => run_build(build),
		Some(Commands::Expand(expand)) => run_expand(expand),
		Some(Commands::Init) => run_init(),
		None => {
			eprintln!("No subcommand specified. Run `sigil --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<sigil_core::SigilError>() {
			Ok(sigil_err) => {
				let report: miette::Report = (*sigil_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Route engine diagnostics (missing tokens, resolution failures) to stderr.
fn init_tracing(verbose: bool, use_color: bool) {
	let directive = if verbose { "debug" } else { "error" };
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_ansi(use_color)
		.without_time()
		.init();
}

fn run_build(build: &BuildArgs) -> AnyEmptyResult {
	// Run the initial build.
	let failed = run_build_once(build)?;

	if !build.watch {
		if failed {
			process::exit(1);
		}
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				let touches_source = event.paths.iter().any(|path| {
					path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION)
				});
				if touches_source
					&& matches!(
						event.kind,
						notify::EventKind::Modify(_) | notify::EventKind::Create(_)
					) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&build.src, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, rebuilding...");
		if let Err(e) = run_build_once(build) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

/// Run a single sweep and return whether any file failed (true = failed).
fn run_build_once(build: &BuildArgs) -> AnyResult<bool> {
	let maps = load_token_maps(&build.maps)?;
	let options = ProcessOptions {
		src: build.src.clone(),
		out: build.out.clone(),
		exclude_patterns: build.exclude.clone(),
		error_if_missing: !build.allow_missing,
		..ProcessOptions::default()
	};

	let summary = process_tree(&maps, &options)?;

	if summary.processed.is_empty() && summary.is_ok() {
		println!(
			"{} no `.{SOURCE_EXTENSION}` files found under {}",
			colored!("warning:", yellow),
			build.src.display()
		);
		return Ok(false);
	}

	if summary.is_ok() {
		println!(
			"{} {} file(s)",
			colored!("Processed", green),
			summary.processed.len()
		);
	} else {
		eprintln!(
			"{} {} file(s) failed, {} processed",
			colored!("error:", red),
			summary.errors,
			summary.processed.len()
		);
	}

	Ok(!summary.is_ok())
}

fn run_expand(expand: &ExpandArgs) -> AnyEmptyResult {
	let maps = load_token_maps(&expand.maps)?;

	let content = if expand.file == Path::new("-") {
		let mut buffer = String::new();
		std::io::stdin().read_to_string(&mut buffer)?;
		buffer
	} else {
		std::fs::read_to_string(&expand.file)?
	};

	let options = ReplaceOptions {
		reference: expand.file.display().to_string(),
		error_if_missing: !expand.allow_missing,
	};
	let result = replace_all(&maps, &content, &options)?;

	print!("{result}");
	Ok(())
}

fn run_init() -> AnyEmptyResult {
	let map_path = PathBuf::from("tokens.toml");
	let source_path = PathBuf::from("src").join(format!("theme.{SOURCE_EXTENSION}"));

	let map_exists = map_path.exists();
	let source_exists = source_path.exists();

	if map_exists {
		println!("Token map already exists: {}", map_path.display());
	} else {
		let sample_map = "# sigil token map\n# Values defined here are available in your \
		                  stylesheets as $key or $table.key.\n\npad = \"2rem\"\n\n[theme]\nprimary \
		                  = \"#0af\"\nsecondary = \"#f50\"\n";

		std::fs::write(&map_path, sample_map)?;
		println!("Created token map: {}", map_path.display());
	}

	if source_exists {
		// Skip silently if the sample source already exists.
	} else {
		let sample_source =
			".button {\n\tcolor: $theme.primary;\n\tpadding: $pad;\n}\n";

		if let Some(parent) = source_path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&source_path, sample_source)?;
		println!("Created sample stylesheet: {}", source_path.display());
	}

	if !map_exists {
		println!();
		println!("{}", colored!("Next steps:", bold));
		println!("  1. Edit {} to define your tokens", map_path.display());
		println!("  2. Reference them in `.{SOURCE_EXTENSION}` files as $theme.primary");
		println!("  3. Run `sigil build --map tokens.toml` to compile CSS");
	}

	Ok(())
}
