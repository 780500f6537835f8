//! dridefs CLI - generates the driver definition index for the kernel build.
//!
//! ```text
//! dridefs ARC_REGISTER_DRIVER src/c src/c/include/drivers/dri_defs.h src/c/drivers/dri_defs.c
//! ```
//!
//! Exit status:
//! - `0`: artifacts written, no collisions
//! - `N`: artifacts written, `N` group collisions (saturated at 255)
//! - `1`: fatal error (malformed marker line, I/O, bad config)
//! - `2`: usage error, nothing written

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

use dridefs_core::{
    init_structured_logging, load_config, load_config_file, log_error, log_info, print_json,
    print_plain, today, DridefsConfig, Emitter, Generator, Summary,
};

/// Status used for invocation errors.
const USAGE_EXIT_CODE: i32 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Driver definition index generator")]
pub struct Cli {
    /// Marker token identifying driver registrations (e.g. ARC_REGISTER_DRIVER)
    marker: String,

    /// Root directory of the sources to scan
    source_root: PathBuf,

    /// Output path for the declarations header
    header_out: PathBuf,

    /// Output path for the definitions source
    source_out: PathBuf,

    /// Config file (defaults to dridefs.toml in the source root, if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source file suffix to scan; repeat for several (overrides config)
    #[arg(long = "ext", value_name = "SUFFIX")]
    extensions: Vec<String>,

    /// Scan files in traversal order instead of sorted by path
    #[arg(long)]
    no_sort: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Arguments after the four positionals; accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

/// Reports an invocation error on stdout and exits without touching outputs.
fn exit_usage(err: clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            println!("{}", err.render());
            std::process::exit(USAGE_EXIT_CODE);
        }
    }
}

/// Explicit `--config` wins; otherwise dridefs.toml in the source root.
fn resolve_config(cli: &Cli) -> Result<DridefsConfig> {
    match &cli.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config(&cli.source_root)
            .with_context(|| format!("Failed to load config from {}", cli.source_root.display()))?
            .unwrap_or_default()),
    }
}

/// Applies config and then command-line overrides.
fn build_generator(cli: &Cli, config: &DridefsConfig) -> Generator {
    let mut generator = Generator::new(cli.marker.as_str(), cli.source_root.clone()).with_config(config);

    if !cli.extensions.is_empty() {
        generator = generator.extensions(
            cli.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
        );
    }
    if cli.no_sort {
        generator = generator.sort(false);
    }
    generator
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] dridefs internal error: {}", info);
        eprintln!("[PANIC] Generated artifacts may be incomplete; rerun the build.");
    }));

    let cli = Cli::try_parse().unwrap_or_else(|e| exit_usage(e));

    init_structured_logging();

    if !cli.extra.is_empty() {
        log_info(&format!("ignoring extra arguments: {}", cli.extra.join(" ")));
    }

    let config = resolve_config(&cli)?;
    let generator = build_generator(&cli, &config);

    let generation = generator
        .generate()
        .with_context(|| format!("Failed to scan {}", cli.source_root.display()))?;

    Emitter::new(config.naming())
        .write_artifacts(&generation.registry, &cli.header_out, &cli.source_out, today())
        .context("Failed to write generated artifacts")?;

    let summary = Summary::new(&generation);
    if cli.json {
        print_json(&summary);
    } else {
        print_plain(&summary);
    }

    let collisions = generation.collision_count();
    if collisions > 0 {
        log_error(&format!(
            "{} driver definition collision(s); artifacts were still written",
            collisions
        ));
    } else {
        log_info("driver definitions generated");
    }

    std::process::exit(generation.exit_code());
}
