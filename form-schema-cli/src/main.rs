//! # form-schema
//!
//! CLI tool for compiling TypeScript declarations into JSON form schemas.
//!
//! ## Usage
//!
//! ```bash
//! # Compile to ./.form-schema/output/form-schema.json
//! form-schema compile src/forms/user.ts
//!
//! # Compile to a specific file
//! form-schema compile src/forms/user.ts public/user-form.json
//!
//! # Recompile on changes
//! form-schema compile src/forms/user.ts --watch
//!
//! # Preview without writing
//! form-schema compile src/forms/user.ts --dry-run
//!
//! # Initialize configuration
//! form-schema init
//!
//! # Check that a schema file is up-to-date
//! form-schema check src/forms/user.ts --schema public/user-form.json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use form_schema_cli::{
    compiler::SchemaCompiler,
    config::{CliArgs, Config, ConfigManager},
    error::CliError,
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "form-schema")]
#[command(author, version, about = "Compile TypeScript declarations into JSON form schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a TypeScript file into a form schema document
    Compile {
        /// Root TypeScript file (defaults to [input] file from the configuration)
        input: Option<PathBuf>,

        /// Output JSON file
        output: Option<PathBuf>,

        /// Watch for source changes and recompile
        #[arg(short, long)]
        watch: bool,

        /// Print the document instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum depth of cross-file import resolution
        #[arg(long)]
        max_depth: Option<usize>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Initialize a new form-schema configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "form-schema.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that a schema file is up-to-date
    Check {
        /// Root TypeScript file (defaults to [input] file from the configuration)
        input: Option<PathBuf>,

        /// Schema file to compare against
        #[arg(short, long)]
        schema: PathBuf,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Compile {
            input,
            output,
            watch,
            dry_run,
            config,
            max_depth,
            verbose,
        } => {
            let config = load_config(
                config.as_deref(),
                &CliArgs {
                    input,
                    output,
                    max_depth,
                    verbose,
                },
            )?;
            cmd_compile(&config, watch, dry_run)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check {
            input,
            schema,
            config,
            verbose,
        } => {
            let config = load_config(
                config.as_deref(),
                &CliArgs {
                    input,
                    verbose,
                    ..Default::default()
                },
            )?;
            cmd_check(&config, &schema)
        }
    }
}

/// Load configuration, apply CLI overrides and install logging.
fn load_config(path: Option<&Path>, args: &CliArgs) -> Result<Config, CliError> {
    let config = ConfigManager::load(path)?;
    let config = ConfigManager::merge_cli_args(config, args);
    init_tracing(&config, args.verbose);
    Ok(config)
}

/// Install the log subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` wins over the
/// configured level.
fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

fn input_file(config: &Config) -> Result<&Path, CliError> {
    config.input.file.as_deref().ok_or(CliError::MissingInput)
}

/// Compile command implementation.
fn cmd_compile(config: &Config, watch: bool, dry_run: bool) -> Result<(), CliError> {
    let input = input_file(config)?;

    if watch {
        run_watch_mode(input, config, dry_run)
    } else {
        run_compile(input, config, dry_run)
    }
}

/// Compile once and write the result.
fn run_compile(input: &Path, config: &Config, dry_run: bool) -> Result<(), CliError> {
    println!("{} {}", "Compiling".cyan(), input.display());

    let compiler = SchemaCompiler::new(config);
    let output = compiler.compile(input)?;

    println!(
        "  Found {} model(s) and {} enum(s)",
        output.model_count().to_string().green(),
        output.enum_count().to_string().green()
    );

    let dangling = output.dangling();
    if !dangling.is_empty() {
        println!(
            "{} {} unresolved reference(s): {}",
            "Warning:".yellow(),
            dangling.len(),
            dangling.join(", ")
        );
    }

    let writer = FileWriter::new(dry_run);
    match writer.write(&config.output.file, &output.content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            println!("{}", content.trim_end());
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Run in watch mode.
fn run_watch_mode(input: &Path, config: &Config, dry_run: bool) -> Result<(), CliError> {
    let root = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", root.display());
    println!("  Press Ctrl+C to stop\n");

    if let Err(e) = run_compile(input, config, dry_run) {
        print_error(&e);
    }

    let watcher = FileWatcher::new(&root);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if let Some(error) = event.error() {
            print_error(&error.into());
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        if let Err(e) = run_compile(input, config, dry_run) {
            print_error(&e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(format!(
            "Configuration file already exists: {}",
            output.display()
        )));
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Check command implementation.
fn cmd_check(config: &Config, schema: &Path) -> Result<(), CliError> {
    let input = input_file(config)?;
    println!("{}", "Checking schema...".cyan());

    match SchemaCompiler::new(config).check(input, schema) {
        Ok(()) => {
            println!("{} Schema is up-to-date", "✓".green());
            Ok(())
        }
        Err(e @ CliError::Validation(_)) => {
            println!("{} Schema is out of date", "✗".red());
            println!("  Run 'form-schema compile' to update");
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
