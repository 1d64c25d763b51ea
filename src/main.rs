use clap::{Args, Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::Path;

use fillpara_lib::Language;
use fillpara_lib::config::{self as fillpara_config, Config, LoadedConfig};
use fillpara_lib::exit_codes::exit;

mod file_processor;

use file_processor::{Caret, FillRequest, ProcessStatus};

const DEFAULT_CONFIG_FILE: &str = ".fillpara.toml";

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = ["auto", "always", "never"], help = "Control colored output: auto, always, never")]
    color: String,

    /// Path to configuration file
    #[arg(long, global = true, help = "Path to configuration file")]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(
        long,
        global = true,
        help = "Ignore all configuration files and use built-in defaults"
    )]
    no_config: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Refill the paragraph at the caret
    Fill(FillArgs),
    /// Initialize a new configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Show the effective configuration
    Config {
        /// Show only the default configuration values
        #[arg(long, help = "Show only the default configuration values")]
        defaults: bool,
        #[arg(long, default_value = "toml", value_parser = ["toml", "json"], help = "Output format (toml or json)")]
        output: String,
    },
    /// List known languages and their comment prefixes
    Languages,
    /// Show version information
    Version,
}

#[derive(Args, Debug)]
struct FillArgs {
    /// File to edit (use '-' for stdin)
    path: String,

    /// Caret position as a character offset
    #[arg(long, conflicts_with = "line", required_unless_present = "line")]
    offset: Option<usize>,

    /// Caret line (1-based)
    #[arg(long)]
    line: Option<usize>,

    /// Caret column (1-based, default 1)
    #[arg(long, requires = "line")]
    column: Option<usize>,

    /// Comment prefix to use instead of detecting one
    #[arg(long, allow_hyphen_values = true)]
    comment_prefix: Option<String>,

    /// Language whose comment prefix to use (see `fillpara languages`)
    #[arg(long, conflicts_with = "comment_prefix")]
    language: Option<Language>,

    /// Filename to use when reading from stdin (e.g., main.rs)
    #[arg(long, help = "Filename to use when reading from stdin (e.g., main.rs)")]
    stdin_filename: Option<String>,

    /// Print the resulting document instead of writing the file
    #[arg(long)]
    stdout: bool,

    /// Exit with 1 if the paragraph would be refilled, without writing
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print nothing but errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn load_config_with_cli_error_handling(config_path: Option<&str>, isolated: bool) -> LoadedConfig {
    match LoadedConfig::load(config_path, isolated) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn handle_fill(args: &FillArgs, config: &Config) {
    let caret = match (args.offset, args.line) {
        (Some(offset), _) => Caret::Offset(offset),
        (None, Some(line)) => Caret::Position {
            line,
            column: args.column.unwrap_or(1),
        },
        (None, None) => {
            eprintln!("{}: either --offset or --line is required", "Error".red().bold());
            exit::tool_error();
        }
    };

    let request = FillRequest {
        path: &args.path,
        caret,
        comment_prefix: args.comment_prefix.as_deref(),
        language: args.language,
        stdin_filename: args.stdin_filename.as_deref(),
        to_stdout: args.stdout,
        check: args.check,
        quiet: args.quiet,
    };

    match file_processor::process_fill(&request, config) {
        Ok(ProcessStatus::WouldChange) => exit::check_failed(),
        Ok(_) => {}
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn handle_init(force: bool) {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if force
        && path.exists()
        && let Err(e) = fs::remove_file(path)
    {
        eprintln!("{}: Failed to remove {}: {}", "Error".red().bold(), DEFAULT_CONFIG_FILE, e);
        exit::tool_error();
    }

    match fillpara_config::create_default_config(DEFAULT_CONFIG_FILE) {
        Ok(()) => println!("Created default configuration file: {DEFAULT_CONFIG_FILE}"),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn handle_config(loaded: &LoadedConfig, defaults: bool, output: &str) {
    let default_config = Config::default();
    let config = if defaults { &default_config } else { &loaded.config };

    let rendered = match output {
        "json" => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        _ => toml::to_string_pretty(config).map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(text) => {
            if output == "toml" && !defaults {
                match &loaded.source {
                    Some(path) => println!("# Loaded from: {}", path.display()),
                    None => println!("# Using built-in defaults"),
                }
            }
            println!("{}", text.trim_end());
        }
        Err(e) => {
            eprintln!("{}: Failed to serialize configuration: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}

fn handle_languages() {
    for language in Language::ALL {
        let prefix = language.line_comment_prefix();
        let prefix = if prefix.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            prefix.cyan().to_string()
        };
        println!("{:<12} {}", language.name(), prefix);
    }
}

fn main() {
    // Reset SIGPIPE to default behavior on Unix so piping to `head` etc. works correctly.
    #[cfg(unix)]
    {
        // SAFETY: Setting SIGPIPE to SIG_DFL is standard practice for CLI tools
        // that produce output meant to be piped.
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::unset_override(),
    }

    init_logging(cli.verbose);

    match &cli.command {
        Commands::Fill(args) => {
            let loaded = load_config_with_cli_error_handling(cli.config.as_deref(), cli.no_config);
            if let Some(source) = &loaded.source {
                log::debug!("Using configuration from {}", source.display());
            }
            handle_fill(args, &loaded.config);
        }
        Commands::Init { force } => handle_init(*force),
        Commands::Config { defaults, output } => {
            let loaded = load_config_with_cli_error_handling(cli.config.as_deref(), cli.no_config);
            handle_config(&loaded, *defaults, output);
        }
        Commands::Languages => handle_languages(),
        Commands::Version => println!("fillpara {}", env!("CARGO_PKG_VERSION")),
    }

    exit::success();
}
