mod checker;
mod commands;
mod core;
mod graph;
mod heuristics;
mod model;
mod naming;
mod resolve;
mod script;
mod symbols;
mod ui;
mod update;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::error::{SymverError, print_error};
use crate::ui::reporter::{Reporter, Verbosity};
use crate::update::UpdateMode;

/// Helper tools for linker version script maintenance
#[derive(Parser)]
#[command(name = "symver")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Update a map file against a new list of exported symbols
  ///
  /// A list of symbols is expected as the input. If a file is provided
  /// with '-i', the symbols are read from the given file. Otherwise the
  /// symbols are read from stdin.
  Update {
    /// The map file being updated
    file: PathBuf,
    /// Do not continue if the ABI would be broken
    #[arg(short, long)]
    care: bool,
    #[command(flatten)]
    mode: ModeArgs,
    #[command(flatten)]
    files: FileArgs,
    #[command(flatten)]
    verbosity: VerbosityArgs,
  },

  /// Create a new map file
  ///
  /// A list of symbols is expected as the input. If a file is provided
  /// with '-i', the symbols are read from the given file. Otherwise the
  /// symbols are read from stdin.
  New {
    /// The name of the library (e.g. libx)
    #[arg(short, long)]
    name: Option<String>,
    /// The release version (e.g. 1_0_0)
    #[arg(short = 'v', long)]
    version: Option<String>,
    /// The full name of the release to be used (e.g. LIBX_1_0_0)
    #[arg(short, long)]
    release: Option<String>,
    #[command(flatten)]
    files: FileArgs,
    #[command(flatten)]
    verbosity: VerbosityArgs,
  },

  /// Run structural checks on a map file and report findings
  Check {
    /// The map file to check
    file: PathBuf,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    verbosity: VerbosityArgs,
  },

  /// Show release dependency chains
  Graph {
    /// The map file to analyze
    file: PathBuf,
    /// Export the release graph in Graphviz DOT format
    #[arg(long)]
    dot: bool,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    verbosity: VerbosityArgs,
  },
}

/// Common file arguments
#[derive(Args)]
struct FileArgs {
  /// Output file (defaults to stdout)
  #[arg(short, long)]
  out: Option<PathBuf>,
  /// Read symbols from this file instead of stdin
  #[arg(short = 'i', long = "in")]
  input: Option<PathBuf>,
  /// Do everything, but do not modify the files
  #[arg(short, long)]
  dry: bool,
  /// Output the report in JSON format
  #[arg(long)]
  json: bool,
}

/// How the symbol list relates to the current map (mutually exclusive)
#[derive(Args)]
#[group(required = true, multiple = false)]
struct ModeArgs {
  /// Add the symbols to the map file
  #[arg(short, long)]
  add: bool,
  /// Remove the symbols from the map file. This breaks the ABI
  #[arg(short, long)]
  remove: bool,
  /// Compare the symbol list with the current map and update accordingly. May break the ABI
  #[arg(short, long)]
  symbols: bool,
}

impl ModeArgs {
  fn to_mode(&self) -> UpdateMode {
    if self.add {
      UpdateMode::Add
    } else if self.remove {
      UpdateMode::Remove
    } else {
      UpdateMode::Replace
    }
  }
}

/// Common verbosity arguments
#[derive(Args)]
struct VerbosityArgs {
  /// Set the program verbosity
  #[arg(
    long,
    value_parser = ["quiet", "error", "warning", "info", "debug"],
    default_value = "warning",
    conflicts_with_all = ["quiet", "debug_flag"]
  )]
  verbosity: String,
  /// Make the program quiet
  #[arg(long, conflicts_with = "debug_flag")]
  quiet: bool,
  /// Make the program print debug info
  #[arg(long = "debug")]
  debug_flag: bool,
}

impl VerbosityArgs {
  fn reporter(&self) -> Reporter {
    let verbosity = if self.quiet {
      Verbosity::Quiet
    } else if self.debug_flag {
      Verbosity::Debug
    } else {
      self.verbosity.parse().unwrap_or(Verbosity::Warning)
    };
    Reporter::new(verbosity)
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Update {
      file,
      care,
      mode,
      files,
      verbosity,
    } => {
      let reporter = verbosity.reporter();
      commands::run_update(
        &file,
        files.out.as_deref(),
        files.input.as_deref(),
        mode.to_mode(),
        care,
        files.dry,
        files.json,
        &reporter,
      )
    }
    Commands::New {
      name,
      version,
      release,
      files,
      verbosity,
    } => {
      let reporter = verbosity.reporter();
      commands::run_new(
        files.out.as_deref(),
        files.input.as_deref(),
        name.as_deref(),
        version.as_deref(),
        release.as_deref(),
        files.dry,
        files.json,
        &reporter,
      )
    }
    Commands::Check { file, json, verbosity } => {
      let reporter = verbosity.reporter();
      commands::run_check(&file, json, &reporter)
    }
    Commands::Graph {
      file,
      dot,
      json,
      verbosity,
    } => {
      let reporter = verbosity.reporter();
      commands::run_graph(&file, dot, json, &reporter)
    }
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: SymverError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
