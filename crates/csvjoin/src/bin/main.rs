use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use csvjoin::prompt::run_prompt;
use csvjoin::{JoinConfig, JoinOutcome, join_files};
use csvjoin_csv::DialectOptions;
use csvjoin_error::Result;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl From<LogFormat> for logutil::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => logutil::LogFormat::HumanReadable,
            LogFormat::Json => logutil::LogFormat::Json,
        }
    }
}

#[derive(Parser)]
#[clap(name = "csvjoin")]
#[clap(version)]
#[clap(about = "Join two csv files on a shared column", long_about = None)]
struct Cli {
    /// Log verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Format of log lines written to stderr.
    #[clap(long, value_enum, default_value_t, env = "CSVJOIN_LOG_FORMAT")]
    log_format: LogFormat,

    /// File name of the joined output.
    #[clap(long, env = "CSVJOIN_OUTPUT_NAME")]
    #[clap(default_value = csvjoin::config::DEFAULT_OUTPUT_FILE_NAME)]
    output_name: String,

    /// Directory to write the output to. Defaults to the directory of the left
    /// file.
    #[clap(long, env = "CSVJOIN_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Field delimiter of the inputs and the output. A single character, or
    /// "tab".
    #[clap(long, env = "CSVJOIN_DELIMITER")]
    #[clap(default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Print the joined table after writing it.
    #[clap(long)]
    preview: bool,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Join two csv files and write the result.
    Join {
        /// Path to the left csv file.
        left: PathBuf,
        /// Path to the right csv file.
        right: PathBuf,
        /// Column to join on, case-insensitive.
        column: String,
        /// One of inner, left, right.
        join_type: String,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    if s.eq_ignore_ascii_case("tab") || s == "\\t" {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ascii character, got '{s}'")),
    }
}

fn main() {
    let cli = Cli::parse();
    logutil::configure_global_logger(
        logutil::level_from_verbosity(cli.verbose),
        cli.log_format.into(),
        io::stderr,
    );

    info!(version = env!("CARGO_PKG_VERSION"), "starting...");

    if let Err(err) = inner(cli) {
        println!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn inner(cli: Cli) -> Result<()> {
    let config = JoinConfig {
        output_file_name: cli.output_name,
        output_dir: cli.output_dir,
        dialect: DialectOptions::with_delimiter(cli.delimiter),
    };

    let outcome = match cli.command {
        Some(Commands::Join {
            left,
            right,
            column,
            join_type,
        }) => join_files(left, right, &column, &join_type, &config)?,
        None => {
            let stdin = io::stdin();
            match run_prompt(stdin.lock(), io::stdout(), &config)? {
                Some(outcome) => outcome,
                None => return Ok(()),
            }
        }
    };

    report(&outcome, cli.preview)
}

fn report(outcome: &JoinOutcome, preview: bool) -> Result<()> {
    let mut stdout = BufWriter::new(io::stdout());
    if preview {
        writeln!(stdout, "{}", outcome.table)?;
    }
    writeln!(
        stdout,
        "Joining result was saved in path: {}",
        outcome.output_dir().display()
    )?;
    stdout.flush()?;
    Ok(())
}
