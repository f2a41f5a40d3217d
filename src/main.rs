//! Purpose: `numerus` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs conversions, emits JSON on stdout.
//! Invariants: Conversion output is the same shape the HTTP API returns.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.

use std::io::{self, IsTerminal};
use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand, error::ErrorKind as ClapErrorKind};
use serde_json::json;

mod serve;

use numerus::api::{
    Conversion, Error, ErrorKind, arabic_from_query, roman_from_query, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(err.render().to_string().trim_end().to_string()));
            }
        },
    };

    match cli.command {
        Command::Parse { roman } => {
            let conversion = roman_from_query(Some(&roman))?;
            emit_conversion(&conversion);
            Ok(RunOutcome::ok())
        }
        Command::Encode { value } => {
            let conversion = arabic_from_query(Some(&value))?;
            emit_conversion(&conversion);
            Ok(RunOutcome::ok())
        }
        Command::Serve(args) => {
            let bind: SocketAddr = args.bind.parse().map_err(|_| {
                Error::new(ErrorKind::Usage)
                    .with_message("invalid bind address")
                    .with_detail(format!("{:?} is not a host:port pair", args.bind))
                    .with_hint("Use an address like 127.0.0.1:3000.")
            })?;
            let config = serve::ServeConfig {
                bind,
                cors_allowed_origins: args.cors_origin,
                allow_non_loopback: args.allow_non_loopback,
            };
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to start runtime")
                        .with_source(err)
                })?;
            runtime.block_on(serve::serve(config))?;
            Ok(RunOutcome::ok())
        }
    }
}

#[derive(Parser)]
#[command(
    name = "numerus",
    version,
    about = "Convert between Roman numerals and Arabic integers (1-3999)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a Roman numeral into its integer value
    Parse {
        /// Numeral to decode, e.g. XIV (case-insensitive)
        roman: String,
    },
    /// Encode an integer between 1 and 3999 as a Roman numeral
    Encode {
        /// Value to encode, e.g. 14
        value: String,
    },
    /// Run the HTTP conversion server
    Serve(ServeArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(
        long,
        default_value = "127.0.0.1:3000",
        value_name = "ADDR",
        help = "Bind address",
        help_heading = "Connection"
    )]
    bind: String,
    #[arg(
        long = "cors-origin",
        value_name = "ORIGIN",
        help = "Allow browser requests from this origin (repeatable, explicit list)",
        help_heading = "Connection"
    )]
    cors_origin: Vec<String>,
    #[arg(
        long,
        help = "Allow non-loopback binds",
        help_heading = "Safety"
    )]
    allow_non_loopback: bool,
}

fn emit_conversion(conversion: &Conversion) {
    let text = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(conversion)
    } else {
        serde_json::to_string(conversion)
    };
    println!(
        "{}",
        text.unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string())
    );
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        if let Some(hint) = err.hint() {
            eprintln!("hint: {hint}");
        }
        return;
    }

    let value = json!({
        "error": {
            "code": err.kind().code(),
            "message": err.message().unwrap_or("error"),
            "detail": err.detail(),
        }
    });
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"code\":\"INTERNAL_ERROR\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}
