//! Schema transcoder CLI.
//!
//! Provides the `schemata` binary for converting values between the UI shape
//! and the contract shape from the command line. Schemas and values are read
//! as JSON files (`-` reads the value from stdin) and the result is printed
//! as pretty JSON on stdout.
//!
//! Uses the same `schemata_transcode` entry points an application would call,
//! so output is identical to the library's.
//!
//! Configuration:
//! - `--precision` on `decode`, falling back to `SCHEMATA_PRECISION`
//!   (default: `warn`).
//! - `--verbose` enables debug logging on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use schemata_core::{SchemaType, TranscodeError, Value};
use schemata_transcode::{PrecisionPolicy, TranscodeConfig};

/// Environment variable consulted when `--precision` is not given.
const PRECISION_ENV: &str = "SCHEMATA_PRECISION";

/// Schema-driven contract value transcoder.
#[derive(Parser)]
#[command(name = "schemata", about = "Schema-driven contract value transcoder")]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Encode a UI value into the shape a contract call expects.
    Encode {
        /// Path to the JSON schema file.
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the JSON value, or `-` for stdin.
        #[arg(short = 'i', long, default_value = "-")]
        value: String,

        /// Maximum nesting depth (default: unbounded).
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Decode a contract value into its UI shape.
    Decode {
        /// Path to the JSON schema file.
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to the JSON value, or `-` for stdin.
        #[arg(short = 'i', long, default_value = "-")]
        value: String,

        /// Inexact integer widening: allow, warn, reject.
        #[arg(short, long)]
        precision: Option<String>,

        /// Maximum nesting depth (default: unbounded).
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Print a placeholder UI value for a schema.
    Template {
        /// Path to the JSON schema file.
        #[arg(short, long)]
        schema: PathBuf,
    },
}

/// Why a subcommand failed. Each maps to a distinct exit code.
#[derive(Debug)]
enum Failure {
    Transcode(TranscodeError),
    Usage(String),
    Input(String),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Transcode(_) => 1,
            Failure::Usage(_) => 2,
            Failure::Input(_) => 3,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Encode {
            schema,
            value,
            max_depth,
        } => run_encode(&schema, &value, max_depth),
        Commands::Decode {
            schema,
            value,
            precision,
            max_depth,
        } => run_decode(&schema, &value, precision, max_depth),
        Commands::Template { schema } => run_template(&schema),
    };

    match result {
        Ok(output) => {
            // Print the result as JSON to stdout for machine-readable output
            let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize result: {}\"}}", e)
            });
            println!("{}", json);
        }
        Err(failure) => {
            match &failure {
                Failure::Transcode(e) => eprintln!("Transcode error: {}", e),
                Failure::Usage(msg) => eprintln!("Error: {}", msg),
                Failure::Input(msg) => eprintln!("I/O error: {}", msg),
            }
            process::exit(failure.exit_code());
        }
    }
}

/// Execute the encode subcommand.
fn run_encode(schema: &Path, value: &str, max_depth: Option<usize>) -> Result<Value, Failure> {
    let schema = load_schema(schema)?;
    let value = load_value(value)?;
    let config = TranscodeConfig {
        max_depth,
        ..Default::default()
    };
    schemata_transcode::encode_with_config(&value, &schema, &config).map_err(Failure::Transcode)
}

/// Execute the decode subcommand.
fn run_decode(
    schema: &Path,
    value: &str,
    precision: Option<String>,
    max_depth: Option<usize>,
) -> Result<Value, Failure> {
    let precision = resolve_precision(precision, std::env::var(PRECISION_ENV).ok())?;
    let schema = load_schema(schema)?;
    let value = load_value(value)?;
    let config = TranscodeConfig {
        precision,
        max_depth,
    };
    schemata_transcode::decode_with_config(&value, &schema, &config).map_err(Failure::Transcode)
}

/// Execute the template subcommand.
fn run_template(schema: &Path) -> Result<Value, Failure> {
    let schema = load_schema(schema)?;
    Ok(schemata_transcode::ui_template(&schema))
}

/// The flag wins over the environment; both absent means the default policy.
fn resolve_precision(
    flag: Option<String>,
    env: Option<String>,
) -> Result<PrecisionPolicy, Failure> {
    match flag.or(env) {
        Some(name) => name.parse().map_err(Failure::Usage),
        None => Ok(PrecisionPolicy::default()),
    }
}

fn load_schema(path: &Path) -> Result<SchemaType, Failure> {
    let text = fs::read_to_string(path)
        .map_err(|e| Failure::Input(format!("failed to read schema '{}': {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| Failure::Input(format!("invalid schema '{}': {}", path.display(), e)))
}

fn load_value(source: &str) -> Result<Value, Failure> {
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| Failure::Input(format!("failed to read stdin: {}", e)))?;
        buf
    } else {
        fs::read_to_string(source)
            .map_err(|e| Failure::Input(format!("failed to read value '{}': {}", source, e)))?
    };
    serde_json::from_str(&text)
        .map_err(|e| Failure::Input(format!("invalid JSON value '{}': {}", source, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const OPTION_SCHEMA: &str = r#"{
        "type": "Enum",
        "variants": [
            { "name": "None", "fields": { "type": "None" } },
            { "name": "Some", "fields": { "type": "Unnamed", "fields": [ { "type": "U64" } ] } }
        ]
    }"#;

    #[test]
    fn encode_then_decode_files() {
        let schema = write_temp(OPTION_SCHEMA);
        let ui = write_temp(r#"{ "tag": "Some", "Some": [12] }"#);

        let wire = run_encode(schema.path(), ui.path().to_str().unwrap(), None).unwrap();
        assert_eq!(serde_json::to_string(&wire).unwrap(), r#"{"Some":[12]}"#);

        let wire_file = write_temp(&serde_json::to_string(&wire).unwrap());
        let back = run_decode(
            schema.path(),
            wire_file.path().to_str().unwrap(),
            Some("reject".into()),
            None,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_string(&back).unwrap(),
            r#"{"tag":"Some","Some":[12]}"#
        );
    }

    #[test]
    fn template_from_file() {
        let schema = write_temp(OPTION_SCHEMA);
        let template = run_template(schema.path()).unwrap();
        assert_eq!(serde_json::to_string(&template).unwrap(), r#"{"tag":"None"}"#);
    }

    #[test]
    fn failures_map_to_exit_codes() {
        let schema = write_temp(OPTION_SCHEMA);
        let unknown = write_temp(r#"{ "tag": "Maybe" }"#);
        let err = run_encode(schema.path(), unknown.path().to_str().unwrap(), None).unwrap_err();
        assert_eq!(err.exit_code(), 1);

        let bad_schema = write_temp(r#"{ "type": "Float" }"#);
        let err = run_template(bad_schema.path()).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let err = run_template(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn large_integers_in_value_files_stay_exact() {
        let leb = write_temp(r#"{ "type": "ULeb128", "max_bytes": 10 }"#);
        let value = write_temp("18446744073709551617");
        let decoded =
            run_decode(leb.path(), value.path().to_str().unwrap(), None, None).unwrap();
        assert_eq!(decoded, Value::from("18446744073709551617"));

        let wide = write_temp(r#"{ "type": "U128" }"#);
        let value = write_temp("1267650600228229401496703205376");
        let err = run_decode(
            wide.path(),
            value.path().to_str().unwrap(),
            Some("reject".into()),
            None,
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn precision_flag_overrides_environment() {
        assert_eq!(
            resolve_precision(Some("allow".into()), Some("reject".into())).unwrap(),
            PrecisionPolicy::Allow
        );
        assert_eq!(
            resolve_precision(None, Some("reject".into())).unwrap(),
            PrecisionPolicy::Reject
        );
        assert_eq!(resolve_precision(None, None).unwrap(), PrecisionPolicy::Warn);

        let err = resolve_precision(Some("loose".into()), None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
