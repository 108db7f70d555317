use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uplink_core::families::Family;
use uplink_core::{DecodeResult, Uplink, decode_uplink};

mod config;
mod input;

use config::Config;

const EXAMPLES: &str = "Examples:\n  uplink decode uplink.json --family ws301 --stdout\n  uplink decode --hex 01755703671001046857 --family milesight --stdout --pretty\n  uplink decode 'captures/*.json' --device 24e124136b502217 --config uplink.toml -o result.json\n  uplink families --family sensor-node";

#[derive(Parser, Debug)]
#[command(name = "uplink")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("UPLINK_BUILD_COMMIT"),
    ", ",
    env!("UPLINK_BUILD_DATE"),
    ")"
))]
#[command(
    about = "Decode LoRaWAN uplink payloads into named readings.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Optional TOML config (default family, device map, logging)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for stderr diagnostics (overrides the config; RUST_LOG wins over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one uplink and write the {data, warnings, errors} JSON result.
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),

    /// List device families and their field tables as JSON.
    Families {
        /// Only show this family
        #[arg(long)]
        family: Option<Family>,
    },
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Uplink JSON file ({"bytes": [...], "fPort": n} or null); glob patterns allowed
    #[arg(required_unless_present = "hex", conflicts_with = "hex")]
    input: Option<PathBuf>,

    /// Payload bytes as hex instead of an input file
    #[arg(long)]
    hex: Option<String>,

    /// LoRaWAN fPort (overrides the file's fPort)
    #[arg(long)]
    port: Option<u8>,

    /// Device family
    #[arg(long, conflicts_with = "device")]
    family: Option<Family>,

    /// Device EUI to look up in the config's [[device]] table
    #[arg(long)]
    device: Option<String>,

    /// Output result path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write JSON result to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if the result carries errors
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = match cli.config.as_ref() {
        Some(path) => Config::load(path).map_err(|err| {
            CliError::new(
                err.to_string(),
                Some("see `uplink --help` for the config layout".to_string()),
            )
        })?,
        None => Config::default(),
    };
    init_logging(cli.log_level.as_deref(), &config)?;
    if let Some(path) = cli.config.as_ref() {
        debug!(path = %path.display(), devices = config.devices.len(), "config loaded");
    }

    match cli.command {
        Commands::Decode(args) => cmd_decode(args, &config),
        Commands::Families { family } => cmd_families(family),
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn init_logging(cli_level: Option<&str>, config: &Config) -> Result<(), CliError> {
    let level = cli_level.unwrap_or(&config.logging.level);
    config::validate_log_level(level).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some(format!("choose one of: {}", config::LOG_LEVELS.join(", "))),
        )
    })?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn cmd_decode(args: DecodeArgs, config: &Config) -> Result<(), CliError> {
    let family = resolve_family(&args, config)?;

    let (uplink, input_path) = match (args.hex.as_deref(), args.input.as_ref()) {
        (Some(hex), _) => {
            let bytes = input::parse_hex(hex)?;
            let uplink = Uplink {
                bytes,
                f_port: args.port.unwrap_or_default(),
            };
            (Some(uplink), None)
        }
        (None, Some(input)) => {
            let resolved = input::resolve_input_path(input)?;
            input::validate_input_file(&resolved)?;
            let mut uplink = input::read_uplink(&resolved)?;
            if let (Some(uplink), Some(port)) = (uplink.as_mut(), args.port) {
                uplink.f_port = port;
            }
            (uplink, Some(resolved))
        }
        (None, None) => {
            return Err(CliError::new(
                "missing uplink input",
                Some("pass an uplink .json file or use --hex".to_string()),
            ));
        }
    };

    let output = if args.stdout {
        None
    } else {
        Some(args.output.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };
    if let (Some(output), Some(input)) = (output.as_ref(), input_path.as_ref()) {
        ensure_distinct(output, input)?;
    }

    info!(%family, "decoding uplink");
    let result = decode_uplink(family, uplink.as_ref());
    let pretty = args.pretty || (config.decode.pretty && !args.compact);
    let json = serialize_result(&result, pretty, args.compact)?;

    match output.as_ref() {
        None => println!("{}", json),
        Some(output) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(output, format!("{}\n", json))
                .with_context(|| format!("Failed to write result: {}", output.display()))?;
        }
    }

    if !args.quiet {
        for warning in &result.warnings {
            eprintln!("warning: {}", warning);
        }
        if let Some(output) = output.as_ref() {
            eprintln!("OK: result written -> {}", output.display());
        }
    }
    if args.strict && !result.errors.is_empty() {
        return Err(CliError::new(
            format!("decode failed: {}", result.errors.join("; ")),
            Some("check the payload length and the selected family".to_string()),
        ));
    }
    Ok(())
}

fn resolve_family(args: &DecodeArgs, config: &Config) -> Result<Family, CliError> {
    if let Some(family) = args.family {
        return Ok(family);
    }
    if let Some(dev_eui) = args.device.as_deref() {
        return config.family_for_device(dev_eui).ok_or_else(|| {
            CliError::new(
                format!("no family configured for device '{}'", dev_eui),
                Some("add a [[device]] entry to the config passed with --config".to_string()),
            )
        });
    }
    config.decode.family.ok_or_else(|| {
        CliError::new(
            "no device family selected",
            Some(format!(
                "use --family ({}), --device, or set [decode] family in the config",
                Family::ALL.map(Family::name).join(", ")
            )),
        )
    })
}

fn ensure_distinct(output: &PathBuf, input: &PathBuf) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let Some(parent) = output.parent() else {
        return Ok(());
    };
    let parent = if parent.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        parent.to_path_buf()
    };
    let Ok(output_dir) = fs::canonicalize(&parent) else {
        return Ok(());
    };
    let Some(file_name) = output.file_name() else {
        return Err(CliError::new(
            format!("invalid output path: {}", output.display()),
            Some("use a file path for -o/--output".to_string()),
        ));
    };
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_result(result: &DecodeResult, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(result)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(result)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

#[derive(Debug, Serialize)]
struct FamilyListing {
    family: Family,
    grammar: &'static str,
    fields: Vec<FieldListing>,
}

#[derive(Debug, Serialize)]
struct FieldListing {
    tag: String,
    name: &'static str,
    width: usize,
    keys: Vec<&'static str>,
}

fn cmd_families(only: Option<Family>) -> Result<(), CliError> {
    let mut listing = Vec::new();
    for family in Family::ALL {
        if only.is_some_and(|only| only != family) {
            continue;
        }
        let registry = family.registry().map_err(|err| {
            CliError::new(
                format!("field table for {} is invalid: {}", family, err),
                None,
            )
        })?;
        let fields = registry
            .fields()
            .iter()
            .map(|field| FieldListing {
                tag: field.tag.to_string(),
                name: field.name,
                width: field.width,
                keys: field.keys().collect(),
            })
            .collect();
        listing.push(FamilyListing {
            family,
            grammar: family.grammar().name,
            fields,
        });
    }

    let json = serde_json::to_string_pretty(&listing).context("JSON serialization failed")?;
    println!("{}", json);
    Ok(())
}
