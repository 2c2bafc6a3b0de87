//! # Reckon CLI Application
//!
//! Terminal front end for the Reckon calculators. Each subcommand builds a
//! [`ToolInput`], runs it through `calc_core` and prints the result either
//! as text or, with `--json`, as the JSON `ToolOutput`.
//!
//! ```text
//! reckon convert length 1 mile km
//! reckon stats 5 8 12 14 17 17 19 21
//! reckon growth --start 10000 --end 15000 --years 5
//! reckon decimal 1 3
//! reckon base FF --from hex
//! reckon run request.json --json
//! ```

mod render;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use calc_core::calculations::bases::Radix;
use calc_core::calculations::growth::{parse_date, Period};
use calc_core::calculations::text::CaseStyle;
use calc_core::calculations::{
    BaseInput, BmiInput, ConversionInput, CountdownInput, DecimalToFractionInput, FractionToDecimalInput,
    GenerationInput, GrowthInput, StatisticsInput, TextInput,
};
use calc_core::errors::parse_optional_f64;
use calc_core::format::{format_value, Precision};
use calc_core::{load_settings, read_text, write_text_atomic, CalcError, CalcResult, Settings, ToolInput, ToolOutput};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reckon")]
#[command(about = "Reckon - calculators and converters", long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true, env = "RECKON_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Decimals shown for converted values (default: settings, else automatic)
    #[arg(long, global = true)]
    precision: Option<u8>,

    /// Write the rendered result to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between units of one dimension
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Dimension table (length, weight, volume, area, data, or a configured table)
        dimension: String,
        /// Value to convert
        value: String,
        /// Unit of the value
        from: String,
        /// Target unit (omit to list every unit)
        to: Option<String>,
    },
    /// List unit tables
    Units {
        /// Show only this dimension
        dimension: Option<String>,
    },
    /// Descriptive statistics for a list of numbers
    #[command(allow_negative_numbers = true)]
    Stats {
        /// Numbers separated by spaces, commas, semicolons or newlines
        values: Vec<String>,
        /// Read the numbers from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Compound annual growth rate
    Growth {
        /// Starting value
        #[arg(long)]
        start: f64,
        /// Ending value
        #[arg(long)]
        end: f64,
        #[arg(long, default_value_t = 0.0)]
        years: f64,
        #[arg(long, default_value_t = 0.0)]
        months: f64,
        #[arg(long, default_value_t = 0.0)]
        days: f64,
        /// Start date (YYYY-MM-DD); use with --to-date instead of years/months/days
        #[arg(long, requires = "to_date")]
        from_date: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long, requires = "from_date")]
        to_date: Option<String>,
    },
    /// Decimal to fraction
    #[command(allow_negative_numbers = true)]
    Fraction {
        /// Decimal, including any non-repeating digits (e.g. 0.1)
        decimal: String,
        /// Digits that repeat forever after the decimal (e.g. 6 for 0.1666...)
        #[arg(short, long, default_value = "")]
        repeating: String,
    },
    /// Fraction to decimal, marking repeating digits
    #[command(allow_negative_numbers = true)]
    Decimal { numerator: i64, denominator: i64 },
    /// Convert an integer between binary, octal, decimal and hexadecimal
    #[command(allow_negative_numbers = true)]
    Base {
        value: String,
        /// Base of the input: 2, 8, 10, 16 or bin, oct, dec, hex
        #[arg(long, default_value = "10")]
        from: String,
    },
    /// Body mass index
    Bmi {
        /// Weight (kg, or lb with --imperial)
        #[arg(long)]
        weight: f64,
        /// Height (cm, or ft with --imperial)
        #[arg(long)]
        height: f64,
        /// Additional inches (imperial only)
        #[arg(long, default_value_t = 0.0)]
        inches: f64,
        /// Use pounds and feet/inches
        #[arg(long)]
        imperial: bool,
    },
    /// Time left until Christmas
    Countdown {
        /// Reference time (YYYY-MM-DDTHH:MM:SS), default now
        #[arg(long)]
        now: Option<NaiveDateTime>,
    },
    /// Word and character counts, case conversion
    Text {
        /// Text to analyse
        words: Vec<String>,
        /// Read the text from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Convert case: upper, lower, title, sentence, camel, snake, kebab
        #[arg(long)]
        case: Option<String>,
    },
    /// Generation for a birth year
    Generation { birth_year: i32 },
    /// Run a JSON tool request from a file, or stdin when omitted or "-"
    Run { request: Option<PathBuf> },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    let settings = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            load_settings(path)?
        }
        None => Settings::default(),
    };
    let precision = cli.precision.map(Precision::Decimals).unwrap_or(settings.precision);

    let rendered = match &cli.command {
        Commands::Units { dimension } => list_units(&settings, dimension.as_deref())?,
        command => {
            let output = match build_input(command)? {
                Some(input) => input.run(&settings)?,
                None => ToolOutput::Empty,
            };
            if cli.json {
                let mut json = serde_json::to_string_pretty(&output)?;
                json.push('\n');
                json
            } else {
                render::render(&output, precision)
            }
        }
    };

    match &cli.output {
        Some(path) => write_text_atomic(path, &rendered),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

/// Translate a subcommand into a tool request. `None` means nothing was entered.
fn build_input(command: &Commands) -> CalcResult<Option<ToolInput>> {
    let input = match command {
        Commands::Convert { dimension, value, from, to } => match parse_optional_f64("value", value)? {
            Some(value) => ToolInput::Conversion(ConversionInput {
                dimension: dimension.clone(),
                value,
                from_unit: from.clone(),
                to_unit: to.clone(),
            }),
            None => return Ok(None),
        },
        Commands::Stats { values, file } => ToolInput::Statistics(StatisticsInput {
            data: text_source(values, file.as_deref())?,
        }),
        Commands::Growth { start, end, years, months, days, from_date, to_date } => {
            let period = match (from_date, to_date) {
                (Some(from), Some(to)) => Period::Dates {
                    start: parse_date("from_date", from)?,
                    end: parse_date("to_date", to)?,
                },
                _ => Period::Duration {
                    years: *years,
                    months: *months,
                    days: *days,
                },
            };
            ToolInput::Growth(GrowthInput {
                start_value: *start,
                end_value: *end,
                period,
            })
        }
        Commands::Fraction { decimal, repeating } => ToolInput::DecimalToFraction(DecimalToFractionInput {
            decimal: decimal.clone(),
            repeating: repeating.clone(),
        }),
        Commands::Decimal { numerator, denominator } => ToolInput::FractionToDecimal(FractionToDecimalInput {
            numerator: *numerator,
            denominator: *denominator,
        }),
        Commands::Base { value, from } => ToolInput::Base(BaseInput {
            value: value.clone(),
            radix: Radix::from_name(from)?,
        }),
        Commands::Bmi { weight, height, inches, imperial } => ToolInput::Bmi(if *imperial {
            BmiInput::Imperial {
                weight_lb: *weight,
                height_ft: *height,
                height_in: *inches,
            }
        } else {
            BmiInput::Metric {
                weight_kg: *weight,
                height_cm: *height,
            }
        }),
        Commands::Countdown { now } => ToolInput::Countdown(CountdownInput {
            now: now.unwrap_or_else(|| Local::now().naive_local()),
        }),
        Commands::Text { words, file, case } => ToolInput::Text(TextInput {
            text: text_source(words, file.as_deref())?,
            case: case.as_deref().map(CaseStyle::from_name).transpose()?,
        }),
        Commands::Generation { birth_year } => ToolInput::Generation(GenerationInput {
            birth_year: *birth_year,
        }),
        Commands::Run { request } => {
            let json = match request {
                Some(path) if path.as_os_str() != "-" => read_text(path)?,
                _ => read_stdin()?,
            };
            serde_json::from_str(&json)?
        }
        Commands::Units { .. } => {
            return Err(CalcError::Internal {
                message: "units is not a calculator".to_string(),
            })
        }
    };
    debug!(tool = input.tool_name(), "built tool request");
    Ok(Some(input))
}

fn text_source(args: &[String], file: Option<&Path>) -> CalcResult<String> {
    match file {
        Some(path) => read_text(path),
        None => Ok(args.join(" ")),
    }
}

fn read_stdin() -> CalcResult<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| CalcError::file_error("read", "<stdin>", e.to_string()))?;
    Ok(buf)
}

fn list_units(settings: &Settings, only: Option<&str>) -> CalcResult<String> {
    let names = match only {
        Some(name) => vec![name.to_string()],
        None => settings.dimension_names(),
    };
    let mut out = String::new();
    for name in names {
        let table = settings.unit_table(&name)?;
        out.push_str(&format!("{} (base: {})\n", table.dimension, table.base_unit));
        for unit in &table.units {
            out.push_str(&format!(
                "  {:<6} {:<20} = {} {}\n",
                unit.symbol,
                unit.name,
                format_value(unit.factor, Precision::Auto),
                table.base_unit
            ));
        }
    }
    Ok(out)
}
