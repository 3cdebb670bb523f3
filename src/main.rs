use biligram::config::{AppConfig, OutputFormat};
use biligram::error::AppError;
use biligram::intake::{parse_charted_time, InfantForm, ReadingTable};
use biligram::nomogram::{
    classify_risk, classify_treatment, RiskZone, TreatmentCategory, TreatmentZone,
};
use biligram::report::{ChartSeries, InfantSummary};
use biligram::telemetry;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "biligram",
    about = "Place newborn bilirubin results on the Bhutani and AAP nomograms",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate an infant's charted bilirubin results
    Evaluate(EvaluateArgs),
    /// Classify a single reading
    Zone(ZoneArgs),
    /// Print the nomogram curves as chart series
    Curves(CurvesArgs),
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Date of birth (YYYY-MM-DD, M/D/YYYY or M/D/YY)
    #[arg(long, default_value = "")]
    birth_date: String,
    /// Time of birth (HH:MM, HHMM or HMM)
    #[arg(long, default_value = "")]
    birth_time: String,
    /// Gestational age at birth, e.g. "38" or "35 3/7"
    #[arg(long, default_value = "")]
    ga: String,
    /// Birth weight in kg
    #[arg(long, default_value = "")]
    weight: String,
    /// CSV table of results with Method,Time,Level columns
    #[arg(long)]
    readings: Option<PathBuf>,
    /// Charted phototherapy start time; may be repeated
    #[arg(long = "phototherapy")]
    phototherapy: Vec<String>,
    /// Hours of phototherapy assumed per charted start time
    #[arg(long)]
    phototherapy_hours: Option<f64>,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args, Debug)]
struct ZoneArgs {
    /// Age in hours of life
    #[arg(long)]
    hours: f64,
    /// Bilirubin level in mg/dL
    #[arg(long)]
    level: f64,
    /// Gestational age at birth in weeks
    #[arg(long)]
    ga: f64,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Args, Debug)]
struct CurvesArgs {
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl FormatArg {
    fn resolve(arg: Option<Self>, config: &AppConfig) -> OutputFormat {
        match arg {
            Some(FormatArg::Text) => OutputFormat::Text,
            Some(FormatArg::Json) => OutputFormat::Json,
            None => config.output,
        }
    }
}

#[derive(Debug, Serialize)]
struct ZoneResponse {
    hours: f64,
    level: f64,
    gestational_age_weeks: f64,
    risk_zone: RiskZone,
    #[serde(flatten)]
    treatment: TreatmentZone,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, output = ?config.output, "configuration loaded");

    match cli.command {
        Command::Evaluate(args) => run_evaluate(args, &config),
        Command::Zone(args) => run_zone(args, &config),
        Command::Curves(args) => run_curves(args, &config),
    }
}

fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<(), AppError> {
    let EvaluateArgs {
        birth_date,
        birth_time,
        ga,
        weight,
        readings,
        phototherapy,
        phototherapy_hours,
        format,
    } = args;

    let mut infant = InfantForm {
        birth_date,
        birth_time,
        gestational_age: ga,
        weight,
    }
    .into_infant()?;

    if let Some(path) = readings {
        let table = ReadingTable::from_path(&path)?;
        info!(path = %path.display(), readings = table.len(), "loaded bilirubin results");
        table.apply_to(&mut infant);
    }

    let starts = phototherapy
        .iter()
        .map(|raw| {
            parse_charted_time(raw)
                .ok_or_else(|| AppError::Input(format!("unreadable phototherapy time '{raw}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    infant.set_phototherapy_times(
        starts,
        Some(phototherapy_hours.unwrap_or(config.intake.phototherapy_hours)),
    );

    let summary = InfantSummary::from_infant(&infant);
    match FormatArg::resolve(format, config) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => render_summary(&summary),
    }

    Ok(())
}

fn run_zone(args: ZoneArgs, config: &AppConfig) -> Result<(), AppError> {
    let response = ZoneResponse {
        hours: args.hours,
        level: args.level,
        gestational_age_weeks: args.ga,
        risk_zone: classify_risk(args.hours, args.level),
        treatment: classify_treatment(args.hours, args.level, args.ga),
    };

    match FormatArg::resolve(args.format, config) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => {
            println!(
                "{} mg/dL at {} h ({} weeks)",
                response.level, response.hours, response.gestational_age_weeks
            );
            println!("- Risk zone: {}", response.risk_zone);
            println!(
                "- Phototherapy: {}",
                category_label(response.treatment.phototherapy)
            );
            println!(
                "- Transfusion: {}",
                category_label(response.treatment.transfusion)
            );
        }
    }

    Ok(())
}

fn run_curves(args: CurvesArgs, config: &AppConfig) -> Result<(), AppError> {
    let chart = ChartSeries::for_infant(None);

    match FormatArg::resolve(args.format, config) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
        OutputFormat::Text => {
            println!("Risk zones");
            for band in &chart.risk_bands {
                let points = band
                    .points
                    .iter()
                    .map(|point| format!("{}h {}-{}", point.hour, point.low, point.high))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("- {}: {}", band.zone_label, points);
            }

            println!("\nTreatment thresholds");
            for line in &chart.treatment_lines {
                let points = line
                    .points
                    .iter()
                    .map(|point| format!("{}h {}", point.hour, point.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("- {} {}: {}", line.kind, line.category, points);
            }
        }
    }

    Ok(())
}

fn category_label(category: Option<TreatmentCategory>) -> &'static str {
    category.map(TreatmentCategory::label).unwrap_or("none")
}

fn render_summary(summary: &InfantSummary) {
    println!("Bilirubin nomogram");
    println!(
        "Born {} at {} weeks, {} kg",
        summary.birth.format("%-m/%-d/%Y %H:%M"),
        summary.gestational_age,
        summary.weight_kg
    );

    if summary.warnings.is_empty() {
        println!("\nWarnings: none");
    } else {
        println!("\nWarnings");
        for warning in &summary.warnings {
            println!("- [{}] {}", warning.code, warning.message);
        }
    }

    if summary.bilis.is_empty() {
        println!("\nResults: none");
    } else {
        println!("\nResults (newest first)");
        for row in &summary.bilis {
            println!(
                "- {} | {} h | {} mg/dL {} | risk {} | phototherapy {} | transfusion {}",
                row.time_label,
                row.hours,
                row.level,
                row.method_label,
                row.risk_zone_label,
                category_label(row.phototherapy_zone),
                category_label(row.transfusion_zone)
            );
        }
    }

    if !summary.phototherapy.is_empty() {
        println!("\nPhototherapy");
        for interval in &summary.phototherapy {
            println!("- {:.1} h to {:.1} h", interval.start, interval.end);
        }
    }
}
