//! CutQuote CLI

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use cutquote_cli::{load_drawing, load_profile, summary};
use cutquote_cost::{CostAdvice, CostEstimator, Material};
use cutquote_cutting::optimize_path;
use cutquote_ffi::Quoter;
use cutquote_nesting::Nester;

#[derive(Parser)]
#[command(name = "cutquote")]
#[command(about = "Cost quotes, cutting paths, and sheet nesting for CAD drawings")]
#[command(version)]
struct Cli {
    /// Shop profile (TOML) overriding cost constants and the sheet catalog
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a drawing: entity counts, length, layers, complexity
    Analyze {
        /// Drawing file (JSON entity records)
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Estimate cost and time for one material and thickness
    Quote {
        /// Drawing file (JSON entity records)
        file: PathBuf,

        /// Material (steel, aluminum, plastic, wood, brass, copper)
        #[arg(short, long, default_value = "steel")]
        material: String,

        /// Stock thickness in mm
        #[arg(short, long)]
        thickness: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Optimize the cutting point order
    Path {
        /// Drawing file (JSON entity records)
        file: PathBuf,

        /// List every numbered step
        #[arg(long)]
        steps: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Nest the drawing's bounding box on the sheet catalog
    Nest {
        /// Drawing file (JSON entity records); omit to give --width and --height
        file: Option<PathBuf>,

        /// Part width in mm
        #[arg(long, requires = "height")]
        width: Option<f64>,

        /// Part height in mm
        #[arg(long, requires = "width")]
        height: Option<f64>,

        /// Spacing between parts in mm (overrides the profile)
        #[arg(short, long)]
        spacing: Option<f64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Full quote report as JSON
    Report {
        /// Drawing file (JSON entity records)
        file: PathBuf,

        /// Material
        #[arg(short, long, default_value = "steel")]
        material: String,

        /// Stock thickness in mm
        #[arg(short, long)]
        thickness: f64,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List materials and their machining parameters
    Materials,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_profile(cli.profile.as_deref())?;

    match cli.command {
        Commands::Analyze { file, json } => {
            let drawing = load_drawing(&file)?;
            if json {
                print_json(&drawing)?;
            } else {
                print!("{}", summary::drawing_summary(&drawing));
            }
        }

        Commands::Quote {
            file,
            material,
            thickness,
            json,
        } => {
            let drawing = load_drawing(&file)?;
            let estimator = CostEstimator::new(config.cost.clone());
            let current: Material = material.parse()?;
            let estimate = estimator.estimate_length(drawing.total_length(), current, thickness)?;
            let alternatives =
                estimator.compare_materials(drawing.total_length(), current, thickness)?;
            let advice = CostAdvice::analyze(&drawing, &estimate, &alternatives);

            if json {
                print_json(&serde_json::json!({
                    "estimate": estimate,
                    "alternatives": alternatives,
                    "advice": advice,
                }))?;
            } else {
                print!(
                    "{}",
                    summary::estimate_summary(&estimate, &alternatives, &advice, &config.cost.currency)
                );
            }
        }

        Commands::Path { file, steps, json } => {
            let drawing = load_drawing(&file)?;
            let result = optimize_path(&drawing, &config.cutting);
            if json {
                print_json(&result)?;
            } else {
                print!("{}", summary::path_summary(&result, steps));
            }
        }

        Commands::Nest {
            file,
            width,
            height,
            spacing,
            json,
        } => {
            let mut nesting_config = config.nesting.clone();
            if let Some(spacing) = spacing {
                nesting_config = nesting_config.with_spacing(spacing);
            }
            let nester = Nester::new(nesting_config);

            let result = match (file, width, height) {
                (_, Some(w), Some(h)) => nester.nest(w, h)?,
                (Some(file), _, _) => nester.nest_drawing(&load_drawing(&file)?)?,
                _ => bail!("give a drawing file or both --width and --height"),
            };
            if json {
                print_json(&result)?;
            } else {
                print!("{}", summary::nesting_summary(&result));
            }
        }

        Commands::Report {
            file,
            material,
            thickness,
            output,
        } => {
            let drawing = load_drawing(&file)?;
            let report = Quoter::new(config).quote_drawing(&drawing, &material, thickness);
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    write_output(&path, &json)?;
                    println!("Report saved to: {}", path.display());
                }
                None => println!("{}", json),
            }
            if let Some(error) = report.error {
                bail!(error);
            }
        }

        Commands::Materials => {
            print!("{}", summary::materials_table(&config.cost));
        }
    }

    Ok(())
}

fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
