//! # Calcfolio CLI
//!
//! Terminal front end over the calc_core catalog. Every subcommand prints a
//! human-readable card, or the raw JSON record with `--json`.
//!
//! ```text
//! calc_cli list
//! calc_cli show finance simple-interest
//! calc_cli run finance simple-interest -f principal=1000 -f rate=10 -f time=1
//! calc_cli run math gpa --row Math,A,3 --row History,B,3
//! calc_cli convert temperature -40 c f
//! calc_cli stats "1, 2, 2, 3" --sample
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calc_core::catalog::{self, Category, Route};
use calc_core::form::FormState;
use calc_core::format;
use calc_core::units::Quantity;
use calc_core::{CalcError, CalcResult, CalculatorId, Evaluation, FieldSpec, RawInputs, Settings};

#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(about = "Everyday calculators: conversion, finance, health, math")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Settings file (JSON)
    #[arg(long, global = true, env = "CALCFOLIO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog pages
    List {
        /// Only this category
        category: Option<String>,
    },

    /// Show a page's fields and options
    Show { category: String, calculator: String },

    /// Run a calculator
    Run {
        category: String,
        calculator: String,

        /// Field value as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,

        /// Course row as name,grade,credits (repeatable, GPA only)
        #[arg(long = "row")]
        rows: Vec<String>,
    },

    /// Convert a magnitude between two units
    Convert {
        /// length, weight, volume, area, speed or temperature
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
    },

    /// Descriptive statistics for a list of numbers
    Stats {
        /// Numbers separated by commas, semicolons or whitespace
        data: String,

        /// Use the sample (n − 1) variance
        #[arg(long)]
        sample: bool,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                print_json(&e);
            } else {
                eprintln!("Error: {}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> CalcResult<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    debug!(?settings, "settings resolved");

    match &cli.command {
        Commands::List { category } => list(category.as_deref(), cli.json),
        Commands::Show { category, calculator } => show(category, calculator, cli.json),
        Commands::Run {
            category,
            calculator,
            fields,
            rows,
        } => {
            let eval = run(category, calculator, fields, rows, &settings)?;
            print_evaluation(&eval, cli.json);
            Ok(())
        }
        Commands::Convert {
            quantity,
            value,
            from,
            to,
        } => {
            let quantity = Quantity::from_key(quantity)
                .ok_or_else(|| CalcError::calculator_not_found("conversion", quantity.as_str()))?;
            let value = value.trim().parse::<f64>().map_err(|_| {
                CalcError::invalid_input("value", value.as_str(), "Please enter a valid value")
            })?;
            let conversion = quantity.convert(value, from, to)?;
            if cli.json {
                print_json(&conversion);
            } else {
                let d = settings.conversion_digits;
                println!(
                    "{} {} = {} {}",
                    format::trimmed(conversion.value, d),
                    conversion.from_symbol,
                    format::trimmed(conversion.result, d),
                    conversion.to_symbol
                );
            }
            Ok(())
        }
        Commands::Stats { data, sample } => {
            let mode = if *sample { "sample" } else { "population" };
            let raw = RawInputs::new().with("data", data.as_str()).with("mode", mode);
            let eval = CalculatorId::Statistics.evaluate(&raw, &settings)?;
            print_evaluation(&eval, cli.json);
            Ok(())
        }
    }
}

fn list(category: Option<&str>, json: bool) -> CalcResult<()> {
    let categories: Vec<Category> = match category {
        Some(slug) => vec![Category::from_slug(slug).ok_or_else(|| CalcError::calculator_not_found(slug, "*"))?],
        None => Category::ALL.to_vec(),
    };

    if json {
        let pages: Vec<_> = categories.iter().flat_map(|c| catalog::calculators_in(*c)).collect();
        print_json(&pages);
        return Ok(());
    }

    for category in categories {
        println!("{} ({})", category.title(), category.slug());
        for page in catalog::calculators_in(category) {
            let marker = if catalog::is_available(page) { "" } else { "  [coming soon]" };
            println!("  {:<20} {}{}", page.slug, page.title, marker);
        }
        println!();
    }
    Ok(())
}

fn show(category: &str, slug: &str, json: bool) -> CalcResult<()> {
    match catalog::resolve(category, slug) {
        Route::Calculator { meta, id } => {
            if json {
                print_json(meta);
                return Ok(());
            }
            println!("{}", meta.title);
            println!("{}", meta.description);
            println!();
            println!("Fields:");
            for spec in id.fields() {
                print_field(&spec);
            }
            if !id.row_fields().is_empty() {
                println!();
                println!("Row fields (--row, comma separated in this order):");
                for spec in id.row_fields() {
                    print_field(spec);
                }
            }
            Ok(())
        }
        Route::ComingSoon {
            meta,
            category_href,
            categories_href,
        } => {
            if json {
                print_json(meta);
                return Ok(());
            }
            println!("{}", meta.title);
            println!("{}", meta.description);
            println!();
            println!("This calculator is coming soon.");
            println!("  More in this category: {}", category_href);
            println!("  All categories:        {}", categories_href);
            Ok(())
        }
        Route::NotFound => Err(CalcError::calculator_not_found(category, slug)),
    }
}

fn print_field(spec: &FieldSpec) {
    let mut line = format!("  {:<14} {}", spec.key, spec.label);
    if !spec.default.is_empty() {
        line.push_str(&format!(" [default: {}]", spec.default));
    }
    println!("{}", line);
    let options = spec.options();
    if !options.is_empty() {
        let keys: Vec<_> = options.iter().map(|o| o.key).collect();
        println!("  {:<14} one of: {}", "", keys.join(", "));
    }
}

/// Feed fields and rows through a form, as if typed, then compute
fn run(
    category: &str,
    slug: &str,
    fields: &[(String, String)],
    rows: &[String],
    settings: &Settings,
) -> CalcResult<Evaluation> {
    let (_, id) = catalog::lookup(category, slug)?;
    let mut form = FormState::new(id);

    for (key, value) in fields {
        if !form.set_field(key, value) {
            return Err(CalcError::invalid_input(
                key.as_str(),
                value.as_str(),
                format!("'{}' is not accepted for field '{}'", value, key),
            ));
        }
    }

    let row_specs = id.row_fields();
    for (index, row) in rows.iter().enumerate() {
        if row_specs.is_empty() {
            return Err(CalcError::invalid_input("rows", row.as_str(), format!("{} does not take rows", id)));
        }
        let parts: Vec<&str> = row.split(',').collect();
        if parts.len() != row_specs.len() {
            let expected: Vec<_> = row_specs.iter().map(|s| s.key).collect();
            return Err(CalcError::invalid_input(
                format!("rows[{}]", index),
                row.as_str(),
                format!("Row {}: expected {}", index + 1, expected.join(",")),
            ));
        }
        if index > 0 {
            form.add_row();
        }
        for (spec, value) in row_specs.iter().zip(parts) {
            let value = value.trim();
            if !form.set_row_field(index, spec.key, value) {
                return Err(CalcError::invalid_input(
                    format!("rows[{}].{}", index, spec.key),
                    value,
                    format!("Course {}: '{}' is not accepted for {}", index + 1, value, spec.label),
                ));
            }
        }
    }

    id.evaluate(form.inputs(), settings)
}

fn print_evaluation(eval: &Evaluation, json: bool) {
    if json {
        print_json(eval);
    } else {
        print_card(eval);
    }
}

fn print_card(eval: &Evaluation) {
    let width = eval.lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    println!("═══════════════════════════════════════");
    println!("  {}", eval.calculator.name().to_uppercase());
    println!("═══════════════════════════════════════");
    for line in &eval.lines {
        println!("  {:<width$}  {}", line.label, line.value, width = width);
    }
    println!();
    println!("{}", eval.summary);
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}
