// tgrid - headless table filtering and summarizing over CSV input

mod exit_codes;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use tallygrid_engine::merge::{apply_plan, consolidate, detect_groups, MergedArea};
use tallygrid_engine::visibility::compress_runs;
use tallygrid_engine::{FilterSession, TableRegion, VisibilityRun};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "tgrid")]
#[command(about = "Filter, consolidate and summarize CSV tables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print each column's filter field (header + distinct values) as JSON
    #[command(after_help = "\
Examples:
  tgrid values sales.csv
  cat sales.csv | tgrid values")]
    Values {
        /// Input file (omit to read from stdin)
        input: Option<PathBuf>,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// Filter rows by keep-lists and print the visible-row summary as JSON
    #[command(after_help = "\
Examples:
  tgrid summarize sales.csv --id-col id --amount-col Amount
  tgrid summarize sales.csv --id-col 0 --amount-col 3 --keep 'Region=East,West'
  tgrid summarize sales.csv --id-col id --amount-col amt --keep Status=Paid --runs")]
    Summarize {
        /// Input file (omit to read from stdin)
        input: Option<PathBuf>,

        /// Identifier column (0-based index or header name)
        #[arg(long)]
        id_col: String,

        /// Amount column (0-based index or header name)
        #[arg(long)]
        amount_col: String,

        /// Keep only these values for a column: 'COLUMN=V1,V2'. Repeatable.
        #[arg(long, value_name = "SPEC")]
        keep: Vec<String>,

        /// Include visibility runs (1-based data-row ranges) in the output
        #[arg(long)]
        runs: bool,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// Collapse merged-looking spans in one column, write consolidated CSV
    #[command(after_help = "\
Examples:
  tgrid consolidate invoices.csv --column Customer
  tgrid consolidate invoices.csv --column 0 --area 1:3 --area 5:2")]
    Consolidate {
        /// Input file (omit to read from stdin)
        input: Option<PathBuf>,

        /// Column to scan (0-based index or header name)
        #[arg(long)]
        column: String,

        /// Explicit merged span 'DATA_ROW:ROW_SPAN' (0-based, repeatable).
        /// When present, value-pattern inference is skipped.
        #[arg(long, value_name = "SPAN")]
        area: Vec<String>,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Values { input, delimiter } => run_values(input, delimiter),
        Commands::Summarize {
            input,
            id_col,
            amount_col,
            keep,
            runs,
            delimiter,
        } => run_summarize(input, &id_col, &amount_col, &keep, runs, delimiter),
        Commands::Consolidate {
            input,
            column,
            area,
            delimiter,
        } => run_consolidate(input, &column, &area, delimiter),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(msg) => {
            eprintln!("tgrid: {msg}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn load(input: Option<PathBuf>, delimiter: char) -> Result<TableRegion, String> {
    match input {
        Some(path) => table::load_region(&path, delimiter),
        None => table::load_region_stdin(delimiter),
    }
}

#[derive(Serialize)]
struct FieldView<'a> {
    column: usize,
    header: &'a str,
    values: &'a [String],
}

fn run_values(input: Option<PathBuf>, delimiter: char) -> Result<(), String> {
    let region = load(input, delimiter)?;
    let mut session = FilterSession::new(region);
    let fields: Vec<FieldView> = session
        .enable_filtering()
        .fields()
        .iter()
        .map(|f| FieldView {
            column: f.column,
            header: &f.header,
            values: &f.values,
        })
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&fields).map_err(|e| e.to_string())?
    );
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput {
    visible_row_count: usize,
    total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    runs: Option<Vec<VisibilityRun>>,
}

fn run_summarize(
    input: Option<PathBuf>,
    id_col: &str,
    amount_col: &str,
    keep: &[String],
    runs: bool,
    delimiter: char,
) -> Result<(), String> {
    let region = load(input, delimiter)?;
    let id_column = table::resolve_column(&region, id_col)?;
    let amount_column = table::resolve_column(&region, amount_col)?;

    let mut session = FilterSession::new(region);
    session.enable_filtering();
    for spec in keep {
        let (column, values) = table::parse_keep_spec(spec)?;
        let column = table::resolve_column(session.region(), &column)?;
        session
            .model_mut()
            .map_err(|e| e.to_string())?
            .select_only(column, &values)
            .map_err(|e| e.to_string())?;
    }

    let summary = session.summarize(id_column, amount_column);
    let output = SummaryOutput {
        visible_row_count: summary.visible_row_count,
        total_amount: summary.total_amount,
        runs: runs.then(|| compress_runs(&session.visibility().visible)),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?
    );
    Ok(())
}

fn parse_area(spec: &str) -> Result<(usize, usize), String> {
    let (row, span) = spec
        .split_once(':')
        .ok_or_else(|| format!("bad area '{spec}', expected DATA_ROW:ROW_SPAN"))?;
    let row = row
        .parse::<usize>()
        .map_err(|_| format!("bad area row in '{spec}'"))?;
    let span = span
        .parse::<usize>()
        .map_err(|_| format!("bad area span in '{spec}'"))?;
    Ok((row, span))
}

fn run_consolidate(
    input: Option<PathBuf>,
    column: &str,
    area_specs: &[String],
    delimiter: char,
) -> Result<(), String> {
    let region = load(input, delimiter)?;
    let column = table::resolve_column(&region, column)?;

    let mut areas = Vec::with_capacity(area_specs.len());
    for spec in area_specs {
        let (row, row_span) = parse_area(spec)?;
        areas.push(MergedArea {
            row,
            column,
            row_span,
            col_span: 1,
        });
    }

    let mut data = region.data_rows().to_vec();
    let scan = detect_groups(column, &data, &areas);
    if scan.groups.is_empty() {
        eprintln!("tgrid: no merge groups found, output is unchanged");
    } else {
        let plan = consolidate(&data, &scan.groups);
        apply_plan(&mut data, &plan);
    }

    let mut rows = vec![region.header().to_vec()];
    rows.extend(data);
    table::write_rows(std::io::stdout(), &rows)
}
