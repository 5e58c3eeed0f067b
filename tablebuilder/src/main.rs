//! # tablebuilder
//!
//! Render JSON records as console tables.
//!
//! ## Overview
//!
//! tablebuilder is built on top of tablebuilderlib. It reads a JSON array of
//! records, takes the table shape from a declaration file (or guesses it
//! from the first record), builds the grid and draws it.
//!
//! ## Usage
//!
//! ```bash
//! # Columns guessed from the first record
//! tablebuilder records.json
//!
//! # Declared fields, read from stdin, transposed
//! cat records.json | tablebuilder --spec table.json --transposed
//!
//! # Declared footer switched off for this run
//! tablebuilder records.json --spec table.json --no-footer
//!
//! # Pick and reorder columns, group runs of equal categories
//! tablebuilder records.json --columns name,price --section-by category
//!
//! # The built grid as JSON
//! tablebuilder records.json --output json
//!
//! # The shopping-cart demo
//! tablebuilder demo
//! ```

mod declaration;
mod logging;
mod render;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use tablebuilderlib::{
    reducers, BoxError, BuildOptions, Field, FieldSet, Grid, Justify, Path, TableBuilder,
    TableOptions, Value,
};
use tracing::{debug, info};

use declaration::{infer_fields, parse_records, Declaration};
use render::TextRenderer;

fn render_args() -> Vec<Arg> {
    vec![
        Arg::new("records")
            .help("JSON array of records ('-' for stdin)")
            .default_value("-"),
        Arg::new("spec")
            .short('s')
            .long("spec")
            .value_name("FILE")
            .help("Table declaration (JSON); fields are guessed when omitted"),
        Arg::new("columns")
            .short('c')
            .long("columns")
            .value_delimiter(',')
            .help("Show only these fields, in this order (comma-separated)"),
        Arg::new("transposed")
            .short('t')
            .long("transposed")
            .action(ArgAction::SetTrue)
            .help("Show fields as rows and records as columns"),
        Arg::new("section-by")
            .long("section-by")
            .value_name("PATH")
            .help("Separate runs of records with equal values at PATH"),
        Arg::new("title").long("title").help("Table title"),
        Arg::new("caption").long("caption").help("Table caption"),
        Arg::new("footer")
            .long("footer")
            .action(ArgAction::SetTrue)
            .overrides_with("no-footer")
            .help("Show the footer row"),
        Arg::new("no-footer")
            .long("no-footer")
            .action(ArgAction::SetTrue)
            .overrides_with("footer")
            .help("Hide the footer row"),
        Arg::new("header")
            .long("header")
            .action(ArgAction::SetTrue)
            .overrides_with("no-header")
            .help("Show the header row"),
        Arg::new("no-header")
            .long("no-header")
            .action(ArgAction::SetTrue)
            .overrides_with("header")
            .help("Hide the header row"),
        Arg::new("borders")
            .long("borders")
            .value_parser(["ascii", "light", "heavy", "minimal"])
            .help("Border glyphs"),
        output_arg(),
    ]
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(["text", "json"])
        .default_value("text")
        .help("Output format")
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("tablebuilder")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render JSON records as console tables from declared fields")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More diagnostics on stderr (repeatable)"),
        )
        .args(render_args())
        .subcommand(
            Command::new("render")
                .about("Render records as a table (default command)")
                .args(render_args()),
        )
        .subcommand(
            Command::new("demo")
                .about("Render the shopping-cart example")
                .arg(
                    Arg::new("transposed")
                        .short('t')
                        .long("transposed")
                        .action(ArgAction::SetTrue)
                        .help("Show fields as rows"),
                )
                .arg(output_arg()),
        )
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read records from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read '{}'", source))
    }
}

/// Call-time options from flags; they win over the declaration.
fn flag_options(matches: &ArgMatches) -> Result<BuildOptions> {
    let mut table = TableOptions::new();
    if let Some(title) = matches.get_one::<String>("title") {
        table = table.title(title.as_str());
    }
    if let Some(caption) = matches.get_one::<String>("caption") {
        table = table.caption(caption.as_str());
    }
    if let Some(borders) = matches.get_one::<String>("borders") {
        table = table.borders(borders.as_str());
    }
    if matches.get_flag("footer") {
        table = table.show_footer(true);
    } else if matches.get_flag("no-footer") {
        table = table.show_footer(false);
    }
    if matches.get_flag("header") {
        table = table.show_header(true);
    } else if matches.get_flag("no-header") {
        table = table.show_header(false);
    }

    let mut options = BuildOptions::new().table(table);
    if matches.get_flag("transposed") {
        options = options.transposed(true);
    }
    if let Some(expr) = matches.get_one::<String>("section-by") {
        options = options.section_by(Path::parse(expr).context("--section-by")?);
    }
    Ok(options)
}

fn emit(grid: &Grid, matches: &ArgMatches) -> Result<String> {
    match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => {
            let mut text = serde_json::to_string_pretty(grid)?;
            text.push('\n');
            Ok(text)
        }
        _ => grid.render_with(&TextRenderer::new()),
    }
}

/// Handler for the render command
fn render_handler(matches: &ArgMatches) -> Result<String> {
    let source = matches
        .get_one::<String>("records")
        .map(|s| s.as_str())
        .unwrap_or("-");
    let records = parse_records(&read_input(source)?)?;

    let (mut fields, declared) = match matches.get_one::<String>("spec") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path))?;
            let declaration = Declaration::from_json(&text)?;
            (declaration.field_set()?, declaration.build_options()?)
        }
        None => {
            debug!("no declaration given, guessing fields from the first record");
            (infer_fields(&records)?, BuildOptions::new())
        }
    };

    if let Some(columns) = matches.get_many::<String>("columns") {
        let names: Vec<&str> = columns.map(|s| s.as_str()).collect();
        fields = fields.select(&names)?;
    }

    info!(
        records = records.len(),
        fields = fields.len(),
        "building table"
    );
    let builder = TableBuilder::with_options(fields, declared);
    let grid = builder.build_with(&records, &flag_options(matches)?)?;
    emit(&grid, matches)
}

/// Dollar amounts; negatives in red parentheses.
fn currency(value: &Value) -> std::result::Result<String, BoxError> {
    let amount = value.as_f64().ok_or("not a number")?;
    if amount >= 0.0 {
        Ok(format!("${:.2}", amount))
    } else {
        Ok(console::style(format!("(${:.2})", -amount))
            .red()
            .to_string())
    }
}

fn cart_builder() -> Result<TableBuilder> {
    let fields = FieldSet::new()
        .field(
            "name",
            Field::new("Item Name")
                .key("name")
                .footer("Total")
                .style("bold")
                .color_by_value(),
        )?
        .field(
            "price",
            Field::new("Price")
                .key("price")
                .footer("-")
                .formatter(currency)
                .justify(Justify::Right),
        )?
        .field(
            "quantity",
            Field::new("Quantity")
                .key("quantity")
                .footer_with(reducers::sum)
                .justify(Justify::Right),
        )?
        .field(
            "subtotal",
            Field::new("Subtotal")
                .compute(|item: &Value, _| {
                    let quantity = item["quantity"].as_f64().ok_or("quantity missing")?;
                    let price = item["price"].as_f64().ok_or("price missing")?;
                    Ok(serde_json::json!(quantity * price))
                })
                .footer_with(reducers::sum)
                .formatter(currency)
                .justify(Justify::Right),
        )?;
    let options = BuildOptions::new().table(
        TableOptions::new()
            .show_header(true)
            .show_footer(true)
            .borders("minimal"),
    );
    Ok(TableBuilder::with_options(fields, options))
}

fn cart() -> Vec<Value> {
    use serde_json::json;
    vec![
        json!({"name": "Item 1", "quantity": 1, "price": 10}),
        json!({"name": "Item 2", "quantity": 2, "price": 20}),
        json!({"name": "Item 3", "quantity": 3, "price": 30}),
        json!({"name": "Item 4", "quantity": 4, "price": 40}),
        json!({"name": "Item 5", "quantity": 5, "price": 50}),
        json!({"name": "Item 5", "quantity": 6, "price": 60}),
        json!({"name": "Item 6", "quantity": 7, "price": 70}),
        json!({"name": "Item 7", "quantity": 8, "price": 80}),
        json!({"name": "Discount", "quantity": 1, "price": -10}),
    ]
}

/// Handler for the demo command
fn demo_handler(matches: &ArgMatches) -> Result<String> {
    let transposed = matches.get_flag("transposed");
    let title = if transposed {
        "Some Cart - Transposed"
    } else {
        "Some Cart"
    };
    let overrides = BuildOptions::new()
        .transposed(transposed)
        .table(TableOptions::new().title(title));
    let grid = cart_builder()?.build_with(&cart(), &overrides)?;
    emit(&grid, matches)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    let verbosity = match matches.subcommand() {
        Some((_, sub)) => sub.get_count("verbose"),
        None => matches.get_count("verbose"),
    };
    logging::init_logging(verbosity);

    let result = match matches.subcommand() {
        Some(("render", sub)) => render_handler(sub),
        Some(("demo", sub)) => demo_handler(sub),
        // Root command without a subcommand renders
        _ => render_handler(&matches),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
