//! Command-line interface for the financial agent tools
//!
//! Every subcommand is routed through the same tool registry an agent would
//! use, so the output is exactly what the agent sees.

use agent_finance::{FinanceConfig, default_financial_tools};
use agent_tools::ToolRegistry;
use agent_utils::{LogFormat, init_tracing};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde_json::{Value, json};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "fin-tools", version)]
#[command(about = "Financial data and calculation tools", long_about = None)]
struct Cli {
    /// Print the full result record as JSON instead of the summary
    #[arg(long, global = true)]
    json: bool,

    /// Log output format (text or json)
    #[arg(long, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Current price and key metrics
    Quote { symbol: String },
    /// Company information
    Profile { symbol: String },
    /// Historical performance over a period (default 1y)
    History { symbol: String, period: Option<String> },
    /// Future value of an investment; the rate is a decimal fraction
    #[command(allow_negative_numbers = true)]
    Growth {
        principal: String,
        rate: String,
        years: String,
    },
    /// Compute and interpret a financial ratio
    #[command(allow_negative_numbers = true)]
    Ratio {
        numerator: String,
        denominator: String,
        /// pe, debt_to_equity, current, roe or generic
        kind: Option<String>,
    },
    /// Web search (requires TAVILY_API_KEY)
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Call any registered tool by name
    Call {
        tool: String,
        /// A JSON object, or free text passed as the tool's single input
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        input: Vec<String>,
    },
    /// List the registered tools
    Tools,
}

impl Commands {
    /// Tool name and parameters for a tool-invoking subcommand
    fn invocation(self) -> Option<(String, Value)> {
        let call = match self {
            Commands::Quote { symbol } => ("get_stock_price".to_string(), json!({ "symbol": symbol })),
            Commands::Profile { symbol } => {
                ("get_company_info".to_string(), json!({ "symbol": symbol }))
            }
            Commands::History { symbol, period } => {
                let query = match period {
                    Some(period) => format!("{symbol} {period}"),
                    None => symbol,
                };
                ("get_financial_history".to_string(), json!({ "query": query }))
            }
            Commands::Growth {
                principal,
                rate,
                years,
            } => (
                "calculate_compound_growth".to_string(),
                json!({ "query": format!("{principal} {rate} {years}") }),
            ),
            Commands::Ratio {
                numerator,
                denominator,
                kind,
            } => {
                let mut query = format!("{numerator} {denominator}");
                if let Some(kind) = kind {
                    query.push(' ');
                    query.push_str(&kind);
                }
                ("calculate_financial_ratio".to_string(), json!({ "query": query }))
            }
            Commands::Search { query } => {
                ("tavily_search".to_string(), json!({ "query": query.join(" ") }))
            }
            Commands::Call { tool, input } => (tool, parse_call_input(&input.join(" "))),
            Commands::Tools => return None,
        };
        Some(call)
    }
}

/// A JSON object is passed through; anything else becomes a bare string input
fn parse_call_input(input: &str) -> Value {
    match serde_json::from_str::<Value>(input) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::String(input.to_string()),
    }
}

/// Human-readable line for a result record
fn summary_line(record: &Value) -> Option<&str> {
    record
        .get("summary")
        .or_else(|| record.get("business_summary"))
        .and_then(Value::as_str)
}

fn tools_table(registry: &ToolRegistry) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tool", "Input", "Description"]);

    for info in registry.definitions() {
        let input = info.input_schema["required"]
            .as_array()
            .map(|keys| {
                keys.iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![info.name, input, info.description]);
    }
    table
}

fn print_record(record: &Value, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    match summary_line(record) {
        Some(summary) => println!("{summary}"),
        None => println!("{}", serde_json::to_string_pretty(record)?),
    }
    if let Some(Value::Array(results)) = record.get("results") {
        for hit in results {
            if let (Some(title), Some(url)) = (hit["title"].as_str(), hit["url"].as_str()) {
                println!("  - {title} <{url}>");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = FinanceConfig::from_env()?;
    let registry = default_financial_tools(&config);

    let Some((tool, params)) = cli.command.invocation() else {
        println!("{}", tools_table(&registry));
        return Ok(ExitCode::SUCCESS);
    };

    debug!(tool = %tool, params = %params, "invoking tool");
    let record = registry.execute(&tool, params).await?;
    print_record(&record, cli.json)?;

    if record.get("error").is_some_and(|e| !e.is_null()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
