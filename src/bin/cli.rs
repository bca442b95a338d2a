//! contexq CLI
//!
//! Terminal front-end for the analytics API:
//! - Dashboard summary with bar charts
//! - Customer and product lists with the same filters as the UI
//! - Customer and product detail screens
//! - Interactive browsing by path

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use contexq::client::{ApiClient, DashboardSource};
use contexq::config::{generate_default_config, Config};
use contexq::routes::NAV_LINKS;
use contexq::view::FetchState;
use contexq::views::{MountedScreen, Navigator, Screen};
use contexq::{logging, render, Location};

#[derive(Parser)]
#[command(name = "contexq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Business insights dashboard in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analytics API URL (overrides config and CONTEXQ_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary counts and sales charts
    Dashboard,

    /// List customers
    Customers {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,
        /// Exact industry
        #[arg(short, long)]
        industry: Option<String>,
        /// Exact region
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Show one customer with recent transactions
    Customer {
        /// Customer ID
        id: String,
    },

    /// List products
    Products {
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one product with recommendations
    Product {
        /// Product ID
        id: String,
    },

    /// Open any dashboard path, e.g. `/customers?region=West`
    Open {
        path: String,
    },

    /// Read paths from stdin and show each screen as its sections settle; a
    /// new path cancels the one still loading
    Browse,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Dashboard path this command displays
    fn href(&self) -> Option<String> {
        match self {
            Commands::Dashboard => Some("/".to_string()),
            Commands::Customers {
                search,
                industry,
                region,
            } => Some(with_query(
                "/customers",
                &[("search", search), ("industry", industry), ("region", region)],
            )),
            Commands::Customer { id } => Some(format!("/customers/{}", urlencoding::encode(id))),
            Commands::Products { search, category } => Some(with_query(
                "/products",
                &[("search", search), ("category", category)],
            )),
            Commands::Product { id } => Some(format!("/products/{}", urlencoding::encode(id))),
            Commands::Open { path } => Some(path.clone()),
            Commands::Browse | Commands::Config { .. } => None,
        }
    }
}

fn with_query(path: &str, params: &[(&str, &Option<String>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    logging::init(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let client = ApiClient::from_config(&config.api)?;
    tracing::debug!("Using API at {}", client.base_url());
    let source: Arc<dyn DashboardSource> = Arc::new(client);

    match cli.command.href() {
        Some(href) => {
            let screen = MountedScreen::mount(source, Location::parse(&href))
                .settled()
                .await
                .ok_or_else(|| anyhow::anyhow!("View for {} did not complete", href))?;
            emit(&screen, cli.format)
        }
        None => browse(source, cli.format).await,
    }
}

/// Interactive loop: each line is a path (or a nav number), `q` quits
async fn browse(source: Arc<dyn DashboardSource>, format: OutputFormat) -> anyhow::Result<()> {
    let mut navigator = Navigator::new(source);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for (idx, (path, label)) in NAV_LINKS.iter().enumerate() {
        eprintln!("  {}  {:<10} {}", idx + 1, label, path);
    }
    eprintln!("Enter a number or a path, `q` to quit.");

    navigator.navigate("/");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                match input {
                    "" => continue,
                    "q" | "quit" | "exit" => break,
                    _ => {
                        let href = input
                            .parse::<usize>()
                            .ok()
                            .and_then(|n| n.checked_sub(1))
                            .and_then(|idx| NAV_LINKS.get(idx))
                            .map(|(path, _)| path.to_string())
                            .unwrap_or_else(|| input.to_string());
                        let location = navigator.navigate(&href);
                        eprintln!("-> {}", location.route);
                    }
                }
            }
            Some(screen) = navigator.next_render() => {
                if let Err(e) = emit(&screen, format) {
                    eprintln!("Error: {}", e);
                }
            }
        }
    }

    navigator.close();
    Ok(())
}

fn emit(screen: &Screen, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print!("{}", render::screen(screen));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&screen_json(screen))?);
            Ok(())
        }
        OutputFormat::Csv => write_csv(screen),
    }
}

/// Loaded data as JSON; failures appear as `{"error": ...}`, absent
/// entities as `null`
fn screen_json(screen: &Screen) -> Value {
    match screen {
        Screen::Dashboard(view) => state_json(&view.stats, |stats| json!(stats)),
        Screen::Customers(view) => state_json(&view.customers, |_| json!(view.rows())),
        Screen::CustomerDetail(view) => state_json(&view.detail, |detail| {
            json!({
                "customer": detail.entity,
                "metrics": detail.metrics,
                "transactions": state_json(&view.transactions, |t| json!(t)),
            })
        }),
        Screen::Products(view) => state_json(&view.products, |_| json!(view.rows())),
        Screen::ProductDetail(view) => state_json(&view.detail, |detail| {
            json!({
                "product": detail.entity,
                "metrics": detail.metrics,
                "profit_margin": detail.entity.margin_percent(),
                "recommendations": state_json(&view.recommendations, |r| json!(r)),
            })
        }),
        Screen::NotFound(path) => json!({ "error": format!("Page not found: {}", path) }),
    }
}

fn state_json<T>(state: &FetchState<T>, content: impl FnOnce(&T) -> Value) -> Value {
    match state {
        FetchState::Ready(data) => content(data),
        FetchState::Failed(message) => json!({ "error": message }),
        FetchState::Idle | FetchState::Loading | FetchState::Missing => Value::Null,
    }
}

/// Tabular part of each screen as CSV
fn write_csv(screen: &Screen) -> anyhow::Result<()> {
    match screen {
        Screen::Dashboard(view) => {
            let stats = ready(&view.stats, "Dashboard")?;
            csv_rows(&stats.sales_by_region)
        }
        Screen::Customers(view) => {
            ready(&view.customers, "Customers")?;
            csv_rows(view.rows())
        }
        Screen::CustomerDetail(view) => {
            ready(&view.detail, "Customer")?;
            csv_rows(ready(&view.transactions, "Transactions")?)
        }
        Screen::Products(view) => {
            ready(&view.products, "Products")?;
            csv_rows(view.rows())
        }
        Screen::ProductDetail(view) => {
            ready(&view.detail, "Product")?;
            csv_rows(ready(&view.recommendations, "Recommendations")?)
        }
        Screen::NotFound(path) => anyhow::bail!("Page not found: {}", path),
    }
}

fn ready<'a, T>(state: &'a FetchState<T>, entity: &str) -> anyhow::Result<&'a T> {
    match state {
        FetchState::Ready(data) => Ok(data),
        FetchState::Failed(message) => anyhow::bail!("{}", message),
        FetchState::Missing => anyhow::bail!("{} not found", entity),
        FetchState::Idle | FetchState::Loading => anyhow::bail!("{} still loading", entity),
    }
}

fn csv_rows<T: Serialize>(rows: impl IntoIterator<Item = T>) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
