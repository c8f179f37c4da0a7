use anyhow::Context;
use clap::{Parser, Subcommand};
use sheetlink_client::{Config, HttpService, SheetsClient};
use sheetlink_core::{CellFormat, CellValue, Color};
use tracing_subscriber::EnvFilter;

/// Read, write, format and group rows in a remote spreadsheet
#[derive(Parser)]
#[command(name = "sheetlink", version, about)]
struct Cli {
    /// Sheet (tab) title, overriding SHEETLINK_SHEET_NAME
    #[arg(long, global = true)]
    sheet_name: Option<String>,

    /// Numeric sheet id, overriding SHEETLINK_SHEET_ID
    #[arg(long, global = true)]
    sheet_id: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a range as JSON records keyed by column letter
    Read { range: String },
    /// Overwrite a range with JSON values
    Write { range: String, values: String },
    /// Append JSON values as new rows after a range
    Append { range: String, values: String },
    /// Set colors and text style on a range
    Format {
        range: String,
        /// Background color as #rrggbb
        #[arg(long)]
        background: Option<String>,
        /// Text color as #rrggbb
        #[arg(long)]
        text_color: Option<String>,
        #[arg(long)]
        bold: bool,
    },
    /// Group the rows between a parent row and its last detail row
    Group {
        present_row: u32,
        last_row: u32,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
        /// Collapse the group after creating it
        #[arg(long)]
        collapse: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sheetlink=info,sheetlink_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(name) = cli.sheet_name {
        config.sheet_name = Some(name);
    }
    if let Some(id) = cli.sheet_id {
        config.sheet_id = Some(id);
    }

    let client = sheetlink_client::connect(config)?;
    run(&client, cli.command).await
}

async fn run(client: &SheetsClient<HttpService>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Read { range } => {
            let records = client.read(&range).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Write { range, values } => {
            let rows = client.write(&range, parse_values(&values)?).await?;
            println!("{} rows written", rows);
        }
        Command::Append { range, values } => {
            let rows = client.append(&range, parse_values(&values)?).await?;
            println!("{} rows appended", rows);
        }
        Command::Format {
            range,
            background,
            text_color,
            bold,
        } => {
            let mut format = CellFormat::new();
            if let Some(hex) = background {
                format = format.with_background_color(parse_color(&hex)?);
            }
            if let Some(hex) = text_color {
                format = format.with_text_color(parse_color(&hex)?);
            }
            if bold {
                format = format.with_bold(true);
            }
            let grid = client.format(&range, &format).await?;
            println!("{}", serde_json::to_string(&grid)?);
        }
        Command::Group {
            present_row,
            last_row,
            offset,
            collapse,
        } => match client
            .group_rows(present_row, last_row, offset, collapse)
            .await?
        {
            Some(detail) => println!("{}", serde_json::to_string(&detail)?),
            None => println!("no detail rows to group"),
        },
    }

    Ok(())
}

fn parse_values(json: &str) -> anyhow::Result<CellValue> {
    let value: serde_json::Value =
        serde_json::from_str(json).with_context(|| format!("values are not valid JSON: {}", json))?;
    Ok(value.into())
}

fn parse_color(hex: &str) -> anyhow::Result<Color> {
    Color::from_hex(hex).with_context(|| format!("invalid color {:?}, expected #rrggbb", hex))
}
