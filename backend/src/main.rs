use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pocket_ledger::domain::{CalendarService, CurrencyFormatter, FormatOptions};
use pocket_ledger::{logging, AppConfig, Backend};
use shared::MonthOverview;

const WEEKDAY_HEADER: [&str; 7] = ["CN", "T2", "T3", "T4", "T5", "T6", "T7"];
const CELL_WIDTH: usize = 9;

/// Print the calendar grid and totals of a month.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Year to show. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Month to show, 1-12. Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Path to a YAML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fill the store with sample transactions for today.
    #[arg(long)]
    seed: bool,

    /// Print the overview as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.seed_mock_data |= args.seed;

    let backend = Backend::new(config)?;
    let current = backend.navigator.current();
    let year = args.year.unwrap_or(current.year);
    let month = args.month.map_or(current.month, |m| m - 1);
    backend.navigator.set(year, month)?;

    info!("Rendering {}/{}", month + 1, year);
    let overview = backend.current_overview()?;

    if args.json {
        println!("{}", render_json(&overview)?);
    } else {
        print!("{}", render(&backend.calendar_service, &backend.formatter, &overview)?);
    }
    Ok(())
}

fn render_json(overview: &MonthOverview) -> Result<String> {
    serde_json::to_string_pretty(overview).context("Failed to serialize overview")
}

fn render(
    calendar: &CalendarService,
    formatter: &CurrencyFormatter,
    overview: &MonthOverview,
) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n\n",
        calendar.padded_month_label(overview.view),
        calendar.month_range_label(overview.view)?
    ));

    for name in WEEKDAY_HEADER {
        out.push_str(&format!("{:>width$}", name, width = CELL_WIDTH));
    }
    out.push('\n');

    for week in overview.grid.cells.chunks(7) {
        for cell in week {
            let day = cell.day.map(|d| d.to_string()).unwrap_or_default();
            out.push_str(&format!("{:>width$}", day, width = CELL_WIDTH));
        }
        out.push('\n');
        for cell in week {
            let total = cell.daily_total.map(|t| formatter.format_short(t)).unwrap_or_default();
            out.push_str(&format!("{:>width$}", total, width = CELL_WIDTH));
        }
        out.push('\n');
    }

    let summary = &overview.summary;
    out.push('\n');
    let income = formatter.format_amount(summary.income, FormatOptions::default());
    let expense = formatter.format_amount(summary.expense, FormatOptions::absolute());
    let net = formatter.format_amount(summary.net, FormatOptions::signed());
    out.push_str(&format!("Thu nhập: {}\n", income));
    out.push_str(&format!("Chi tiêu: {}\n", expense));
    out.push_str(&format!("Tổng:     {}\n", net));

    if !overview.expense_by_category.is_empty() {
        out.push('\n');
        for total in &overview.expense_by_category {
            out.push_str(&format!(
                "{:<12} {:>16} {:>4}%\n",
                total.category,
                formatter.format_amount(total.amount, FormatOptions::absolute()),
                total.share_percent
            ));
        }
    }
    Ok(out)
}
