//! Summary cards and category breakdown

use chrono::NaiveDate;
use tabled::{settings::Style, Table, Tabled};

use crate::reports::ExpenseSummary;

use super::DisplayOptions;

const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format the four totals followed by the category breakdown
pub fn format_summary(summary: &ExpenseSummary, today: NaiveDate, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Spending summary for {}\n", options.date(today)));
    output.push_str(&"=".repeat(40));
    output.push('\n');
    output.push_str(&format!("Today:       {:>14}\n", options.money(summary.total_today)));
    output.push_str(&format!("This week:   {:>14}\n", options.money(summary.total_week)));
    output.push_str(&format!("This month:  {:>14}\n", options.money(summary.total_month)));
    output.push_str(&format!("All time:    {:>14}\n", options.money(summary.total_all)));
    output.push('\n');
    output.push_str(&format_category_breakdown(summary, options));

    output
}

/// Format each category's share of the all-time total
pub fn format_category_breakdown(summary: &ExpenseSummary, options: &DisplayOptions) -> String {
    let shares = summary.category_breakdown();
    if shares.is_empty() {
        return "No spending recorded yet.\n".to_string();
    }

    let rows: Vec<ShareRow> = shares
        .iter()
        .map(|share| ShareRow {
            category: format!("{} {}", share.category.icon(), share.category.label()),
            amount: options.money(share.amount),
            share: format!("{:.1}%", share.percentage),
            bar: bar(share.percentage),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}
