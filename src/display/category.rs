//! Category registry formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::ExpenseCategory;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Color")]
    color: &'static str,
}

/// Format every known category
pub fn format_category_registry() -> String {
    let rows: Vec<CategoryRow> = ExpenseCategory::ALL
        .iter()
        .map(|c| CategoryRow {
            icon: c.icon(),
            id: c.as_str(),
            label: c.label(),
            color: c.color(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
