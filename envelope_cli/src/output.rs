use std::io::Write;

use anyhow::Result;
use envelope_lib::types::{ApiResponse, PageBase, PaginatedResponse, RawApiError};
use envelope_lib::PagingViolation;
use serde::Serialize;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::layout::PublicLayout;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
pub struct PageRow {
    #[tabled(rename = "Page")]
    #[serde(rename = "Page")]
    page: u64,
    #[tabled(rename = "Page Size")]
    #[serde(rename = "Page Size")]
    page_size: u64,
    #[tabled(rename = "Items")]
    #[serde(rename = "Items")]
    items: usize,
    #[tabled(rename = "Total Count")]
    #[serde(rename = "Total Count")]
    total_count: u64,
    #[tabled(rename = "Total Pages")]
    #[serde(rename = "Total Pages")]
    total_pages: u64,
    #[tabled(rename = "Next")]
    #[serde(rename = "Next")]
    next: String,
}

#[derive(Tabled, Serialize)]
pub struct ItemRow {
    #[tabled(rename = "#")]
    #[serde(rename = "#")]
    position: String,
    #[tabled(rename = "Item")]
    #[serde(rename = "Item")]
    item: String,
}

#[derive(Tabled, Serialize)]
pub struct ViolationRow {
    #[tabled(rename = "Violation")]
    #[serde(rename = "Violation")]
    violation: String,
}

// -- Row builders --

fn field(name: &str, value: String) -> FieldRow {
    FieldRow {
        field: name.to_string(),
        value,
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

pub fn build_response_rows(resp: &ApiResponse<Value>) -> Vec<FieldRow> {
    vec![
        field("status", resp.status.to_string()),
        field("success", resp.is_success().to_string()),
        field("message", or_dash(resp.message.clone())),
        field(
            "errors",
            or_dash(
                resp.errors
                    .as_ref()
                    .filter(|errors| !errors.is_empty())
                    .map(|errors| errors.join("; ")),
            ),
        ),
        field("data", compact_json(&resp.data)),
    ]
}

pub fn build_error_rows(err: &RawApiError) -> Vec<FieldRow> {
    let class = if err.is_client_error() {
        "client error"
    } else if err.is_server_error() {
        "server error"
    } else {
        "other"
    };
    vec![
        field("status", err.status.to_string()),
        field("class", class.to_string()),
        field("message", err.message.clone()),
        field("data", or_dash(err.data.as_ref().map(compact_json))),
    ]
}

pub fn build_page_row(page: &PaginatedResponse<Value>, base: PageBase) -> PageRow {
    PageRow {
        page: page.page,
        page_size: page.page_size,
        items: page.len(),
        total_count: page.total_count,
        total_pages: page.total_pages,
        next: or_dash(page.next_page(base).map(|n| n.to_string())),
    }
}

/// One row per item, numbered by position in the whole collection. The
/// position is `-` when the page lies outside the numbering range.
pub fn build_item_rows(page: &PaginatedResponse<Value>, base: PageBase) -> Vec<ItemRow> {
    let offset = page.offset(base);
    page.items
        .iter()
        .enumerate()
        .map(|(i, item)| ItemRow {
            position: or_dash(
                offset
                    .and_then(|o| o.checked_add(i as u64))
                    .and_then(|p| p.checked_add(1))
                    .map(|p| p.to_string()),
            ),
            item: compact_json(item),
        })
        .collect()
}

pub fn build_violation_rows(violations: &[PagingViolation]) -> Vec<ViolationRow> {
    violations
        .iter()
        .map(|v| ViolationRow {
            violation: v.to_string(),
        })
        .collect()
}

fn compact_json(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// -- Table / markdown output --

pub fn table_string<R: Tabled>(rows: Vec<R>, format: &OutputFormat) -> String {
    let mut table = Table::new(rows);
    if *format == OutputFormat::Markdown {
        table.with(Style::markdown());
    }
    table.to_string()
}

pub fn print_in_layout(layout: &PublicLayout, sections: &[String]) {
    println!("{}", layout.render(&sections.join("\n\n")));
}

// -- CSV output --

pub fn write_csv<R: Serialize, W: Write>(rows: &[R], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_csv<R: Serialize>(rows: &[R]) -> Result<()> {
    write_csv(rows, std::io::stdout())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
