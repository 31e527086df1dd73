use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use envelope_lib::types::PaginatedResponse;
use envelope_lib::validation::{validate_page, validate_page_size};
use envelope_lib::{url_for, ContractConfig, PageQuery, Query, SortOrder};
use serde::Serialize;
use serde_json::Value;

use super::{inspect::print_page, read_input};
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct PaginateArgs {
    /// Path to a JSON file holding an array of items
    pub file: PathBuf,

    /// Page number (defaults to the first page of the configured base)
    #[arg(long)]
    pub page: Option<u64>,

    /// Items per page
    #[arg(long, default_value = "20")]
    pub page_size: u64,

    /// Sort the items by this field before slicing
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort order for --sort-by: asc or desc (default asc)
    #[arg(long, requires = "sort_by")]
    pub order: Option<SortOrder>,

    /// Collection endpoint URL; prints the link to the following page
    #[arg(long)]
    pub link: Option<String>,
}

/// A page with the link to the one after it (`null` on the last page).
#[derive(Serialize)]
struct LinkedPage<'a> {
    #[serde(flatten)]
    page: &'a PaginatedResponse<Value>,
    next: Option<String>,
}

pub fn run(args: &PaginateArgs, config: &ContractConfig, format: &OutputFormat) -> Result<()> {
    let base = config.page_base;
    let page = validate_page(args.page.unwrap_or_else(|| base.first()), base)?;
    let page_size = validate_page_size(args.page_size, config.max_page_size)?;

    let body = read_input(&args.file)?;
    let mut all: Vec<Value> = serde_json::from_str(&body)
        .with_context(|| format!("{} is not a JSON array", args.file.display()))?;

    let mut query = PageQuery::first(base)
        .with_page(page)
        .with_page_size(page_size);
    if let Some(field) = &args.sort_by {
        let order = args.order.unwrap_or(SortOrder::Ascending);
        all.sort_by(|a, b| order.apply(compare_field(a.get(field), b.get(field))));
        query = query.with_sort_by(field).with_order(order);
    }

    let result = PaginatedResponse::from_items(&all, page, page_size, base);
    tracing::debug!(
        page,
        page_size,
        items = result.len(),
        total_pages = result.total_pages,
        "Paginated collection"
    );

    let next_link = match &args.link {
        Some(link) => query
            .following(&result, base)
            .map(|next| url_for(link, "", Some(&next)))
            .transpose()?
            .map(|url| url.to_string()),
        None => None,
    };

    let header = format!("envelope paginate | {}", args.file.display());
    match (format, &args.link) {
        (OutputFormat::Json, Some(_)) => {
            print_json(&LinkedPage {
                page: &result,
                next: next_link,
            });
            Ok(())
        }
        _ => print_page(&result, config, format, &header, next_link.as_deref()),
    }
}

/// Ascending order of two field values. Numbers compare numerically and
/// strings lexically; items without the field sort after those with it.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
