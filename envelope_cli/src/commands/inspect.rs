use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use envelope_lib::decode::{decode_error, decode_page, decode_response};
use envelope_lib::types::{PaginatedResponse, RawApiError};
use envelope_lib::validation::check_paging;
use envelope_lib::{ContractConfig, EnvelopeError};
use serde_json::Value;

use super::read_input;
use crate::layout::PublicLayout;
use crate::output::{
    build_error_rows, build_item_rows, build_page_row, build_response_rows, build_violation_rows,
    print_csv, print_in_layout, print_json, table_string, OutputFormat,
};

#[derive(Args)]
pub struct InspectArgs {
    /// Path to a JSON file holding one envelope
    pub file: PathBuf,

    /// Envelope kind: response, page, or error
    #[arg(long, default_value = "response")]
    pub kind: String,

    /// Fail unless a response envelope has a 2xx status and no errors
    #[arg(long)]
    pub require_success: bool,
}

enum Kind {
    Response,
    Page,
    Error,
}

fn parse_kind(input: &str) -> Result<Kind> {
    match input.trim().to_lowercase().as_str() {
        "response" | "r" => Ok(Kind::Response),
        "page" | "p" => Ok(Kind::Page),
        "error" | "e" => Ok(Kind::Error),
        _ => bail!(
            "unknown envelope kind '{}'. Valid values: response (r), page (p), error (e)",
            input
        ),
    }
}

pub fn run(args: &InspectArgs, config: &ContractConfig, format: &OutputFormat) -> Result<()> {
    let kind = parse_kind(&args.kind)?;
    let body = read_input(&args.file)?;
    let header = format!("envelope inspect | {}", args.file.display());

    match kind {
        Kind::Response => {
            let resp = decode_response::<Value>(&body)?;
            if args.require_success {
                resp.clone().into_result().map_err(EnvelopeError::from)?;
            }
            let rows = build_response_rows(&resp);
            match format {
                OutputFormat::Json => print_json(&resp),
                OutputFormat::Csv => print_csv(&rows)?,
                OutputFormat::Table | OutputFormat::Markdown => {
                    let footer = format!("response envelope, status {}", resp.status);
                    print_in_layout(
                        &PublicLayout::for_terminal(&header, &footer),
                        &[table_string(rows, format)],
                    );
                }
            }
        }
        Kind::Page => {
            let page: PaginatedResponse<Value> = decode_page(&body, config)?;
            print_page(&page, config, format, &header, None)?;
        }
        Kind::Error => {
            let err: RawApiError = decode_error(&body)?;
            let rows = build_error_rows(&err);
            match format {
                OutputFormat::Json => print_json(&err),
                OutputFormat::Csv => print_csv(&rows)?,
                OutputFormat::Table | OutputFormat::Markdown => {
                    let footer = format!("error envelope, status {}", err.status);
                    print_in_layout(
                        &PublicLayout::for_terminal(&header, &footer),
                        &[table_string(rows, format)],
                    );
                }
            }
        }
    }

    Ok(())
}

/// Prints a page summary, its items and any violations the policy let through.
/// `next_link`, when known, goes into the layout footer.
pub(crate) fn print_page(
    page: &PaginatedResponse<Value>,
    config: &ContractConfig,
    format: &OutputFormat,
    header: &str,
    next_link: Option<&str>,
) -> Result<()> {
    let base = config.page_base;
    match format {
        OutputFormat::Json => print_json(page),
        OutputFormat::Csv => print_csv(&build_item_rows(page, base))?,
        OutputFormat::Table | OutputFormat::Markdown => {
            let mut sections = vec![
                table_string(vec![build_page_row(page, base)], format),
                table_string(build_item_rows(page, base), format),
            ];
            let violations = check_paging(page, config);
            if !violations.is_empty() {
                sections.push(table_string(build_violation_rows(&violations), format));
            }
            let mut footer = match page.last_page(base) {
                Some(last) => format!("page {} of {} ({} total)", page.page, last, page.total_count),
                None => "empty collection".to_string(),
            };
            if let Some(link) = next_link {
                footer.push_str(&format!(" | next: {}", link));
            }
            print_in_layout(&PublicLayout::for_terminal(header, &footer), &sections);
        }
    }
    Ok(())
}
