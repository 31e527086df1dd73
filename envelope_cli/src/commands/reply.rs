use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use envelope_lib::decode::{decode_reply, Reply};
use serde_json::Value;

use super::read_input;
use crate::layout::PublicLayout;
use crate::output::{
    build_error_rows, build_response_rows, print_csv, print_in_layout, print_json, table_string,
    OutputFormat,
};

#[derive(Args)]
pub struct ReplyArgs {
    /// Path to the reply body
    pub file: PathBuf,

    /// HTTP status the body arrived with
    #[arg(long)]
    pub status: u16,
}

pub fn run(args: &ReplyArgs, format: &OutputFormat) -> Result<()> {
    let body = read_input(&args.file)?;
    let reply = decode_reply::<Value, Value>(args.status, &body)?;
    tracing::info!(
        http_status = args.status,
        success = reply.is_success(),
        "Classified reply"
    );

    let header = format!("envelope reply | {} | HTTP {}", args.file.display(), args.status);
    let (rows, footer) = match &reply {
        Reply::Success(resp) => (build_response_rows(resp), "success envelope"),
        Reply::Failure(err) => (build_error_rows(err), "error envelope"),
    };

    match format {
        OutputFormat::Json => match &reply {
            Reply::Success(resp) => print_json(resp),
            Reply::Failure(err) => print_json(err),
        },
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Table | OutputFormat::Markdown => {
            print_in_layout(
                &PublicLayout::for_terminal(&header, footer),
                &[table_string(rows, format)],
            );
        }
    }
    Ok(())
}
