//! Print the OpenAPI document as JSON.

use std::io::Write;

use clap::Parser;
use store_backend::doc::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for `openapi-dump`.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the store OpenAPI document")]
struct Cli {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let json = if cli.pretty {
        doc.to_pretty_json()
    } else {
        doc.to_json()
    }
    .map_err(std::io::Error::other)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")
}
