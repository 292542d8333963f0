//! Print the OpenAPI document as JSON.
//!
//! Usage: `openapi-dump > openapi.json`

use color_eyre::eyre::{Context, Result};
use logbook::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .context("serialise OpenAPI document")?;
    println!("{document}");
    Ok(())
}
