//! Write the OpenAPI document for the Agro Shop API
//!
//! ```text
//! export_openapi                        # pretty JSON to stdout
//! export_openapi --output openapi.json  # to a file
//! ```

use anyhow::{Context, Result};
use utoipa::OpenApi;

use agro_shop::gateway::openapi::ApiDoc;

fn main() -> Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("Failed to serialize OpenAPI document")?;

    let args: Vec<String> = std::env::args().collect();
    match args.iter().position(|a| a == "--output").and_then(|i| args.get(i + 1)) {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("Failed to write {path}"))?;
            eprintln!("OpenAPI document written to {path}");
        }
        None => println!("{json}"),
    }
    Ok(())
}
