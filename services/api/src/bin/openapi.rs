//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the community store API.
//! Usage: `openapi [OUTPUT]`, where OUTPUT defaults to `openapi.json`
//! and `-` prints to stdout.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let spec_json = ApiDoc::openapi().to_pretty_json()?;

    if output == "-" {
        println!("{}", spec_json);
    } else {
        std::fs::write(&output, spec_json)?;
        eprintln!("OpenAPI document written to {}", output);
    }
    Ok(())
}
