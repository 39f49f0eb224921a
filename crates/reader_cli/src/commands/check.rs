use anyhow::{Context, Result};
use reader_parser::parse_file;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(request_path: &str) -> Result<()> {
    info!("Checking request: {}", request_path);

    let path = Path::new(request_path);
    let request = parse_file(path)
        .with_context(|| format!("Failed to parse request file: {}", request_path))?;

    output::print_success("Request is valid");

    println!("\nRequest Summary:");
    println!("  Name:         {}", request.display_name());
    println!("  Format:       {}", request.format);
    println!("  Location:     {}", request.location);
    println!("  Options:      {}", request.options.len());
    for (key, value) in request.options.iter() {
        println!("    {} = {}", key, value);
    }

    match &request.schema {
        Some(schema) => {
            println!("  Schema:       {} columns ({:?})", schema.len(), request.type_comparison);
            for (name, type_name) in schema.columns() {
                println!("    {}: {}", name, type_name);
            }
        }
        None => println!("  Schema:       not checked"),
    }

    if !request.non_nullable_columns.is_empty() {
        println!(
            "  Non-nullable: {}",
            request.non_nullable_columns.join(", ")
        );
    }
    if !request.unique_columns.is_empty() {
        println!("  Unique:       {}", request.unique_columns.join(", "));
    }

    Ok(())
}
