//! CLI logic for the DMCAR diagram tool.
//!
//! This module contains the core CLI logic for the DMCAR diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io, path::Path};

use log::{info, warn};

use dmcar::{DiagramBuilder, DmcarError, InputFormat};

/// Run the DMCAR CLI application
///
/// This function reads the input table, writes its Mermaid ER diagram to the
/// output file and, when requested, writes the relationship attribution as
/// JSON.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DmcarError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - An input format that cannot be inferred
/// - Parsing errors
/// - Structure and attribution errors (only with `--domains`)
pub fn run(args: &Args) -> Result<(), DmcarError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let format = input_format(args)?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let resolution = builder.parse(&source, format)?;
    for reportable in error_adapter::diagnostic_reportables(resolution.diagnostics()) {
        warn!("{}", error_adapter::render(&reportable));
    }
    let diagram = builder.render_mermaid(resolution.model());

    fs::write(&args.output, diagram)?;
    info!(output_file = args.output; "Mermaid diagram exported successfully");

    if let Some(domains_path) = &args.domains {
        let attribution = builder.attribute_domains(resolution.model())?;
        let json = serde_json::to_string_pretty(&attribution).map_err(io::Error::other)?;

        fs::write(domains_path, json)?;
        info!(output_file = domains_path; "Domain attribution exported successfully");
    }

    Ok(())
}

/// The explicit `--format`, else the one named by the input extension.
fn input_format(args: &Args) -> Result<InputFormat, DmcarError> {
    if let Some(format) = args.format {
        return Ok(format);
    }

    Path::new(&args.input)
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(InputFormat::from_extension)
        .ok_or_else(|| {
            DmcarError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "cannot infer input format of `{}`; pass --format csv or --format json",
                    args.input
                ),
            ))
        })
}
