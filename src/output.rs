//! Reporting of the pipeline's result record.
//!
//! The pipeline returns every named output in one immutable record; this
//! boundary renders it as `key=value` lines on stdout, as pretty JSON, or
//! appends it to a file in the format CI platforms ingest output values
//! from.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use buildname_core::BuildNames;
use clap::Parser;

/// Arguments controlling how the outputs are reported.
#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Print the outputs as pretty JSON instead of `key=value` lines.
    #[clap(long)]
    pub json: bool,

    /// Also append the outputs as `key=value` lines to this file (the
    /// format GitHub Actions reads from `$GITHUB_OUTPUT`).
    #[clap(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}

impl OutputArgs {
    /// Reports a result record per these arguments.
    pub fn report(&self, names: &BuildNames) -> Result<()> {
        if self.json {
            println!(
                "{json}",
                json = serde_json::to_string_pretty(names)
                    .context("failed to serialize the build names")?
            );
        } else {
            print!("{lines}", lines = lines(names));
        }

        if let Some(path) = &self.output_file {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open output file `{}`", path.display()))?;
            file.write_all(lines(names).as_bytes())
                .with_context(|| format!("failed to write output file `{}`", path.display()))?;
        }

        Ok(())
    }
}

/// Renders a result record as `key=value` lines.
fn lines(names: &BuildNames) -> String {
    let mut out = format!("template={template}\n", template = names.template);

    if let Some(short) = &names.short {
        out.push_str(&format!("short={short}\n"));
    }

    for (platform, name) in &names.platforms {
        out.push_str(&format!("{key}={name}\n", key = platform.output_key()));
    }

    out
}
