//! Implementation of the `short` subcommand.

use std::path::PathBuf;

use anyhow::Result;
use buildname_core::GitMetadataSource;
use buildname_core::Inputs;
use buildname_core::Pipeline;
use clap::Parser;

use crate::environment;
use crate::output::OutputArgs;

/// Arguments to the `short` subcommand.
#[derive(Parser, Debug)]
pub struct ShortArgs {
    /// The pretty format handed to the version-control tool; its output
    /// becomes the build-name template.
    ///
    /// `{project}`, `{configuration}`, and `{platform}` placeholders in the
    /// rendered output are then substituted.
    #[clap(short, long, value_name = "TEMPLATE")]
    pub format: String,

    /// The strftime-like date format the version-control tool renders
    /// dates with (always in UTC).
    #[clap(long, value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Overrides the project name derived from the repository identifier.
    #[clap(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// The build configuration substituted (uppercased) for
    /// `{configuration}`. Required in this mode.
    #[clap(long, value_name = "CONFIG")]
    pub build_configuration: Option<String>,

    /// The working directory for version-control queries.
    #[clap(long, value_name = "DIR", default_value = ".")]
    pub repository: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

/// The main function for the `short` subcommand.
pub async fn short(args: ShortArgs) -> Result<()> {
    let environment = environment::capture();
    let source = GitMetadataSource::new(&args.repository);
    let pipeline = Pipeline::new(&source)?;

    let inputs = Inputs {
        project_name: args.project_name,
        build_configuration: args.build_configuration,
        date_format: args.date_format,
        format: args.format,
        branch_name: None,
        date: None,
        git_ref: None,
    };

    let names = pipeline.short_form(&inputs, &environment).await?;
    args.output.report(&names)
}
