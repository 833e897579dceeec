//! Implementation of the `generate` subcommand.

use std::path::PathBuf;

use anyhow::Result;
use buildname_core::GitMetadataSource;
use buildname_core::Inputs;
use buildname_core::Pipeline;
use clap::Parser;

use crate::environment;
use crate::output::OutputArgs;

/// Arguments to the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// The build-name template.
    ///
    /// Recognized placeholders: `{project}`, `{configuration}`, `{branch}`,
    /// `{datetime}`, `{shortname}`, `{hash}`, and `{platform}`. Unrecognized
    /// placeholders are left untouched.
    #[clap(short, long, value_name = "TEMPLATE")]
    pub format: String,

    /// Overrides the project name derived from the repository identifier.
    #[clap(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// The build configuration substituted (uppercased) for
    /// `{configuration}`.
    #[clap(long, value_name = "CONFIG")]
    pub build_configuration: Option<String>,

    /// The working directory for version-control queries.
    #[clap(long, value_name = "DIR", default_value = ".")]
    pub repository: PathBuf,

    /// Overrides the environment-derived branch name.
    #[clap(long, value_name = "BRANCH")]
    pub branch_name: Option<String>,

    /// An explicit commit-date override.
    ///
    /// Must end with the literal `!!` suffix, which is stripped before
    /// parsing; the remainder is an RFC 3339 datetime or a bare
    /// `YYYY-MM-DDTHH:MM:SS` taken to be UTC.
    #[clap(long, value_name = "DATE")]
    pub date: Option<String>,

    /// An explicit commit-ref override; truncated to seven characters and
    /// lowercased.
    #[clap(long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

/// The main function for the `generate` subcommand.
pub async fn generate(args: GenerateArgs) -> Result<()> {
    let environment = environment::capture();
    let source = GitMetadataSource::new(&args.repository);
    let pipeline = Pipeline::new(&source)?;

    let inputs = Inputs {
        project_name: args.project_name,
        build_configuration: args.build_configuration,
        date_format: None,
        format: args.format,
        branch_name: args.branch_name,
        date: args.date,
        git_ref: args.git_ref,
    };

    let names = pipeline.long_form(&inputs, &environment).await?;
    args.output.report(&names)
}
