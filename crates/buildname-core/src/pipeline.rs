//! The build-name pipeline.
//!
//! A run resolves [`BuildMetadata`] exactly once, composes the long name and
//! codename from it as a pure function, and returns every named output in a
//! single immutable [`BuildNames`] record. The caller decides what to do
//! with the record; the pipeline itself performs no output side effects and
//! reads no ambient process state.

use indexmap::IndexMap;
use serde::Serialize;
use strum::VariantArray;
use tracing::info;

use crate::Error;
use crate::Result;
use crate::metadata;
use crate::metadata::BuildMetadata;
use crate::metadata::MetadataSource;
use crate::platform::Platform;
use crate::select;
use crate::template;
use crate::words::WordLists;

/// The configuration inputs of a pipeline run.
///
/// Every field corresponds to one named input key; `None` means the key was
/// not supplied. The repository path is not here: it configures the metadata
/// source, not the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    /// Overrides the project name derived from the repository identifier.
    pub project_name: Option<String>,

    /// The build configuration token.
    ///
    /// Required in short-form mode; optional in long-form mode.
    pub build_configuration: Option<String>,

    /// The strftime-like date format handed to the version-control tool in
    /// short-form mode.
    pub date_format: Option<String>,

    /// The build-name template.
    pub format: String,

    /// Overrides the environment-derived branch name.
    pub branch_name: Option<String>,

    /// An explicit commit-date override, suffixed with
    /// [`crate::date::OVERRIDE_SUFFIX`].
    pub date: Option<String>,

    /// An explicit commit-ref override.
    pub git_ref: Option<String>,
}

/// The environment-derived values a run consumes.
///
/// The boundary layer captures these from the host environment once and
/// passes them in; fields are named for the variables they are captured
/// from. `None` means the variable was not set, which only fails the run if
/// the value is actually needed.
#[derive(Debug, Clone, Default)]
pub struct CiEnvironment {
    /// The repository owner (`GITHUB_REPOSITORY_OWNER`).
    pub repository_owner: Option<String>,

    /// The qualified `owner/name` repository identifier
    /// (`GITHUB_REPOSITORY`).
    pub repository: Option<String>,

    /// The branch ref name (`GITHUB_REF_NAME`).
    pub ref_name: Option<String>,

    /// The run's numeric sequence identifier (`GITHUB_RUN_NUMBER`).
    pub run_number: Option<u64>,
}

/// The named outputs of a single pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildNames {
    /// The fully resolved, platform-unsubstituted build name.
    pub template: String,

    /// The codename, when the mode computes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,

    /// The fully substituted build name for each platform.
    #[serde(flatten)]
    pub platforms: IndexMap<Platform, String>,
}

impl BuildNames {
    /// Fans the resolved template out to every platform variant.
    ///
    /// Each platform name is substituted from its own copy of the template;
    /// the codename was computed before this point and is shared by all
    /// variants.
    fn resolve(template: String, short: Option<String>) -> Self {
        let platforms = Platform::VARIANTS
            .iter()
            .map(|platform| {
                (
                    *platform,
                    template::substitute(&template, template::PLATFORM, platform.tag()),
                )
            })
            .collect();

        Self {
            template,
            short,
            platforms,
        }
    }

    /// Gets the build name for a platform.
    pub fn platform(&self, platform: Platform) -> &str {
        &self.platforms[&platform]
    }
}

/// The build-name pipeline over a metadata source and the word lists.
pub struct Pipeline<'s> {
    /// The metadata source queries go to.
    source: &'s dyn MetadataSource,

    /// The word lists codenames are drawn from.
    words: WordLists,
}

impl<'s> Pipeline<'s> {
    /// Creates a pipeline over the given metadata source.
    ///
    /// Loading the word lists validates them, so an empty list fails here
    /// rather than during a run.
    pub fn new(source: &'s dyn MetadataSource) -> Result<Self> {
        Ok(Self {
            source,
            words: WordLists::embedded()?,
        })
    }

    /// Runs the long-form pipeline.
    ///
    /// The template tokens `{hash}`, `{datetime}`, `{project}`, and
    /// `{branch}` are resolved from metadata; the codename is selected from
    /// that intermediate string and substituted for `{shortname}`; the
    /// build configuration, when supplied, is substituted uppercased for
    /// `{configuration}`; finally every platform variant is produced.
    pub async fn long_form(
        &self,
        inputs: &Inputs,
        environment: &CiEnvironment,
    ) -> Result<BuildNames> {
        let project_name = resolve_project_name(inputs, environment)?;

        let commit_date =
            metadata::resolve_commit_date(self.source, inputs.date.as_deref()).await?;
        let commit_hash =
            metadata::resolve_commit_hash(self.source, inputs.git_ref.as_deref()).await?;

        let branch_name = resolve_branch_name(inputs, environment)?;
        let run_number = environment
            .run_number
            .ok_or(Error::MissingEnvironment("GITHUB_RUN_NUMBER"))?;

        let metadata = BuildMetadata {
            commit_hash,
            commit_date,
            project_name,
            branch_name,
            run_number,
            build_configuration: inputs.build_configuration.clone(),
        };

        info!(
            "resolved metadata: commit {} at {} on {}#{}",
            metadata.commit_hash,
            metadata.commit_date.long(),
            metadata.branch_name,
            metadata.run_number
        );

        Ok(compose_long(&metadata, &inputs.format, &self.words))
    }

    /// Runs the short-form pipeline.
    ///
    /// The base template is the version-control tool's own rendering of the
    /// head commit (datetime formatting is delegated to the tool), then
    /// `{project}` and the uppercased `{configuration}` are substituted and
    /// the platform variants produced. The build configuration is required
    /// in this mode; branch numbering and the codename are skipped.
    pub async fn short_form(
        &self,
        inputs: &Inputs,
        environment: &CiEnvironment,
    ) -> Result<BuildNames> {
        let configuration = inputs
            .build_configuration
            .as_deref()
            .ok_or(Error::MissingInput("build-configuration"))?;

        let project_name = resolve_project_name(inputs, environment)?;

        let base = self
            .source
            .formatted_head(&inputs.format, inputs.date_format.as_deref().unwrap_or(""))
            .await?;

        let mut name = template::substitute(&base, template::PROJECT, &project_name);
        name = template::substitute(&name, template::CONFIGURATION, &configuration.to_uppercase());

        Ok(BuildNames::resolve(name, None))
    }
}

/// Resolves the project name: the explicit override, else the qualified
/// repository identifier with the owner prefix stripped. Lowercased either
/// way.
fn resolve_project_name(inputs: &Inputs, environment: &CiEnvironment) -> Result<String> {
    if let Some(name) = &inputs.project_name {
        return Ok(name.to_lowercase());
    }

    let owner = environment
        .repository_owner
        .as_deref()
        .ok_or(Error::MissingEnvironment("GITHUB_REPOSITORY_OWNER"))?
        .to_lowercase();
    let repository = environment
        .repository
        .as_deref()
        .ok_or(Error::MissingEnvironment("GITHUB_REPOSITORY"))?
        .to_lowercase();

    Ok(repository
        .strip_prefix(&format!("{owner}/"))
        .unwrap_or(&repository)
        .to_string())
}

/// Resolves the branch name: the explicit override, else the
/// environment-derived ref name. Lowercased either way.
fn resolve_branch_name(inputs: &Inputs, environment: &CiEnvironment) -> Result<String> {
    let branch = inputs
        .branch_name
        .as_deref()
        .or(environment.ref_name.as_deref())
        .ok_or(Error::MissingEnvironment("GITHUB_REF_NAME"))?;
    Ok(branch.to_lowercase())
}

/// Composes the long-form outputs from resolved metadata.
///
/// This is the pure tail of the pipeline: no queries, no clock, no
/// randomness. The selector is fed the template after `{hash}`,
/// `{datetime}`, `{project}`, and `{branch}` are resolved but before
/// `{shortname}` is substituted, so the codename is never derived from
/// itself.
fn compose_long(metadata: &BuildMetadata, format: &str, words: &WordLists) -> BuildNames {
    let numbered_branch = format!(
        "{branch}{run}",
        branch = metadata.branch_name,
        run = metadata.run_number
    );

    let mut name = template::substitute(format, template::HASH, &metadata.commit_hash);
    name = template::substitute(&name, template::DATETIME, &metadata.commit_date.long());
    name = template::substitute(&name, template::PROJECT, &metadata.project_name);
    name = template::substitute(&name, template::BRANCH, &numbered_branch);

    let (adjective, noun) = select::select_words(words, &name);
    let codename = format!(
        "{date}{adjective}{noun}",
        date = metadata.commit_date.short()
    );

    name = template::substitute(&name, template::SHORTNAME, &codename);
    if let Some(configuration) = &metadata.build_configuration {
        name = template::substitute(
            &name,
            template::CONFIGURATION,
            &configuration.to_uppercase(),
        );
    }

    BuildNames::resolve(name, Some(codename))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::CommitDate;

    /// A source that must never be queried.
    ///
    /// Used to prove that fully overridden runs, and runs that fail input
    /// validation, never reach version control.
    struct UnreachableSource;

    #[async_trait]
    impl MetadataSource for UnreachableSource {
        async fn head_commit_hash(&self) -> Result<String> {
            unreachable!("the source should not be queried");
        }

        async fn head_commit_timestamp(&self) -> Result<i64> {
            unreachable!("the source should not be queried");
        }

        async fn formatted_head(&self, _: &str, _: &str) -> Result<String> {
            unreachable!("the source should not be queried");
        }
    }

    /// A source with fixed answers.
    struct FixedSource;

    /// 2024-03-05T07:08:09Z.
    const TIMESTAMP: i64 = 1709622489;

    #[async_trait]
    impl MetadataSource for FixedSource {
        async fn head_commit_hash(&self) -> Result<String> {
            Ok("ABC1234DEF5678ABC1234DEF5678ABC1234DEF56".to_string())
        }

        async fn head_commit_timestamp(&self) -> Result<i64> {
            Ok(TIMESTAMP)
        }

        async fn formatted_head(&self, pretty: &str, _date_format: &str) -> Result<String> {
            // Stand in for `git log -1 --pretty=<format>`: dates rendered,
            // name tokens left for the pipeline.
            Ok(pretty.replace("{datetime}", "240305-070809"))
        }
    }

    /// The environment used by most tests.
    fn environment() -> CiEnvironment {
        CiEnvironment {
            repository_owner: Some("Octo".to_string()),
            repository: Some("Octo/Widget".to_string()),
            ref_name: Some("Main".to_string()),
            run_number: Some(7),
        }
    }

    #[tokio::test]
    async fn long_form_end_to_end() {
        let source = FixedSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{branch}-{hash}-{shortname}".to_string(),
            ..Default::default()
        };

        let names = pipeline.long_form(&inputs, &environment()).await.unwrap();

        let short = names.short.as_deref().expect("long form computes a codename");
        assert!(short.starts_with("0305"), "codename `{short}` should carry the MMDD prefix");
        assert_eq!(names.template, format!("widget-main7-abc1234-{short}"));

        // No `{platform}` token, so all six variants equal the template.
        for platform in Platform::VARIANTS {
            assert_eq!(names.platform(*platform), names.template);
        }
    }

    #[tokio::test]
    async fn long_form_with_full_overrides_never_queries_the_source() {
        let source = UnreachableSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{branch}-{hash}-{datetime}-{platform}".to_string(),
            git_ref: Some("ABC1234DEF".to_string()),
            date: Some("2024-03-05T07:08:09!!".to_string()),
            ..Default::default()
        };

        let names = pipeline.long_form(&inputs, &environment()).await.unwrap();

        assert_eq!(names.template, "widget-main7-abc1234-240305-070809-{platform}");
        assert_eq!(names.platform(Platform::NX), "widget-main7-abc1234-240305-070809-NX");
        assert_eq!(names.platform(Platform::XBS), "widget-main7-abc1234-240305-070809-XBS");
    }

    #[tokio::test]
    async fn platform_variants_share_every_non_platform_value() {
        let source = FixedSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{platform}-{shortname}".to_string(),
            ..Default::default()
        };

        let names = pipeline.long_form(&inputs, &environment()).await.unwrap();
        let short = names.short.clone().unwrap();

        for platform in Platform::VARIANTS {
            assert_eq!(
                names.platform(*platform),
                format!("widget-{tag}-{short}", tag = platform.tag()),
            );
        }
    }

    #[tokio::test]
    async fn codename_is_deterministic_across_runs() {
        let source = FixedSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{branch}-{hash}-{shortname}".to_string(),
            ..Default::default()
        };

        let first = pipeline.long_form(&inputs, &environment()).await.unwrap();
        let second = pipeline.long_form(&inputs, &environment()).await.unwrap();
        assert_eq!(first.short, second.short);
        assert_eq!(first.template, second.template);
    }

    #[tokio::test]
    async fn long_form_uppercases_the_configuration() {
        let source = FixedSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{configuration}".to_string(),
            build_configuration: Some("shipping".to_string()),
            ..Default::default()
        };

        let names = pipeline.long_form(&inputs, &environment()).await.unwrap();
        assert_eq!(names.template, "widget-SHIPPING");
    }

    #[tokio::test]
    async fn malformed_date_override_fails_before_any_query() {
        let source = UnreachableSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}".to_string(),
            date: Some("2024-03-05T07:08:09".to_string()),
            git_ref: Some("abc1234".to_string()),
            ..Default::default()
        };

        let err = pipeline.long_form(&inputs, &environment()).await.unwrap_err();
        assert!(matches!(err, Error::MalformedDateOverride(_)));
    }

    #[tokio::test]
    async fn short_form_requires_a_build_configuration() {
        let source = UnreachableSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{configuration}-{platform}".to_string(),
            ..Default::default()
        };

        let err = pipeline.short_form(&inputs, &environment()).await.unwrap_err();
        assert!(matches!(err, Error::MissingInput("build-configuration")));
    }

    #[tokio::test]
    async fn short_form_end_to_end() {
        let source = FixedSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "{project}-{configuration}-{datetime}-{platform}".to_string(),
            build_configuration: Some("shipping".to_string()),
            ..Default::default()
        };

        let names = pipeline.short_form(&inputs, &environment()).await.unwrap();

        assert_eq!(names.short, None);
        assert_eq!(names.template, "widget-SHIPPING-240305-070809-{platform}");
        assert_eq!(names.platform(Platform::PS5), "widget-SHIPPING-240305-070809-PS5");
    }

    #[tokio::test]
    async fn project_name_falls_back_to_the_repository_identifier() {
        let inputs = Inputs::default();
        assert_eq!(resolve_project_name(&inputs, &environment()).unwrap(), "widget");

        let overridden = Inputs {
            project_name: Some("Gadget".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_project_name(&overridden, &environment()).unwrap(), "gadget");
    }

    #[tokio::test]
    async fn missing_environment_values_fail_only_when_needed() {
        let source = UnreachableSource;
        let pipeline = Pipeline::new(&source).unwrap();

        let inputs = Inputs {
            format: "fixed".to_string(),
            git_ref: Some("abc1234".to_string()),
            date: Some("2024-03-05T07:08:09!!".to_string()),
            branch_name: Some("main".to_string()),
            project_name: Some("widget".to_string()),
            ..Default::default()
        };

        let environment = CiEnvironment {
            run_number: None,
            ..Default::default()
        };

        let err = pipeline.long_form(&inputs, &environment).await.unwrap_err();
        assert!(matches!(
            err,
            Error::MissingEnvironment("GITHUB_RUN_NUMBER")
        ));
    }

    #[test]
    fn compose_is_a_pure_function_of_metadata() {
        let words = WordLists::embedded().unwrap();
        let metadata = BuildMetadata {
            commit_hash: "abc1234".to_string(),
            commit_date: CommitDate::from_unix(TIMESTAMP).unwrap(),
            project_name: "widget".to_string(),
            branch_name: "main".to_string(),
            run_number: 7,
            build_configuration: None,
        };

        let first = compose_long(&metadata, "{project}-{branch}-{hash}-{shortname}", &words);
        let second = compose_long(&metadata, "{project}-{branch}-{hash}-{shortname}", &words);
        assert_eq!(first.template, second.template);
        assert_eq!(first.short, second.short);
    }
}
