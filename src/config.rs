//! Site configuration consumed by the issue generator.
//!
//! The generator reads the `github` section of the site's `_config.yml`.
//! Every other key in that document belongs to the site builder and is
//! ignored. Raw values are resolved into [`GithubSettings`], the explicit
//! value handed to the fetcher, so nothing downstream reads the process
//! environment on its own.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{self, Error};

/// Environment variables consulted, in order, when the configuration does
/// not carry a token.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "JEKYLL_GITHUB_TOKEN",];

/// Public GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Subset of the site configuration document relevant to issue syncing.
///
/// # Examples
///
/// ```
/// use issuepress::SiteConfig;
///
/// let yaml = r#"
/// title: My blog
/// github:
///   username: octocat
///   repository: blog
/// "#;
/// let config: SiteConfig = serde_yaml::from_str(yaml,).expect("valid configuration",);
/// assert_eq!(config.github.expect("github section",).owner, "octocat");
/// ```
#[derive(Debug, Default, Deserialize, Serialize,)]
pub struct SiteConfig
{
    /// Repository whose issues are published. Sites without this section
    /// are left untouched.
    #[serde(default)]
    pub github: Option<GithubSection,>,
}

/// Raw `github` section before validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize,)]
pub struct GithubSection
{
    /// Account that owns the repository.
    #[serde(alias = "username")]
    pub owner: String,

    /// Repository name.
    #[serde(alias = "repo")]
    pub repository: String,

    /// Optional API token; environment fallbacks apply when absent.
    #[serde(default)]
    pub token: Option<String,>,

    /// Optional API base override, e.g. for GitHub Enterprise.
    #[serde(default, alias = "api_url", alias = "api-base")]
    pub api_base: Option<String,>,
}

/// Validated settings handed to the issue fetcher.
#[derive(Clone, PartialEq, Eq,)]
pub struct GithubSettings
{
    pub owner:      String,
    pub repository: String,
    /// Token attached as an authorization header when present.
    pub token:      Option<String,>,
    pub api_base:   String,
}

impl GithubSettings
{
    /// Creates anonymous settings against the public API.
    pub fn new(owner: impl Into<String,>, repository: impl Into<String,>,) -> Self
    {
        Self {
            owner:      owner.into(),
            repository: repository.into(),
            token:      None,
            api_base:   DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Returns the `owner/repository` pair used in logs and the summary
    /// descriptor.
    pub fn full_name(&self,) -> String
    {
        format!("{}/{}", self.owner, self.repository)
    }
}

impl std::fmt::Debug for GithubSettings
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        f.debug_struct("GithubSettings",)
            .field("owner", &self.owner,)
            .field("repository", &self.repository,)
            .field("token", &self.token.as_ref().map(|_| "<redacted>",),)
            .field("api_base", &self.api_base,)
            .finish()
    }
}

impl SiteConfig
{
    /// Resolves the `github` section into fetcher settings.
    ///
    /// `env` looks up environment variables; pass `|name| std::env::var(name).ok()`
    /// in production and a fixed map in tests. Returns `Ok(None)` when the
    /// site has no `github` section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](Error::Validation) when the owner or
    /// repository is blank or contains characters GitHub does not allow.
    pub fn github_settings<F,>(&self, env: F,) -> Result<Option<GithubSettings,>, Error,>
    where
        F: Fn(&str,) -> Option<String,>,
    {
        let Some(section,) = self.github.as_ref() else {
            return Ok(None,);
        };

        let owner = normalize_identifier(&section.owner, "github.username",)?;
        let repository = normalize_identifier(&section.repository, "github.repository",)?;
        let token = resolve_token(section.token.as_deref(), env,);
        let api_base = match section.api_base.as_deref().map(str::trim,) {
            Some(base,) if !base.is_empty() => base.trim_end_matches('/',).to_owned(),
            _ => DEFAULT_API_BASE.to_owned(),
        };

        Ok(Some(GithubSettings {
            owner,
            repository,
            token,
            api_base,
        },),)
    }
}

/// Loads the site configuration from the provided YAML file path.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read or the YAML cannot be
/// deserialized.
pub fn load_site_config(path: &Path,) -> Result<SiteConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_site_config(&contents,)
}

/// Parses the site configuration from a YAML document string.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded.
pub fn parse_site_config(contents: &str,) -> Result<SiteConfig, Error,>
{
    if contents.trim().is_empty() {
        return Ok(SiteConfig::default(),);
    }
    Ok(serde_yaml::from_str(contents,)?,)
}

/// Loads `{site_source}/.env` into the process environment when present.
///
/// Variables that are already set keep their values. A malformed file is
/// logged and skipped.
pub fn load_dotenv(site_source: &Path,)
{
    let path = site_source.join(".env",);
    if !path.is_file() {
        return;
    }

    match dotenvy::from_path(&path,) {
        Ok((),) => debug!("Loaded environment from {}", path.display()),
        Err(e,) => warn!("Ignoring unreadable {}: {e}", path.display()),
    }
}

/// Picks the first non-blank token from the configuration value and then
/// [`TOKEN_ENV_VARS`].
fn resolve_token<F,>(configured: Option<&str,>, env: F,) -> Option<String,>
where
    F: Fn(&str,) -> Option<String,>,
{
    if let Some(token,) = configured.map(str::trim,).filter(|value| !value.is_empty(),) {
        return Some(token.to_owned(),);
    }

    TOKEN_ENV_VARS.iter().find_map(|name| {
        env(name,).map(|value| value.trim().to_owned(),).filter(|value| !value.is_empty(),)
    },)
}

fn normalize_identifier(input: &str, field: &str,) -> Result<String, Error,>
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty"),),);
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'),) {
        return Err(Error::validation(format!(
            "{field} may only contain ASCII letters, digits, '-', '_' and '.'"
        ),),);
    }
    Ok(trimmed.to_owned(),)
}
