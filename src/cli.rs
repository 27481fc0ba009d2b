use anyhow::Result;
use clap::Parser;
use log::info;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::auth::Token;
use crate::config::Config;
use crate::error::ArtifactError;
use crate::output;
use crate::providers::gitlab::DownloadSettings;
use crate::providers::GitLabProvider;

/// Long flags that may also be spelled with a single dash (`-baseurl`).
const SINGLE_DASH_FLAGS: [&str; 3] = ["baseurl", "project", "stage"];

#[derive(Parser, Debug)]
#[command(name = "ciartifacts")]
#[command(
    author,
    version,
    about = "Download GitLab CI job artifacts by branch and stage",
    long_about = None,
    after_help = "Example:\n  TOKEN=123456 ciartifacts -baseurl https://gitlab.example.com/ -project diaspora/diaspora-client -stage test branch1 [branches2toN...]"
)]
pub struct Cli {
    /// GitLab instance base URL (e.g., https://gitlab.example.com/)
    #[arg(short = 'u', long = "baseurl", value_name = "URL")]
    base_url: Option<String>,

    /// Project path with namespace (e.g., diaspora/diaspora-client)
    #[arg(short = 'P', long)]
    project: Option<String>,

    /// Pipeline stage whose job artifacts are downloaded
    #[arg(short, long)]
    stage: Option<String>,

    /// Private access token
    #[arg(long, env = "TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Directory the archives are written to [default: .]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Maximum number of project listing pages to search
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Configuration file (defaults to ./ciartifacts.toml and friends)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Suppress banner, progress bars and the summary table
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Branches whose last pipeline is searched, in processing order
    #[arg(value_name = "BRANCH")]
    branches: Vec<String>,
}

/// Validated inputs for one run.
#[derive(Debug)]
pub struct RunOptions {
    pub base_url: String,
    pub project: String,
    pub stage: String,
    pub branches: Vec<String>,
    pub token: Token,
    pub max_pages: u32,
    pub download: DownloadSettings,
    pub show_banner: bool,
    pub show_summary: bool,
}

/// Rewrites `-baseurl`, `-project` and `-stage` (optionally `-flag=value`)
/// to their double-dash form. Arguments after `--` are left untouched.
pub fn normalize_single_dash_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_separator = false;

    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            if arg == "--" {
                after_separator = true;
                return arg;
            }
            match arg.to_str() {
                Some(s) if is_single_dash_long(s) => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    arg.strip_prefix('-')
        .filter(|rest| !rest.starts_with('-'))
        .map(|rest| rest.split('=').next().unwrap_or(rest))
        .is_some_and(|name| SINGLE_DASH_FLAGS.contains(&name))
}

fn required(value: Option<&String>, what: &str) -> Result<String, ArtifactError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| ArtifactError::Usage(format!("{what} missing")))
}

impl Cli {
    /// Merges command-line values over `config` and checks that everything a
    /// run needs is present. Performs no network I/O.
    pub fn resolve(&self, config: &Config) -> Result<RunOptions, ArtifactError> {
        let base_url = required(
            self.base_url.as_ref().or(config.gitlab.base_url.as_ref()),
            "base URL",
        )?;
        let project = required(
            self.project.as_ref().or(config.gitlab.project.as_ref()),
            "project",
        )?;
        let stage = required(
            self.stage.as_ref().or(config.gitlab.stage.as_ref()),
            "stage",
        )?;

        if self.branches.is_empty() {
            return Err(ArtifactError::Usage("branches missing".to_string()));
        }

        let token = required(self.token.as_ref(), "token")?;

        if self.branches.iter().any(String::is_empty) {
            return Err(ArtifactError::Usage("bad branch: empty name".to_string()));
        }

        let output_dir = self
            .output_dir
            .clone()
            .or_else(|| config.output.directory.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(RunOptions {
            base_url,
            project,
            stage,
            branches: self.branches.clone(),
            token: Token::from(token),
            max_pages: self.max_pages.unwrap_or(config.gitlab.max_pages),
            download: DownloadSettings {
                output_dir,
                show_progress: !self.quiet,
            },
            show_banner: !self.quiet,
            show_summary: !self.quiet && config.output.summary,
        })
    }

    async fn execute_download(&self, options: RunOptions) -> Result<()> {
        info!(
            "Collecting {} artifacts of {} for {} branch(es)",
            options.stage,
            options.project,
            options.branches.len()
        );

        let provider = GitLabProvider::new(
            &options.base_url,
            options.project.clone(),
            &options.token,
            options.max_pages,
        )?;

        let downloads = provider
            .download_artifacts(&options.branches, &options.stage, &options.download)
            .await?;

        if options.show_summary {
            output::print_summary(&downloads);
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let options = self.resolve(&config)?;

        if options.show_banner {
            output::print_banner();
        }

        self.execute_download(options).await
    }
}
