//! Command-line entry point for the commit-status action.
//!
//! Every action input is accepted as a flag and falls back to the
//! `INPUT_<NAME>` variable the GitHub Actions runner exports for it.

use clap::Parser;
use commit_status::{
    Error, GitHubClient, INPUT_CONTEXT, INPUT_DESCRIPTION, INPUT_DETAILS_URL, INPUT_OWNER,
    INPUT_REPOSITORY, INPUT_SHA, INPUT_STATE, INPUT_TOKEN, InputSource, ProcessEnvironment,
    PublishSummary, actions, publish, resolve, retry::RetryConfig,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Command line interface for publishing a commit status.
#[derive(Debug, Parser,)]
#[command(name = "commit-status", version, about = "Report a commit status to GitHub")]
struct Cli
{
    /// Token used to authenticate against the GitHub API.
    #[arg(long, env = "INPUT_TOKEN", default_value = "", hide_env_values = true, hide_default_value = true)]
    token: String,

    /// Desired state: error, failure, pending, success, cancel, cancelled or skipped.
    #[arg(long, env = "INPUT_STATE", default_value = "", hide_default_value = true)]
    state: String,

    /// Label identifying the check on the commit.
    #[arg(long, env = "INPUT_CONTEXT", default_value = "", hide_default_value = true)]
    context: String,

    /// Short description of the status.
    #[arg(long, env = "INPUT_DESCRIPTION", default_value = "", hide_default_value = true)]
    description: String,

    /// Repository owner; defaults to GITHUB_OWNER.
    #[arg(long, env = "INPUT_OWNER", default_value = "", hide_default_value = true)]
    owner: String,

    /// Repository name; defaults to GITHUB_REPOSITORY.
    #[arg(long, env = "INPUT_REPOSITORY", default_value = "", hide_default_value = true)]
    repository: String,

    /// Commit SHA; defaults to GITHUB_SHA.
    #[arg(long, env = "INPUT_SHA", default_value = "", hide_default_value = true)]
    sha: String,

    /// Link attached to the status.
    #[arg(long = "details-url", env = "INPUT_DETAILS_URL", default_value = "", hide_default_value = true)]
    details_url: String,

    /// Number of re-attempts after a failed API call.
    #[arg(long = "max-retries", env = "INPUT_MAX_RETRIES", default_value_t = 5)]
    max_retries: u32,
}

impl InputSource for Cli
{
    fn input(&self, name: &str,) -> String
    {
        let value = match name {
            INPUT_TOKEN => &self.token,
            INPUT_STATE => &self.state,
            INPUT_CONTEXT => &self.context,
            INPUT_DESCRIPTION => &self.description,
            INPUT_OWNER => &self.owner,
            INPUT_REPOSITORY => &self.repository,
            INPUT_SHA => &self.sha,
            INPUT_DETAILS_URL => &self.details_url,
            _ => return String::new(),
        };
        value.clone()
    }
}

fn init_tracing()
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);

    tracing_subscriber::registry()
        .with(env_filter,)
        .with(fmt::layer().with_target(false,).with_writer(std::io::stderr,),)
        .try_init()
        .ok();
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();
    let cli = Cli::parse();

    match run(&cli,).await {
        Ok(summary,) => println!("{summary}"),
        Err(error,) => actions::fatal(&error,),
    }
}

/// Resolves the inputs and publishes the status.
///
/// # Errors
///
/// Propagates resolution, validation and publication errors.
async fn run(cli: &Cli,) -> Result<PublishSummary, Error,>
{
    let config = resolve(cli, &ProcessEnvironment,)?;
    info!(
        "Publishing {} status to {}/{}@{}",
        config.state.map(|state| state.as_str(),).unwrap_or_default(),
        config.owner,
        config.repository,
        config.commit
    );

    let client = GitHubClient::from_config(&config,)?;
    publish(&config, &client, &RetryConfig::with_max_retries(cli.max_retries,),).await
}
