//! Reporting of commit build/test statuses to GitHub from CI workflows.
//!
//! The library turns raw GitHub Actions inputs into a validated
//! [`StatusConfig`] and publishes it through the commit status API with
//! bounded fibonacci retries. Input sources, the environment and the remote
//! API are injected through narrow traits so every step can be exercised
//! without process-global state or network access.

pub mod actions;
mod client;
mod config;
mod error;
mod inputs;
mod publish;
pub mod retry;
mod state;
mod validate;

pub use client::{GitHubClient, PublishedStatus, StatusApi, StatusRequest};
pub use config::{DEFAULT_SERVER_URL, StatusConfig, resolve, strip_owner_prefix};
pub use error::Error;
pub use inputs::{
    ENV_API_URL, ENV_COMMIT_SHA, ENV_OWNER, ENV_REPOSITORY, ENV_SERVER_URL, Environment,
    INPUT_CONTEXT, INPUT_DESCRIPTION, INPUT_DETAILS_URL, INPUT_OWNER, INPUT_REPOSITORY, INPUT_SHA,
    INPUT_STATE, INPUT_TOKEN, InputSource, ProcessEnvironment,
};
pub use publish::{PublishSummary, publish};
pub use state::{CommitState, normalize};
pub use validate::{CREDENTIAL_REQUIRED, STATE_REQUIRED, Violations, validate};
