// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Commit status API client.
///
/// [`StatusApi`] is the single capability the publisher needs from GitHub;
/// [`GitHubClient`] implements it on top of an authenticated Octocrab client.
use std::future::Future;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::StatusConfig, error::Error, state::CommitState, validate::STATE_REQUIRED};

/// Body of a commit status creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct StatusRequest
{
    /// Canonical state to publish.
    pub state:       CommitState,
    /// Label identifying the check.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context:     String,
    /// Short description of the status.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Link attached to the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url:  Option<String,>,
}

impl StatusRequest
{
    /// Builds the request body from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the configuration carries no state.
    pub fn from_config(config: &StatusConfig,) -> Result<Self, Error,>
    {
        let state = config.state.ok_or_else(|| Error::validation(STATE_REQUIRED,),)?;

        Ok(Self {
            state,
            context: config.context.clone(),
            description: config.description.clone(),
            target_url: config.details_url.clone(),
        },)
    }
}

/// Commit status as returned by GitHub after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize,)]
pub struct PublishedStatus
{
    /// Identifier assigned by GitHub.
    #[serde(default)]
    pub id:          Option<u64,>,
    /// State recorded by GitHub.
    #[serde(default)]
    pub state:       Option<CommitState,>,
    /// Context label recorded by GitHub.
    #[serde(default)]
    pub context:     Option<String,>,
    /// Description recorded by GitHub.
    #[serde(default)]
    pub description: Option<String,>,
    /// Target link recorded by GitHub.
    #[serde(default)]
    pub target_url:  Option<String,>,
}

/// Capability to create commit statuses.
pub trait StatusApi
{
    /// Creates a status for `commit` in `owner/repository`.
    ///
    /// Creating a status for a context that already has one on the commit
    /// replaces it on the GitHub side.
    fn create_status(
        &self,
        owner: &str,
        repository: &str,
        commit: &str,
        request: &StatusRequest,
    ) -> impl Future<Output = Result<PublishedStatus, Error,>,>;
}

/// [`StatusApi`] implementation backed by the GitHub REST API.
#[derive(Debug, Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
}

impl GitHubClient
{
    /// Creates a client authenticated with `token`.
    ///
    /// `api_url` overrides the REST API base, e.g. for GitHub Enterprise
    /// Server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the API base is not a valid URI or the
    /// HTTP client cannot be built.
    pub fn new(token: &str, api_url: Option<&str,>,) -> Result<Self, Error,>
    {
        let mut builder = Octocrab::builder().personal_token(token,);
        if let Some(url,) = api_url {
            builder = builder.base_uri(url,).map_err(|e| Error::Client {
                message: format!("invalid API URL {url}: {e}"),
            },)?;
        }

        let octocrab = builder.build().map_err(|e| Error::Client {
            message: e.to_string(),
        },)?;

        Ok(Self {
            octocrab,
        },)
    }

    /// Creates a client from the credential and API base of `config`.
    ///
    /// # Errors
    ///
    /// See [`GitHubClient::new`].
    pub fn from_config(config: &StatusConfig,) -> Result<Self, Error,>
    {
        Self::new(&config.token, config.api_url.as_deref(),)
    }
}

impl StatusApi for GitHubClient
{
    async fn create_status(
        &self,
        owner: &str,
        repository: &str,
        commit: &str,
        request: &StatusRequest,
    ) -> Result<PublishedStatus, Error,>
    {
        debug!("Creating {} status for {}/{}@{}", request.state, owner, repository, commit);

        self.octocrab
            .post(format!("/repos/{owner}/{repository}/statuses/{commit}"), Some(request,),)
            .await
            .map_err(|e| Error::service(format!("failed to create commit status: {e}"),),)
    }
}
