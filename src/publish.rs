// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Publication of a resolved configuration as a commit status.
///
/// Remote failures are retried under the fibonacci schedule; a response
/// without a status identifier is a contract violation and fails at once.
use std::fmt;

use tracing::info;

use crate::{
    client::{StatusApi, StatusRequest},
    config::StatusConfig,
    error::Error,
    retry::{Attempt, RetryConfig, retry_with_backoff},
    state::CommitState,
};

/// Outcome of a successful publication.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct PublishSummary
{
    /// Identifier of the created status.
    pub id:         u64,
    /// State that was published.
    pub state:      CommitState,
    /// Web URL of the annotated commit history.
    pub commit_url: String,
}

impl fmt::Display for PublishSummary
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "Updated status:\nID: {}\nState: {}\nURL: {}", self.id, self.state, self.commit_url)
    }
}

/// Creates the commit status described by `config` through `client`.
///
/// # Errors
///
/// * The last [`Error::Service`] reported by `client` once the retry budget
///   of `retry` is exhausted.
/// * [`Error::EmptyStatusId`] when GitHub answers without a status
///   identifier; this is never retried.
/// * [`Error::Validation`] when `config` has not been validated and carries
///   no state.
pub async fn publish<C,>(
    config: &StatusConfig,
    client: &C,
    retry: &RetryConfig,
) -> Result<PublishSummary, Error,>
where
    C: StatusApi + ?Sized,
{
    let request = StatusRequest::from_config(config,)?;
    let operation = format!(
        "create {} status for {}/{}@{}",
        request.state, config.owner, config.repository, config.commit
    );

    let request = &request;
    let (owner, repository, commit,) =
        (config.owner.as_str(), config.repository.as_str(), config.commit.as_str(),);

    let id = retry_with_backoff(retry, &operation, move || async move {
        match client.create_status(owner, repository, commit, request,).await {
            Ok(status,) => status.id.ok_or(Attempt::Fatal(Error::EmptyStatusId,),),
            Err(error,) => Err(Attempt::from(error,),),
        }
    },)
    .await?;

    let summary = PublishSummary {
        id,
        state: request.state,
        commit_url: config.commit_url(),
    };
    info!("Published status {} ({}) for {}", summary.id, summary.state, summary.commit_url);

    Ok(summary,)
}
