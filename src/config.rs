// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Resolution of action inputs into a validated status configuration.
//!
//! Resolution copies the raw inputs, normalizes the state, fills owner,
//! repository and commit from the environment when they were not supplied,
//! strips the owner prefix GitHub includes in `GITHUB_REPOSITORY`, and
//! finally runs the aggregated required-field validation.
//!
//! The environment defaults fail fast on the first missing binding, whereas
//! credential and state problems are collected and reported together.

use std::fmt;

use tracing::debug;

use crate::{
    error::Error,
    inputs::{
        ENV_API_URL, ENV_COMMIT_SHA, ENV_OWNER, ENV_REPOSITORY, ENV_SERVER_URL, Environment,
        INPUT_CONTEXT, INPUT_DESCRIPTION, INPUT_DETAILS_URL, INPUT_OWNER, INPUT_REPOSITORY,
        INPUT_SHA, INPUT_STATE, INPUT_TOKEN, InputSource,
    },
    state::{CommitState, normalize},
    validate::validate,
};

/// Web host used for commit links when `GITHUB_SERVER_URL` is not set.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Fully resolved inputs for a single status update.
///
/// Built once per invocation by [`resolve`] and read-only afterwards.
#[derive(Clone, PartialEq, Eq,)]
pub struct StatusConfig
{
    /// Token used to authenticate against the GitHub API.
    pub token:       String,
    /// Canonical state; `None` when no state was supplied.
    pub state:       Option<CommitState,>,
    /// Label identifying the check on the commit.
    pub context:     String,
    /// Short human readable description of the status.
    pub description: String,
    /// Account or organization owning the repository.
    pub owner:       String,
    /// Bare repository name without the owner prefix.
    pub repository:  String,
    /// SHA of the commit being annotated.
    pub commit:      String,
    /// Optional link attached to the status.
    pub details_url: Option<String,>,
    /// Web host of the GitHub instance, without trailing slash.
    pub server_url:  String,
    /// REST API base of the GitHub instance when it differs from github.com.
    pub api_url:     Option<String,>,
}

impl Default for StatusConfig
{
    fn default() -> Self
    {
        Self {
            token:       String::new(),
            state:       None,
            context:     String::new(),
            description: String::new(),
            owner:       String::new(),
            repository:  String::new(),
            commit:      String::new(),
            details_url: None,
            server_url:  DEFAULT_SERVER_URL.to_owned(),
            api_url:     None,
        }
    }
}

impl fmt::Debug for StatusConfig
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        let token = if self.token.is_empty() { "" } else { "***" };
        f.debug_struct("StatusConfig",)
            .field("token", &token,)
            .field("state", &self.state,)
            .field("context", &self.context,)
            .field("description", &self.description,)
            .field("owner", &self.owner,)
            .field("repository", &self.repository,)
            .field("commit", &self.commit,)
            .field("details_url", &self.details_url,)
            .field("server_url", &self.server_url,)
            .field("api_url", &self.api_url,)
            .finish()
    }
}

impl StatusConfig
{
    /// Returns the web URL listing the commits up to the annotated one.
    ///
    /// # Examples
    ///
    /// ```
    /// use commit_status::StatusConfig;
    ///
    /// let config = StatusConfig {
    ///     owner: "octocat".to_owned(),
    ///     repository: "hello-world".to_owned(),
    ///     commit: "abc123".to_owned(),
    ///     ..StatusConfig::default()
    /// };
    /// assert_eq!(config.commit_url(), "https://github.com/octocat/hello-world/commits/abc123");
    /// ```
    pub fn commit_url(&self,) -> String
    {
        format!("{}/{}/{}/commits/{}", self.server_url, self.owner, self.repository, self.commit)
    }
}

/// Builds a validated [`StatusConfig`] from raw inputs and the environment.
///
/// # Errors
///
/// * [`Error::UnsupportedState`] when a non-empty state is not recognized.
/// * [`Error::MissingOwner`], [`Error::MissingRepository`] or
///   [`Error::MissingCommit`] for the first default that cannot be resolved.
/// * [`Error::Validation`] listing every empty required field.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use commit_status::{CommitState, resolve};
///
/// let inputs: HashMap<String, String,> = HashMap::from([
///     ("token".to_owned(), "secret".to_owned(),),
///     ("state".to_owned(), "cancelled".to_owned(),),
/// ],);
/// let env: HashMap<String, String,> = HashMap::from([
///     ("GITHUB_OWNER".to_owned(), "octocat".to_owned(),),
///     ("GITHUB_REPOSITORY".to_owned(), "octocat/hello-world".to_owned(),),
///     ("GITHUB_SHA".to_owned(), "abc123".to_owned(),),
/// ],);
///
/// let config = resolve(&inputs, &env,)?;
/// assert_eq!(config.state, Some(CommitState::Error));
/// assert_eq!(config.repository, "hello-world");
/// # Ok::<(), commit_status::Error>(())
/// ```
pub fn resolve<I, E,>(inputs: &I, env: &E,) -> Result<StatusConfig, Error,>
where
    I: InputSource + ?Sized,
    E: Environment + ?Sized,
{
    let read = |name: &str| inputs.input(name,).trim().to_owned();

    let raw_state = read(INPUT_STATE,);
    let state = if raw_state.is_empty() { None } else { Some(normalize(&raw_state,)?,) };

    let owner = or_env(read(INPUT_OWNER,), env, ENV_OWNER,).ok_or(Error::MissingOwner,)?;
    let repository =
        or_env(read(INPUT_REPOSITORY,), env, ENV_REPOSITORY,).ok_or(Error::MissingRepository,)?;
    let commit = or_env(read(INPUT_SHA,), env, ENV_COMMIT_SHA,).ok_or(Error::MissingCommit,)?;

    let repository = strip_owner_prefix(&repository, &owner,).to_owned();
    let details_url = Some(read(INPUT_DETAILS_URL,),).filter(|url| !url.is_empty(),);
    let server_url = env
        .var(ENV_SERVER_URL,)
        .map(|url| url.trim_end_matches('/',).to_owned(),)
        .filter(|url| !url.is_empty(),)
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned(),);

    let config = StatusConfig {
        token: read(INPUT_TOKEN,),
        state,
        context: read(INPUT_CONTEXT,),
        description: read(INPUT_DESCRIPTION,),
        owner,
        repository,
        commit,
        details_url,
        server_url,
        api_url: env.var(ENV_API_URL,),
    };

    validate(&config,)?;
    debug!("Resolved status configuration: {:?}", config);

    Ok(config,)
}

/// Removes a leading `"<owner>/"` from `repository`.
///
/// Repositories without that prefix are returned unchanged.
///
/// # Examples
///
/// ```
/// use commit_status::strip_owner_prefix;
///
/// assert_eq!(strip_owner_prefix("foo/bar", "foo",), "bar");
/// assert_eq!(strip_owner_prefix("bar", "foo",), "bar");
/// ```
pub fn strip_owner_prefix<'a,>(repository: &'a str, owner: &str,) -> &'a str
{
    repository
        .strip_prefix(owner,)
        .and_then(|rest| rest.strip_prefix('/',),)
        .unwrap_or(repository,)
}

fn or_env<E,>(value: String, env: &E, name: &str,) -> Option<String,>
where
    E: Environment + ?Sized,
{
    if value.is_empty() {
        env.var(name,)
    } else {
        Some(value,)
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::{DEFAULT_SERVER_URL, StatusConfig, resolve, strip_owner_prefix};
    use crate::{CommitState, Error};

    fn map(entries: &[(&str, &str,)],) -> HashMap<String, String,>
    {
        entries.iter().map(|(key, value,)| ((*key).to_owned(), (*value).to_owned(),),).collect()
    }

    fn full_inputs() -> HashMap<String, String,>
    {
        map(&[
            ("token", "some-token",),
            ("state", "success",),
            ("context", "some-context",),
            ("description", "some-description",),
            ("owner", "some-owner",),
            ("repository", "some-repo",),
            ("sha", "some-sha",),
            ("details_url", "some-url",),
        ],)
    }

    fn defaults_only() -> HashMap<String, String,>
    {
        map(&[
            ("token", "some-token",),
            ("state", "cancelled",),
            ("context", "some-context",),
            ("description", "some-description",),
            ("details_url", "some-url",),
        ],)
    }

    fn no_env() -> HashMap<String, String,>
    {
        HashMap::new()
    }

    fn full_env() -> HashMap<String, String,>
    {
        map(&[
            ("GITHUB_OWNER", "env-owner",),
            ("GITHUB_REPOSITORY", "env-repo",),
            ("GITHUB_SHA", "env-sha",),
        ],)
    }

    #[test]
    fn explicit_inputs_are_copied_verbatim()
    {
        let config = resolve(&full_inputs(), &no_env(),).expect("resolution succeeds",);

        assert_eq!(config, StatusConfig {
            token:       "some-token".to_owned(),
            state:       Some(CommitState::Success,),
            context:     "some-context".to_owned(),
            description: "some-description".to_owned(),
            owner:       "some-owner".to_owned(),
            repository:  "some-repo".to_owned(),
            commit:      "some-sha".to_owned(),
            details_url: Some("some-url".to_owned(),),
            server_url:  DEFAULT_SERVER_URL.to_owned(),
            api_url:     None,
        });
    }

    #[test]
    fn defaults_are_read_from_environment()
    {
        let config = resolve(&defaults_only(), &full_env(),).expect("resolution succeeds",);

        assert_eq!(config.state, Some(CommitState::Error));
        assert_eq!(config.owner, "env-owner");
        assert_eq!(config.repository, "env-repo");
        assert_eq!(config.commit, "env-sha");
    }

    #[test]
    fn explicit_inputs_take_precedence_over_environment()
    {
        let config = resolve(&full_inputs(), &full_env(),).expect("resolution succeeds",);
        assert_eq!(config.owner, "some-owner");
        assert_eq!(config.repository, "some-repo");
        assert_eq!(config.commit, "some-sha");
    }

    #[test]
    fn missing_owner_short_circuits_before_validation()
    {
        let inputs = map(&[("state", "cancelled",)],);
        let env = map(&[("GITHUB_REPOSITORY", "env-repo",), ("GITHUB_SHA", "env-sha",)],);

        let error = resolve(&inputs, &env,).expect_err("owner is missing",);
        assert!(matches!(error, Error::MissingOwner), "unexpected error: {error:?}");
    }

    #[test]
    fn missing_repository_is_reported()
    {
        let env = map(&[("GITHUB_OWNER", "env-owner",), ("GITHUB_SHA", "env-sha",)],);
        let error = resolve(&defaults_only(), &env,).expect_err("repository is missing",);
        assert!(matches!(error, Error::MissingRepository));
        assert!(error.to_string().contains("GITHUB_REPOSITORY environment variable not set"));
    }

    #[test]
    fn missing_commit_is_reported()
    {
        let env = map(&[("GITHUB_OWNER", "env-owner",), ("GITHUB_REPOSITORY", "env-repo",)],);
        let error = resolve(&defaults_only(), &env,).expect_err("commit is missing",);
        assert!(matches!(error, Error::MissingCommit));
    }

    #[test]
    fn empty_environment_value_counts_as_missing()
    {
        let mut env = full_env();
        env.insert("GITHUB_SHA".to_owned(), String::new(),);
        let error = resolve(&defaults_only(), &env,).expect_err("commit is empty",);
        assert!(matches!(error, Error::MissingCommit));
    }

    #[test]
    fn unsupported_state_fails_before_defaults()
    {
        let mut inputs = defaults_only();
        inputs.insert("state".to_owned(), "foo".to_owned(),);

        let error = resolve(&inputs, &no_env(),).expect_err("state is invalid",);
        assert_eq!(error.to_string(), "state value not supported: foo");
    }

    #[test]
    fn empty_credential_and_state_are_aggregated()
    {
        let inputs = map(&[("context", "some-context",)],);
        let error = resolve(&inputs, &full_env(),).expect_err("required fields missing",);
        assert_eq!(error.to_string(), "credential is a required field, state is a required field");
    }

    #[test]
    fn owner_prefix_is_stripped_from_environment_repository()
    {
        let mut env = full_env();
        env.insert("GITHUB_REPOSITORY".to_owned(), "env-owner/env-repo".to_owned(),);

        let config = resolve(&defaults_only(), &env,).expect("resolution succeeds",);
        assert_eq!(config.repository, "env-repo");
    }

    #[test]
    fn owner_prefix_is_stripped_from_explicit_repository()
    {
        let mut inputs = full_inputs();
        inputs.insert("repository".to_owned(), "some-owner/some-repo".to_owned(),);

        let config = resolve(&inputs, &no_env(),).expect("resolution succeeds",);
        assert_eq!(config.repository, "some-repo");
    }

    #[test]
    fn inputs_are_trimmed_and_empty_details_url_is_none()
    {
        let mut inputs = full_inputs();
        inputs.insert("state".to_owned(), " pending\n".to_owned(),);
        inputs.insert("details_url".to_owned(), "  ".to_owned(),);

        let config = resolve(&inputs, &no_env(),).expect("resolution succeeds",);
        assert_eq!(config.state, Some(CommitState::Pending));
        assert_eq!(config.details_url, None);
    }

    #[test]
    fn server_and_api_urls_come_from_environment()
    {
        let mut env = full_env();
        env.insert("GITHUB_SERVER_URL".to_owned(), "https://ghe.example.com/".to_owned(),);
        env.insert("GITHUB_API_URL".to_owned(), "https://ghe.example.com/api/v3".to_owned(),);

        let config = resolve(&defaults_only(), &env,).expect("resolution succeeds",);
        assert_eq!(config.server_url, "https://ghe.example.com");
        assert_eq!(config.api_url.as_deref(), Some("https://ghe.example.com/api/v3"));
        assert_eq!(config.commit_url(), "https://ghe.example.com/env-owner/env-repo/commits/env-sha");
    }

    #[test]
    fn slash_only_server_url_falls_back_to_default()
    {
        let mut env = full_env();
        env.insert("GITHUB_SERVER_URL".to_owned(), "//".to_owned(),);

        let config = resolve(&defaults_only(), &env,).expect("resolution succeeds",);
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.commit_url(), "https://github.com/env-owner/env-repo/commits/env-sha");
    }

    #[test]
    fn debug_output_redacts_token()
    {
        let config = resolve(&full_inputs(), &no_env(),).expect("resolution succeeds",);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("some-token"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn strip_owner_prefix_examples()
    {
        assert_eq!(strip_owner_prefix("foo/bar", "foo",), "bar");
        assert_eq!(strip_owner_prefix("bar", "foo",), "bar");
        assert_eq!(strip_owner_prefix("foobar/baz", "foo",), "foobar/baz");
        assert_eq!(strip_owner_prefix("other/bar", "foo",), "other/bar");
    }

    proptest! {
        #[test]
        fn stripped_repository_never_keeps_owner_prefix(
            owner in "[a-z0-9-]{1,12}",
            name in "[a-z0-9._-]{1,16}",
        ) {
            let qualified = format!("{owner}/{name}");
            prop_assert_eq!(strip_owner_prefix(&qualified, &owner), name.as_str());
            prop_assert_eq!(strip_owner_prefix(&name, &owner), name.as_str());
        }
    }
}
