// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Narrow interfaces over the action inputs and the process environment.
//!
//! The resolver only sees these traits, so tests supply in-memory maps and
//! never touch process-global state.

use std::collections::HashMap;

/// Input names understood by the resolver.
pub const INPUT_TOKEN: &str = "token";
/// Desired commit state.
pub const INPUT_STATE: &str = "state";
/// Status context label.
pub const INPUT_CONTEXT: &str = "context";
/// Status description.
pub const INPUT_DESCRIPTION: &str = "description";
/// Repository owner override.
pub const INPUT_OWNER: &str = "owner";
/// Repository name override.
pub const INPUT_REPOSITORY: &str = "repository";
/// Commit SHA override.
pub const INPUT_SHA: &str = "sha";
/// Link attached to the status.
pub const INPUT_DETAILS_URL: &str = "details_url";

/// Environment binding holding the default repository owner.
pub const ENV_OWNER: &str = "GITHUB_OWNER";
/// Environment binding holding the default repository.
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
/// Environment binding holding the default commit SHA.
pub const ENV_COMMIT_SHA: &str = "GITHUB_SHA";
/// Environment binding holding the web host of the GitHub instance.
pub const ENV_SERVER_URL: &str = "GITHUB_SERVER_URL";
/// Environment binding holding the REST API base of the GitHub instance.
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Source of raw action inputs.
///
/// Missing inputs yield an empty string rather than an error.
pub trait InputSource
{
    /// Returns the raw value of the named input, or `""` when absent.
    fn input(&self, name: &str,) -> String;
}

/// Read access to environment bindings.
pub trait Environment
{
    /// Returns the value bound to `name`, or `None` when unset or empty.
    fn var(&self, name: &str,) -> Option<String,>;
}

/// [`Environment`] backed by the current process environment.
#[derive(Debug, Clone, Copy, Default,)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment
{
    fn var(&self, name: &str,) -> Option<String,>
    {
        std::env::var(name,).ok().filter(|value| !value.is_empty(),)
    }
}

impl InputSource for HashMap<String, String,>
{
    fn input(&self, name: &str,) -> String
    {
        self.get(name,).cloned().unwrap_or_default()
    }
}

impl Environment for HashMap<String, String,>
{
    fn var(&self, name: &str,) -> Option<String,>
    {
        self.get(name,).filter(|value| !value.is_empty(),).cloned()
    }
}
