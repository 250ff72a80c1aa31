// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Required-field validation with aggregated reporting.
//!
//! Every rule is evaluated before returning so a single run reports the full
//! set of missing fields. Owner, repository and commit are not checked here:
//! their absence already aborts resolution when the environment has no
//! default for them.

use crate::{config::StatusConfig, error::Error};

/// Violation reported when no credential was supplied.
pub const CREDENTIAL_REQUIRED: &str = "credential is a required field";
/// Violation reported when no state was supplied.
pub const STATE_REQUIRED: &str = "state is a required field";

/// Ordered collection of validation failures.
#[derive(Debug, Default, Clone, PartialEq, Eq,)]
pub struct Violations
{
    messages: Vec<&'static str,>,
}

impl Violations
{
    /// Records `message` when `violated` holds.
    pub fn check(&mut self, violated: bool, message: &'static str,)
    {
        if violated {
            self.messages.push(message,);
        }
    }

    /// Collapses the collected violations into a single result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] whose message joins every violation with
    /// `", "` in the order they were recorded.
    pub fn into_result(self,) -> Result<(), Error,>
    {
        if self.messages.is_empty() {
            return Ok((),);
        }

        Err(Error::validation(self.messages.join(", ",),),)
    }
}

/// Checks the required fields of a resolved configuration.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every empty required field,
/// credential first and state second.
///
/// # Examples
///
/// ```
/// use commit_status::{StatusConfig, validate};
///
/// let config = StatusConfig::default();
/// let error = validate(&config,).unwrap_err();
/// assert_eq!(
///     error.to_string(),
///     "credential is a required field, state is a required field"
/// );
/// ```
pub fn validate(config: &StatusConfig,) -> Result<(), Error,>
{
    let mut violations = Violations::default();
    violations.check(config.token.is_empty(), CREDENTIAL_REQUIRED,);
    violations.check(config.state.is_none(), STATE_REQUIRED,);
    violations.into_result()
}
