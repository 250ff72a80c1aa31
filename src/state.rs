// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Canonical commit states accepted by the GitHub status API.
//!
//! Workflow conclusions use a wider vocabulary than the status API. The
//! normalizer collapses the extra values into the closest canonical state:
//! cancelled and skipped runs are reported as `error` because GitHub has no
//! native "cancelled" status.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the four lifecycle states accepted by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,)]
#[serde(rename_all = "lowercase")]
pub enum CommitState
{
    /// The run could not complete.
    Error,
    /// The run completed with failures.
    Failure,
    /// The run is still in progress.
    Pending,
    /// The run completed successfully.
    Success,
}

impl CommitState
{
    /// Returns the lowercase wire representation of the state.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::Error => "error",
            Self::Failure => "failure",
            Self::Pending => "pending",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for CommitState
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

impl FromStr for CommitState
{
    type Err = Error;

    fn from_str(raw: &str,) -> Result<Self, Self::Err,>
    {
        normalize(raw,)
    }
}

/// Maps a raw state string to its canonical [`CommitState`].
///
/// Canonical values pass through unchanged, while `cancel`, `cancelled` and
/// `skipped` map to [`CommitState::Error`]. Matching is exact.
///
/// # Errors
///
/// Returns [`Error::UnsupportedState`] carrying the raw value for anything
/// else, including the empty string.
///
/// # Examples
///
/// ```
/// use commit_status::{CommitState, normalize};
///
/// assert_eq!(normalize("success",)?, CommitState::Success);
/// assert_eq!(normalize("cancelled",)?, CommitState::Error);
/// assert!(normalize("done",).is_err());
/// # Ok::<(), commit_status::Error>(())
/// ```
pub fn normalize(raw: &str,) -> Result<CommitState, Error,>
{
    match raw {
        "error" | "cancel" | "cancelled" | "skipped" => Ok(CommitState::Error,),
        "failure" => Ok(CommitState::Failure,),
        "pending" => Ok(CommitState::Pending,),
        "success" => Ok(CommitState::Success,),
        other => Err(Error::UnsupportedState {
            value: other.to_owned(),
        },),
    }
}

#[cfg(test)]
mod tests
{
    use proptest::prelude::*;

    use super::{CommitState, normalize};
    use crate::Error;

    const CANONICAL: &[&str] = &["error", "failure", "pending", "success"];
    const ALIASES: &[&str] = &["cancel", "cancelled", "skipped"];

    #[test]
    fn canonical_values_pass_through()
    {
        for raw in CANONICAL {
            let state = normalize(raw,).expect("canonical state",);
            assert_eq!(state.as_str(), *raw);
        }
    }

    #[test]
    fn cancelled_and_skipped_become_error()
    {
        for raw in ALIASES {
            assert_eq!(normalize(raw,).expect("alias",), CommitState::Error);
        }
    }

    #[test]
    fn unknown_value_is_rejected_with_value()
    {
        match normalize("foo",) {
            Err(Error::UnsupportedState {
                value,
            },) => assert_eq!(value, "foo"),
            other => panic!("expected unsupported state, got {other:?}"),
        }
    }

    #[test]
    fn matching_is_case_sensitive()
    {
        assert!(normalize("Success",).is_err());
        assert!(normalize(" success",).is_err());
        assert!(normalize("",).is_err());
    }

    #[test]
    fn display_and_serde_use_lowercase()
    {
        assert_eq!(CommitState::Pending.to_string(), "pending");
        let json = serde_json::to_string(&CommitState::Failure,).expect("serialize",);
        assert_eq!(json, "\"failure\"");
    }

    #[test]
    fn from_str_delegates_to_normalize()
    {
        let state: CommitState = "skipped".parse().expect("alias parses",);
        assert_eq!(state, CommitState::Error);
    }

    proptest! {
        #[test]
        fn anything_else_is_unsupported(raw in "[a-zA-Z_ -]{0,16}") {
            prop_assume!(!CANONICAL.contains(&raw.as_str()) && !ALIASES.contains(&raw.as_str()));
            let rejected = matches!(
                normalize(&raw),
                Err(Error::UnsupportedState { ref value }) if *value == raw
            );
            prop_assert!(rejected, "{raw:?} was not rejected");
        }
    }
}
