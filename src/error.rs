#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the commit-status crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Variants fall into four groups: configuration errors (unsupported state,
//! missing environment defaults), aggregated validation errors, transient
//! service errors raised by the remote API, and response-contract errors.
//! Only service errors are ever retried.

/// Unified error type returned by input resolution and status publication.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The supplied state is not one of the accepted values or aliases.
    #[error("state value not supported: {value}")]
    UnsupportedState {
        /// Raw value rejected by the normalizer.
        value: String
    },
    /// No owner input was provided and the environment has no default.
    #[error("GITHUB_OWNER environment variable not set")]
    MissingOwner,
    /// No repository input was provided and the environment has no default.
    #[error("GITHUB_REPOSITORY environment variable not set")]
    MissingRepository,
    /// No commit input was provided and the environment has no default.
    #[error("GITHUB_SHA environment variable not set")]
    MissingCommit,
    /// One or more required fields are empty.
    ///
    /// The message lists every violation joined with `", "`.
    #[error("{message}")]
    Validation {
        /// Joined violation messages in the order they were checked.
        message: String
    },
    /// The GitHub client could not be constructed.
    #[error("failed to initialize GitHub client: {message}")]
    Client {
        /// Human readable message describing the failure.
        message: String
    },
    /// Transport or service errors returned by the status API.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    },
    /// The status API answered successfully but without a status identifier.
    #[error("status ID missing from GitHub response")]
    EmptyStatusId
}

impl Error {
    /// Constructs a validation error from the provided message.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a service error from the provided message.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Returns `true` when the failure is a transient service fault that may
    /// succeed on another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}
