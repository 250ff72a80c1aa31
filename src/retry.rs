// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Retry utilities with fibonacci backoff for API calls.
///
/// Operations classify each failure as [`Attempt::Retryable`] or
/// [`Attempt::Fatal`]; only retryable failures are attempted again.
use std::{
    io::{self, Write},
    time::Duration,
};

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::{actions, error::Error};

/// Configuration for retry behavior with fibonacci backoff.
#[derive(Debug, Clone,)]
pub struct RetryConfig
{
    /// Number of re-attempts after the first call (default: 5).
    pub max_retries:   u32,
    /// Base delay of the fibonacci sequence in milliseconds (default: 1000).
    pub base_delay_ms: u64,
}

impl Default for RetryConfig
{
    fn default() -> Self
    {
        Self {
            max_retries: 5, base_delay_ms: 1000,
        }
    }
}

impl RetryConfig
{
    /// Returns a configuration with the given retry bound and default delay.
    pub fn with_max_retries(max_retries: u32,) -> Self
    {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Delays between consecutive attempts: `base * fib(n)` for
    /// `n = 1..=max_retries`, i.e. 1, 1, 2, 3, 5, 8, ... base units.
    pub fn delays(&self,) -> impl Iterator<Item = Duration,> + '_
    {
        let base = self.base_delay_ms;
        std::iter::successors(Some((1u64, 1u64,),), |&(current, next,)| {
            Some((next, current.saturating_add(next,),),)
        },)
        .take(self.max_retries as usize,)
        .map(move |(factor, _,)| Duration::from_millis(base.saturating_mul(factor,),),)
    }
}

/// Outcome classification of a failed attempt.
#[derive(Debug,)]
pub enum Attempt
{
    /// Transient failure; the operation may be attempted again.
    Retryable(Error,),
    /// Terminal failure; retrying cannot help.
    Fatal(Error,),
}

impl Attempt
{
    /// Returns the wrapped error regardless of classification.
    pub fn into_inner(self,) -> Error
    {
        match self {
            Self::Retryable(error,) | Self::Fatal(error,) => error,
        }
    }
}

impl From<Error,> for Attempt
{
    fn from(error: Error,) -> Self
    {
        if error.is_transient() { Self::Retryable(error,) } else { Self::Fatal(error,) }
    }
}

/// Executes an async operation with fibonacci backoff retry logic.
///
/// The operation runs at most `max_retries + 1` times. Each retryable failure
/// is logged and annotated on stdout as an `::error::` workflow command
/// before sleeping.
///
/// # Errors
///
/// Returns the error of a [`Attempt::Fatal`] failure immediately, or the last
/// retryable error once the retry budget is exhausted.
///
/// # Example
///
/// ```no_run
/// use commit_status::retry::{Attempt, RetryConfig, retry_with_backoff};
///
/// # async fn example() -> Result<(), commit_status::Error> {
/// let config = RetryConfig::default();
/// let result = retry_with_backoff(&config, "fetch data", || async {
///     Ok::<_, Attempt,>(42,)
/// },)
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T,>(
    config: &RetryConfig,
    operation_name: &str,
    f: F,
) -> Result<T, Error,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, Attempt,>,>,
{
    retry_with_annotations(config, operation_name, &mut io::stdout(), f,).await
}

/// Same as [`retry_with_backoff`], writing the per-attempt workflow
/// annotations to `annotations`.
///
/// # Errors
///
/// See [`retry_with_backoff`].
pub async fn retry_with_annotations<F, Fut, T, W,>(
    config: &RetryConfig,
    operation_name: &str,
    annotations: &mut W,
    mut f: F,
) -> Result<T, Error,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, Attempt,>,>,
    W: Write,
{
    let attempts = config.max_retries.saturating_add(1,);
    let mut delays = config.delays();
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result,) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result,);
            }
            Err(Attempt::Fatal(error,),) => {
                warn!("{} failed on attempt {} with a fatal error: {}", operation_name, attempt, error);
                return Err(error,);
            }
            Err(Attempt::Retryable(error,),) => {
                let Some(delay,) = delays.next() else {
                    warn!("{} failed after {} attempts: {}", operation_name, attempts, error);
                    return Err(error,);
                };

                let message =
                    format!("{operation_name} failed on attempt {attempt}/{attempts}: {error}");
                warn!("{}. Retrying in {}ms...", message, delay.as_millis());
                actions::write_error(annotations, &message,).ok();

                sleep(delay,).await;
                attempt += 1;
            }
        }
    }
}
