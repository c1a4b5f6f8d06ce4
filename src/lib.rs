//! Poll an HTTP endpoint with GET until a condition holds.
//!
//! ```no_run
//! use std::time::Duration;
//! use longpoll::domain::{callbacks, PollRequest, Response};
//!
//! # async fn run() {
//! let request = PollRequest::new("http://ci.example.com/builds/1".parse().unwrap());
//! let result = longpoll::poll(
//!     &request,
//!     Duration::from_secs(10),
//!     callbacks(
//!         |r: &Response| r.body.contains("complete"),
//!         |r: Response| r.body,
//!         |e: reqwest::Error| e.to_string(),
//!     ),
//! )
//! .await;
//! # let _ = result;
//! # }
//! ```

use std::time::Duration;

pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;

pub use application::{PollError, Poller};
pub use tokio_util::sync::CancellationToken;

use domain::{PollCallbacks, PollOptions, PollRequest};

/// Polls `request` over HTTP every `interval` until `callbacks` is satisfied
/// or a request fails. There is no attempt cap and no external cancellation,
/// so the only errors are [`PollError::Rejected`].
pub async fn poll<Callbacks>(
    request: &PollRequest,
    interval: Duration,
    callbacks: Callbacks,
) -> Result<Callbacks::Output, PollError<Callbacks::Rejection>>
where
    Callbacks: PollCallbacks<reqwest::Error>,
{
    Poller::http()
        .poll(
            request,
            &PollOptions::every(interval),
            callbacks,
            &CancellationToken::new(),
        )
        .await
}
