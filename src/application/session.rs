use std::fmt::Display;

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::domain::{PollCallbacks, PollOptions, PollRequest, Sleeper, Transport};

/// Runs one poll session to completion.
///
/// Requests are strictly sequential: the next GET is issued only after the
/// previous response was evaluated and `options.interval` has elapsed. A
/// transport error ends the session through `callbacks.on_error` without a
/// retry. `cancel` is honored both while a request is in flight and while
/// waiting; a response that arrives after cancellation is dropped unevaluated.
pub async fn run_session<T, S, C>(
    transport: &T,
    sleeper: &S,
    request: &PollRequest,
    options: &PollOptions,
    mut callbacks: C,
    cancel: &CancellationToken,
) -> Result<C::Output, PollError<C::Rejection>>
where
    T: Transport + ?Sized,
    S: Sleeper + ?Sized,
    C: PollCallbacks<T::Error>,
{
    let url = &request.url;
    let mut attempts: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            warn!("[{url}]: cancelled after {attempts} attempt(s).");
            return Err(PollError::Cancelled { attempts });
        }
        attempts = next_attempt(attempts);
        debug!("[{url}]: attempt {attempts}");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = transport.get(request) => Some(result),
        };
        let result = match result {
            Some(x) if !cancel.is_cancelled() => x,
            _ => {
                warn!("[{url}]: cancelled after {attempts} attempt(s).");
                return Err(PollError::Cancelled { attempts });
            }
        };

        let response = match result {
            Ok(x) => x,
            Err(why) => {
                warn!("[{url}]: {why}");
                return Err(PollError::Rejected(callbacks.on_error(why)));
            }
        };

        if callbacks.is_condition_met(&response) {
            info!("[{url}]: condition met after {attempts} attempt(s).");
            return Ok(callbacks.on_condition_met(response));
        }

        if let Some(max) = options.max_attempts {
            if max.get() <= attempts {
                warn!("[{url}]: condition not met after {attempts} attempt(s).");
                return Err(PollError::Exhausted { attempts });
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("[{url}]: cancelled after {attempts} attempt(s).");
                return Err(PollError::Cancelled { attempts });
            }
            _ = sleeper.sleep(options.interval) => (),
        }
    }
}

/// Counts attempts without overflowing on sessions that never end.
fn next_attempt(attempts: u32) -> u32 {
    attempts.saturating_add(1)
}

/// Why a session ended without its condition being met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollError<E> {
    /// The transport failed; carries what `on_error` made of it.
    Rejected(E),
    Cancelled { attempts: u32 },
    Exhausted { attempts: u32 },
}
impl<E> PollError<E> {
    pub fn rejection(self) -> Option<E> {
        match self {
            PollError::Rejected(e) => Some(e),
            _ => None,
        }
    }
}
impl<E: Display> Display for PollError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollError::Rejected(e) => f.write_fmt(format_args!("failed to poll: {e}")),
            PollError::Cancelled { attempts } => {
                f.write_fmt(format_args!("cancelled after {attempts} attempt(s)."))
            }
            PollError::Exhausted { attempts } => f.write_fmt(format_args!(
                "condition not met after {attempts} attempt(s)."
            )),
        }
    }
}
impl<E: std::fmt::Debug + Display> std::error::Error for PollError<E> {}
