use std::{collections::HashMap, pin::Pin, sync::Arc};

use futures_util::Stream;
use tokio_util::sync::CancellationToken;

use crate::application::session::{run_session, PollError};
use crate::domain::{self, Id, PollCallbacks, PollOptions, PollRequest};
use crate::infrastructure::{HttpTransport, TokioSleeper};

/// One entry of [`Poller::poll_multiple`].
#[derive(Debug, Clone)]
pub struct Session<Callbacks> {
    pub request: PollRequest,
    pub options: PollOptions,
    pub callbacks: Callbacks,
}

pub type PollStream<Output, Rejection> =
    Pin<Box<dyn Stream<Item = (Id, Result<Output, PollError<Rejection>>)> + Send>>;

/// Runs poll sessions over a shared transport and timer.
///
/// Sessions never share state with each other; only the transport (and its
/// connection pool) is reused.
#[derive(Debug)]
pub struct Poller<Transport, Sleeper> {
    transport: Arc<Transport>,
    sleeper: Arc<Sleeper>,
}

impl<Transport, Sleeper> Clone for Poller<Transport, Sleeper> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            sleeper: self.sleeper.clone(),
        }
    }
}

impl Poller<HttpTransport, TokioSleeper> {
    pub fn http() -> Self {
        Self::new(HttpTransport::new(), TokioSleeper)
    }
}

impl<Transport, Sleeper> Poller<Transport, Sleeper>
where
    Transport: domain::Transport + Send + Sync + 'static,
    Sleeper: domain::Sleeper + Send + Sync + 'static,
{
    pub fn new(transport: Transport, sleeper: Sleeper) -> Self {
        Self {
            transport: Arc::new(transport),
            sleeper: Arc::new(sleeper),
        }
    }

    pub async fn poll<Callbacks>(
        &self,
        request: &PollRequest,
        options: &PollOptions,
        callbacks: Callbacks,
        cancel: &CancellationToken,
    ) -> Result<Callbacks::Output, PollError<Callbacks::Rejection>>
    where
        Callbacks: PollCallbacks<Transport::Error>,
    {
        run_session(
            self.transport.as_ref(),
            self.sleeper.as_ref(),
            request,
            options,
            callbacks,
            cancel,
        )
        .await
    }

    /// Starts every session concurrently and yields results in the order the
    /// sessions finish. Each session gets a child of `cancel`; dropping the
    /// stream cancels the sessions that have not finished yet.
    pub fn poll_multiple<Callbacks>(
        &self,
        sessions: HashMap<Id, Session<Callbacks>>,
        cancel: &CancellationToken,
    ) -> PollStream<Callbacks::Output, Callbacks::Rejection>
    where
        Callbacks: PollCallbacks<Transport::Error> + Send + 'static,
        Callbacks::Output: Send + 'static,
        Callbacks::Rejection: Send + 'static,
    {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let stream_cancel = cancel.child_token();

        for (id, session) in sessions.into_iter() {
            let poller = self.clone();
            let cancel = stream_cancel.child_token();
            let tx = tx.clone();
            tokio::spawn(async move {
                let Session {
                    request,
                    options,
                    callbacks,
                } = session;
                let result = poller.poll(&request, &options, callbacks, &cancel).await;
                let _ = tx.send((id, result));
            });
        }
        drop(tx);

        let guard = stream_cancel.drop_guard();
        Box::pin(async_stream::stream! {
            let _guard = guard;
            while let Some(x) = rx.recv().await {
                yield x
            }
        })
    }
}
