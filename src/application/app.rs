use std::collections::HashMap;

use futures_util::StreamExt;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::application::poller::{Poller, Session};
use crate::application::session::PollError;
use crate::domain::{self, Condition, Id, PollCallbacks, Response, Timestamp};

/// Polls every configured target concurrently and reports how each ended.
pub struct App<ConfigRepository, Transport, Sleeper> {
    config_repo: ConfigRepository,
    poller: Poller<Transport, Sleeper>,
    only: Vec<Id>,
    cancel: CancellationToken,
}

impl<ConfigRepository, Transport, Sleeper> App<ConfigRepository, Transport, Sleeper>
where
    ConfigRepository: domain::ConfigRepository,
    Transport: domain::Transport + Send + Sync + 'static,
    Sleeper: domain::Sleeper + Send + Sync + 'static,

    ConfigRepository::Error: std::error::Error,
{
    pub fn new(
        config_repo: ConfigRepository,
        poller: Poller<Transport, Sleeper>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config_repo,
            poller,
            only: Vec::new(),
            cancel,
        }
    }

    /// Restricts the run to the given target ids. Empty means all.
    pub fn only(mut self, ids: Vec<Id>) -> Self {
        self.only = ids;
        self
    }

    pub async fn run(self) -> Result<Vec<Report>, Error<ConfigRepository::Error>> {
        let Self {
            mut config_repo,
            poller,
            only,
            cancel,
        } = self;

        let mut targets = config_repo
            .get_all()
            .await
            .map_err(Error::ConfigRepositoryError)?;
        if !only.is_empty() {
            targets.retain(|id, _| only.contains(id));
        }
        if targets.is_empty() {
            return Err(Error::NoTargets);
        }

        for (id, target) in targets.iter() {
            info!(
                "[{id}]: polling {} every {:?}.",
                target.request.url, target.options.interval
            );
        }

        let sessions: HashMap<_, _> = targets
            .into_iter()
            .map(|(id, target)| {
                let session = Session {
                    request: target.request,
                    options: target.options,
                    callbacks: TargetCallbacks {
                        condition: target.condition,
                    },
                };
                (id, session)
            })
            .collect();

        let poll_stream = poller.poll_multiple(sessions, &cancel);
        tokio::pin!(poll_stream);

        let mut reports = Vec::new();
        while let Some((id, result)) = poll_stream.next().await {
            let outcome = match result {
                Ok(matched) => {
                    info!(
                        "[{id}]: {} (status {})",
                        ansi_term::Color::Fixed(15).bold().paint("condition met."),
                        matched.status
                    );
                    Outcome::Matched(matched)
                }
                Err(PollError::Rejected(why)) => {
                    warn!("[{id}]: {why}");
                    Outcome::Failed(why)
                }
                Err(PollError::Cancelled { attempts }) => {
                    warn!("[{id}]: cancelled after {attempts} attempt(s).");
                    Outcome::Cancelled { attempts }
                }
                Err(PollError::Exhausted { attempts }) => {
                    warn!(
                        "[{id}]: {}",
                        ansi_term::Color::Fixed(8)
                            .paint(format!("gave up after {attempts} attempt(s)."))
                    );
                    Outcome::Exhausted { attempts }
                }
            };
            reports.push(Report { id, outcome });
        }

        reports.sort_by(|a, b| a.id.cmp(&b.id));
        for report in reports.iter() {
            let style = if report.outcome.is_matched() {
                ansi_term::Color::Fixed(15).bold()
            } else {
                ansi_term::Color::Fixed(8).normal()
            };
            info!("[{}]: {}", report.id, style.paint(report.outcome.to_string()));
        }

        Ok(reports)
    }
}

struct TargetCallbacks {
    condition: Condition,
}

impl<E: std::error::Error> PollCallbacks<E> for TargetCallbacks {
    type Output = Matched;
    type Rejection = String;

    fn is_condition_met(&mut self, response: &Response) -> bool {
        self.condition.is_met(response)
    }

    fn on_condition_met(&mut self, response: Response) -> Matched {
        Matched {
            status: response.status,
            finished_at: Timestamp::now(),
        }
    }

    fn on_error(&mut self, error: E) -> String {
        error.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub status: u16,
    pub finished_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Matched(Matched),
    Failed(String),
    Cancelled { attempts: u32 },
    Exhausted { attempts: u32 },
}
impl Outcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched(_))
    }
}
impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Matched(m) => f.write_fmt(format_args!(
                "matched at {} (status {})",
                m.finished_at, m.status
            )),
            Outcome::Failed(why) => f.write_fmt(format_args!("failed: {why}")),
            Outcome::Cancelled { attempts } => {
                f.write_fmt(format_args!("cancelled after {attempts} attempt(s)"))
            }
            Outcome::Exhausted { attempts } => {
                f.write_fmt(format_args!("gave up after {attempts} attempt(s)"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: Id,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error<ConfigRepositoryError>
where
    ConfigRepositoryError: std::error::Error,
{
    ConfigRepositoryError(ConfigRepositoryError),
    NoTargets,
}
impl<ConfigRepositoryError> std::fmt::Display for Error<ConfigRepositoryError>
where
    ConfigRepositoryError: std::error::Error,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::ConfigRepositoryError(e) => {
                f.write_fmt(format_args!("failed to load the targets: {e}"))
            }
            Error::NoTargets => f.write_str("no targets to poll."),
        }
    }
}

impl<ConfigRepositoryError> std::error::Error for Error<ConfigRepositoryError> where
    ConfigRepositoryError: std::error::Error
{
}
