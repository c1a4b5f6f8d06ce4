use std::{num::NonZeroU32, time::Duration};

use clap::Parser;
use env_logger::Env;
use log::{error, info};
use tokio::io::AsyncBufReadExt;

use longpoll::application::App;
use longpoll::domain::{self, Condition, Id, PollOptions, PollRequest, Target, Url};
use longpoll::infrastructure::{StaticConfigRepository, TomlConfigRepository};
use longpoll::{CancellationToken, Poller};

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(
        short,
        long,
        help = "Specify the targets file.",
        default_value = "./longpoll.toml"
    )]
    config_path: String,
    #[clap(
        short('t'),
        long("target"),
        conflicts_with = "url",
        help = "Poll only this target id.\nThis can be specified multiple times."
    )]
    targets: Vec<Id>,
    #[clap(long, help = "Poll this URL instead of the targets file.")]
    url: Option<Url>,
    #[clap(
        short('i'),
        long,
        help = "Milliseconds between attempts for --url.",
        default_value_t = 1000
    )]
    interval_ms: u64,
    #[clap(long, help = "Give up on --url after this many attempts.")]
    max_attempts: Option<NonZeroU32>,
    #[clap(long, help = "Stop when --url answers with this status.")]
    status: Option<u16>,
    #[clap(
        long,
        requires = "equals",
        help = "Stop when the JSON value at this pointer equals --equals."
    )]
    pointer: Option<String>,
    #[clap(long, requires = "pointer", help = "Value to compare --pointer with.")]
    equals: Option<String>,
}

impl Args {
    fn ad_hoc_target(&self) -> Option<Target> {
        let url = self.url.clone()?;

        let condition = match (&self.pointer, &self.equals, self.status) {
            (Some(pointer), Some(equals), _) => Condition::Json {
                pointer: pointer.clone(),
                equals: serde_json::from_str(equals)
                    .unwrap_or_else(|_| serde_json::Value::String(equals.clone())),
            },
            (_, _, Some(code)) => Condition::Status { code },
            _ => Condition::default(),
        };

        Some(Target {
            request: PollRequest::new(url),
            options: PollOptions {
                interval: Duration::from_millis(self.interval_ms),
                max_attempts: self.max_attempts,
            },
            condition,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("longpoll=info")).init();

    let cancel = CancellationToken::new();
    spawn_quit_listener(cancel.clone());

    let all_matched = match args.ad_hoc_target() {
        Some(target) => {
            info!("url:         {}", target.request.url);
            info!("interval_ms: {}", args.interval_ms);
            let repo = StaticConfigRepository::single(Id::new(), target);
            run(repo, Vec::new(), cancel).await?
        }
        None => {
            info!("config_path: {}", args.config_path);
            let repo = TomlConfigRepository::new(&args.config_path).await?;
            run(repo, args.targets, cancel).await?
        }
    };

    if !all_matched {
        std::process::exit(1);
    }
    Ok(())
}

async fn run<ConfigRepository>(
    repo: ConfigRepository,
    only: Vec<Id>,
    cancel: CancellationToken,
) -> Result<bool, Box<dyn std::error::Error>>
where
    ConfigRepository: domain::ConfigRepository,
    ConfigRepository::Error: std::error::Error + 'static,
{
    info!("start polling. type `q` and enter to quit.");
    let app = App::new(repo, Poller::http(), cancel).only(only);

    match app.run().await {
        Ok(reports) => Ok(reports.iter().all(|x| x.outcome.is_matched())),
        Err(why) => {
            error!("{why}");
            Err(why.into())
        }
    }
}

/// Cancels every session on `q` from stdin or Ctrl-C.
fn spawn_quit_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            tokio::select! {
                line = lines.next_line() => match line.as_ref().map(|x| x.as_deref()) {
                    Ok(Some("q")) => break,
                    Ok(Some(_)) => (),
                    // stdin closed; keep running until Ctrl-C.
                    Ok(None) | Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        info!("quit.");
        cancel.cancel();
    });
}
