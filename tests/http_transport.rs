use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{extract::Query, extract::State, http::StatusCode, routing::get, Router};

use longpoll::domain::{callbacks, PollRequest, Response, Transport, Url};
use longpoll::infrastructure::HttpTransport;
use longpoll::PollError;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn url(addr: SocketAddr, path: &str) -> Url {
    format!("http://{addr}{path}").parse().unwrap()
}

/// A job that reports `running` until it has been asked `ready_after` times.
fn job_server(ready_after: usize) -> (Router, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/job",
            get(move |State(hits): State<Arc<AtomicUsize>>| async move {
                let n = hits.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= ready_after {
                    r#"{"status":"complete"}"#
                } else {
                    r#"{"status":"running"}"#
                }
            }),
        )
        .with_state(hits.clone());
    (app, hits)
}

#[tokio::test]
async fn sends_query_parameters() {
    let app = Router::new().route(
        "/echo",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let mut pairs: Vec<_> = params.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
            pairs.sort();
            pairs.join("&")
        }),
    );
    let addr = serve(app).await;

    let request = PollRequest::new(url(addr, "/echo"))
        .with_param("page", "2")
        .with_param("state", "done");
    let response = HttpTransport::new().get(&request).await.unwrap();

    assert_eq!(response, Response::new(200, "page=2&state=done"));
}

#[tokio::test]
async fn non_success_status_is_a_response() {
    let app = Router::new().route(
        "/busy",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
    );
    let addr = serve(app).await;

    let response = HttpTransport::new()
        .get(&PollRequest::new(url(addr, "/busy")))
        .await
        .unwrap();

    assert_eq!(response.status, 503);
    assert!(!response.is_success());
    assert_eq!(response.text(), "try later");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = HttpTransport::new()
        .get(&PollRequest::new(url(addr, "/")))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn polls_until_the_job_completes() {
    let (app, hits) = job_server(3);
    let addr = serve(app).await;

    let result = longpoll::poll(
        &PollRequest::new(url(addr, "/job")),
        Duration::from_millis(10),
        callbacks(
            |r: &Response| r.body.contains("complete"),
            |r: Response| r.body,
            |e: reqwest::Error| e.to_string(),
        ),
    )
    .await;

    assert_eq!(result, Ok(r#"{"status":"complete"}"#.to_owned()));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn first_satisfying_response_ends_the_poll() {
    let (app, hits) = job_server(1);
    let addr = serve(app).await;

    let result = longpoll::poll(
        &PollRequest::new(url(addr, "/job")),
        Duration::ZERO,
        callbacks(
            |r: &Response| r.body.contains("complete"),
            |r: Response| r.status,
            |e: reqwest::Error| e.to_string(),
        ),
    )
    .await;

    assert_eq!(result, Ok(200));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transport_error_is_handed_to_on_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = longpoll::poll(
        &PollRequest::new(url(addr, "/job")),
        Duration::from_millis(10),
        callbacks(
            |_: &Response| true,
            |_: Response| (),
            |e: reqwest::Error| e.is_connect(),
        ),
    )
    .await;

    assert_eq!(result, Err(PollError::Rejected(true)));
}
