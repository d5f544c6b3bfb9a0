//! Shared helper utilities for client integration tests.
//!
//! Integration tests compile as separate crates under `client/tests/`. This
//! module hosts a loopback actix-web server that answers each request with the
//! next scripted response and records what the client sent, so the reqwest
//! adapters can be exercised without external services.

#![expect(dead_code, reason = "each test crate uses a different subset")]

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::Mutex;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use reqwest::Url;

/// One request as received by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Value of the first header called `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body decoded as JSON.
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }

    /// Decoded query pairs, in the order they were sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .into_owned()
            .collect()
    }

    /// Request path without its query string.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Canned reply for one request.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    status: u16,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

impl ScriptedResponse {
    /// JSON reply with `status`.
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.into(),
            delay: None,
        }
    }

    /// Plain-text reply with `status`.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            content_type: "text/plain",
            ..Self::json(status, body)
        }
    }

    /// Hold the reply back for `delay` after the request arrives.
    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn into_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status).expect("scripted status is valid");
        HttpResponse::build(status)
            .content_type(self.content_type)
            .body(self.body)
    }
}

struct Script {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

async fn scripted_reply(
    request: HttpRequest,
    body: web::Bytes,
    script: web::Data<Script>,
) -> HttpResponse {
    let recorded = RecordedRequest {
        method: request.method().as_str().to_owned(),
        path: request.path().to_owned(),
        query: request.query_string().to_owned(),
        headers: request
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    value.to_str().unwrap_or_default().to_owned(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    script
        .requests
        .lock()
        .expect("requests mutex")
        .push(recorded);

    let next = script
        .responses
        .lock()
        .expect("responses mutex")
        .pop_front();
    let Some(response) = next else {
        return HttpResponse::InternalServerError().body("script exhausted");
    };
    if let Some(delay) = response.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    response.into_response()
}

/// Running server bound to a loopback port.
///
/// Must be started from inside a Tokio runtime; the server task runs on that
/// runtime until the value is dropped.
pub struct ScriptedServer {
    base_url: Url,
    script: web::Data<Script>,
    handle: ServerHandle,
}

impl ScriptedServer {
    /// Start answering requests with `responses`, one per request.
    pub fn start(responses: Vec<ScriptedResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        let script = web::Data::new(Script {
            responses: Mutex::new(responses.into()),
            requests: Mutex::default(),
        });

        let data = script.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(scripted_reply))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on loopback")
        .run();
        let handle = server.handle();
        tokio::spawn(server);

        Self {
            base_url: Url::parse(&format!("http://{address}/")).expect("loopback URL"),
            script,
            handle,
        }
    }

    /// Root URL, with a trailing slash.
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// `path` resolved against the root URL.
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("scripted URL joins")
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script
            .requests
            .lock()
            .expect("requests mutex")
            .clone()
    }
}

impl Drop for ScriptedServer {
    fn drop(&mut self) {
        // Stop is signalled eagerly; the returned future only awaits completion.
        drop(self.handle.stop(false));
    }
}

/// URL of a loopback port with nothing listening on it.
pub fn refused_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let address = listener.local_addr().expect("listener address");
    drop(listener);
    Url::parse(&format!("http://{address}/")).expect("loopback URL")
}
