//! A real HTTP JWKS endpoint on 127.0.0.1 for key-source tests.

use std::net::TcpListener;
use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Clone)]
struct ServerState {
    document: Arc<Mutex<Value>>,
    status: Arc<AtomicU16>,
    delay_ms: Arc<AtomicU64>,
    hits: Arc<AtomicUsize>,
}

async fn serve_jwks(state: web::Data<ServerState>) -> HttpResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
    }

    let status = StatusCode::from_u16(state.status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let document = state.document.lock().clone();

    HttpResponse::build(status).json(document)
}

/// Serves a mutable JWKS document at `/jwks.json` and counts requests.
/// Must be started inside an actix system (`#[actix_web::test]`).
pub struct JwksServer {
    pub url: String,
    state: ServerState,
    handle: ServerHandle,
}

impl JwksServer {
    pub fn start(document: Value) -> Self {
        let state = ServerState {
            document: Arc::new(Mutex::new(document)),
            status: Arc::new(AtomicU16::new(200)),
            delay_ms: Arc::new(AtomicU64::new(0)),
            hits: Arc::new(AtomicUsize::new(0)),
        };

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind jwks listener");
        let port = listener.local_addr().expect("listener addr").port();

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(app_state.clone()))
                .route("/jwks.json", web::get().to(serve_jwks))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("listen jwks server")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            url: format!("http://127.0.0.1:{port}/jwks.json"),
            state,
            handle,
        }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn set_document(&self, document: Value) {
        *self.state.document.lock() = document;
    }

    pub fn set_status(&self, status: u16) {
        self.state.status.store(status, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        self.state
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
