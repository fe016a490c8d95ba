//! Shared fixtures for tests that talk to an in-process HTTP server.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ClientConfig;
use crate::net::client::ApiClient;
use crate::net::session::{MemoryTokenStore, Session, TokenStore};

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub(crate) async fn serve(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub(crate) fn client_with_store(base_url: &str, store: Arc<dyn TokenStore>) -> ApiClient {
    let config = ClientConfig { base_url: base_url.to_owned(), ..ClientConfig::default() };
    ApiClient::new(&config, store).unwrap()
}

/// Client logged in with access `a1` and refresh `r1`.
pub(crate) fn logged_in_client(base_url: &str) -> ApiClient {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_session(Session::new("a1", "r1")));
    client_with_store(base_url, store)
}

/// Log lines captured by [`capture_logs`].
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route this thread's `tracing` events into a buffer until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so spawned handlers
/// log into the same buffer.
pub(crate) fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
