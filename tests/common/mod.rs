//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use content_redirect::config::{AppConfig, TypeMappingConfig};
use content_redirect::http::{HttpServer, RedirectStatus};
use content_redirect::lifecycle::Shutdown;
use content_redirect::store::{FsStore, ResourceStore};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server plus what keeps it alive.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    _root: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Configuration used by the sensor scenarios.
pub fn sensor_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.content_selection.status_code = RedirectStatus::SeeOther;
    config.content_selection.active_paths = Some(vec![r"^/sensor-\d+/".into()]);
    config.content_selection.type_mappings = [
        ("text/html", "html"),
        ("text/csv", "csv"),
        (r"text/(turtle|\*)", "ttl"),
        (r"application/json(.*)", "json"),
        (r"\*/\*", "ttl"),
    ]
    .into_iter()
    .map(|(media_type, extension)| TypeMappingConfig {
        media_type: media_type.into(),
        extension: extension.into(),
    })
    .collect();
    config
}

/// Write the sample documents into a fresh directory.
fn populate() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("index.html"), "<html>home</html>").unwrap();
    std::fs::create_dir(root.path().join("sensor-1")).unwrap();
    std::fs::write(root.path().join("sensor-1/data.html"), "<html>data</html>").unwrap();
    std::fs::write(root.path().join("sensor-1/data.ttl"), "<a> <b> <c> .").unwrap();
    root
}

/// Start a server on an ephemeral port. `base_url` is pointed at it.
pub async fn start_server(mut config: AppConfig) -> TestServer {
    let root = populate();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    config.base_url = format!("http://{}/", addr);
    let store: Arc<dyn ResourceStore> = Arc::new(FsStore::new(root.path()));
    let server = HttpServer::with_store(config, store).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        _root: root,
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
