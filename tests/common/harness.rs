//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use warden::config::Config;
use warden::corpus::{Corpus, Passage};
use warden::gateway::{GatewayState, create_router};
use warden::generator::{Generator, MockGenerator};
use warden::pipeline::{AnswerPipeline, PipelineSettings};

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

/// What the spawned server runs with. Unset parts fall back to the sample corpus and the
/// template generator.
#[derive(Clone, Default)]
pub struct TestServerConfig {
    pub config: Config,
    pub corpus: Option<Arc<Corpus>>,
    pub generator: Option<Arc<dyn Generator>>,
}

impl TestServerConfig {
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_corpus(mut self, corpus: Arc<Corpus>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: GatewayState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn mfa_corpus() -> Arc<Corpus> {
    Arc::new(Corpus::from_passages([Passage::new(
        "IT-101",
        "MFA is required for administrative access to all systems.",
    )
    .expect("valid passage")]))
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Spawns a server on an ephemeral port with no external dependencies.
///
/// The pipeline shares the given corpus and generator, so tests can inspect both after
/// making requests.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let corpus = config
        .corpus
        .unwrap_or_else(|| Arc::new(Corpus::from_samples()));
    let generator = config
        .generator
        .unwrap_or_else(|| Arc::new(MockGenerator::new()));

    let pipeline = AnswerPipeline::new(corpus, generator, PipelineSettings::from(&config.config));
    let state = GatewayState::new(Arc::new(pipeline), config.config);

    let app = create_router(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        state,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
