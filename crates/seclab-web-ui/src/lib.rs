mod cookies;
mod error;
mod layout;
mod routes;
mod util;

use std::future::Future;
use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr as _;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderName, HeaderValue, Method};
use seclab_core::{AccessGate, SessionStore};
use snafu::{ResultExt as _, Snafu};
use tokio::net::{TcpListener, TcpSocket};
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tower_cookies::CookieManagerLayer;
use tower_http::CompressionLevel;
use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::SizeAbove;
use tower_http::cors::CorsLayer;
use tracing::info;

pub const LOG_TARGET: &str = "seclab::web-ui";

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Clone, Debug, bon::Builder)]
pub struct Opts {
    #[builder(into, default = DEFAULT_LISTEN.to_owned())]
    pub listen: String,
    pub cors_origin: Option<String>,
    #[builder(default)]
    pub reuseport: bool,
}

/// State shared by all request handlers.
///
/// Owns the one and only [`SessionStore`] of the process, so the set of
/// valid session keys lives exactly as long as the server does.
pub struct UiState {
    sessions: SessionStore,
    gate: AccessGate,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new(),
            gate: AccessGate::VALUE_24,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

pub type SharedState = Arc<UiState>;

pub struct Server {
    listener: TcpListener,

    state: SharedState,
    opts: Opts,
}

#[derive(Debug, Snafu)]
pub enum WebUiServerError {
    #[snafu(transparent)]
    IO {
        source: io::Error,
    },

    ListenAddr {
        source: AddrParseError,
    },

    #[snafu(display("Invalid CORS origin {origin:?}"))]
    Cors {
        origin: String,
        source: InvalidHeaderValue,
    },

    Join {
        source: JoinError,
    },
}

pub type ServerResult<T> = std::result::Result<T, WebUiServerError>;

impl Server {
    pub async fn init(opts: Opts) -> ServerResult<Server> {
        let listener = Self::get_listener(&opts).await?;
        let state = Arc::new(UiState::new());

        info!(target: LOG_TARGET, addr = %listener.local_addr()?, "Listening");
        Ok(Self {
            listener,
            state,
            opts,
        })
    }

    pub async fn get_listener(opts: &Opts) -> ServerResult<TcpListener> {
        let socket = {
            let addr = SocketAddr::from_str(&opts.listen).context(ListenAddrSnafu)?;

            let socket = if addr.is_ipv4() {
                TcpSocket::new_v4()?
            } else {
                TcpSocket::new_v6()?
            };
            if opts.reuseport {
                #[cfg(unix)]
                socket.set_reuseport(true)?;
            }
            socket.set_nodelay(true)?;

            socket.bind(addr)?;

            socket
        };

        Ok(socket.listen(1024)?)
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> ServerResult<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listen = self.addr()?;
        let router = Router::new()
            .merge(routes::route_handler(self.state.clone()))
            .layer(CookieManagerLayer::new())
            .layer(cors_layer(&self.opts, listen)?)
            .layer(compression_layer());

        info!(target: LOG_TARGET, "Starting server");
        axum::serve(
            self.listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        info!(target: LOG_TARGET, "Server stopped");
        Ok(())
    }
}

/// A [`Server`] running in a background task.
pub struct UiServer {
    addr: SocketAddr,
    state: SharedState,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<ServerResult<()>>,
}

/// Bind and start serving in the background.
pub async fn start_ui(opts: Opts) -> ServerResult<UiServer> {
    let server = Server::init(opts).await?;
    let addr = server.addr()?;
    let state = server.state().clone();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(server.run_until(async move {
        // A dropped sender means the handle is gone; stop as well.
        let _ = shutdown_rx.await;
    }));

    Ok(UiServer {
        addr,
        state,
        shutdown_tx,
        task,
    })
}

impl UiServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub async fn shutdown(self) -> ServerResult<()> {
        let _ = self.shutdown_tx.send(());
        self.task.await.context(JoinSnafu)?
    }
}

fn compression_layer() -> CompressionLayer<SizeAbove> {
    CompressionLayer::new()
        .quality(CompressionLevel::Precise(4))
        .compress_when(SizeAbove::new(512))
}

fn cors_layer(opts: &Opts, listen: SocketAddr) -> ServerResult<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_credentials(true)
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            HeaderName::from_static(routes::interceptor::DEMO_HEADER),
        ])
        .max_age(Duration::from_secs(86400))
        .allow_origin(opts.cors_origin(listen)?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::HEAD]))
}

impl Opts {
    pub fn cors_origin(&self, listen: SocketAddr) -> ServerResult<HeaderValue> {
        let origin = self
            .cors_origin
            .clone()
            .unwrap_or_else(|| format!("http://{listen}"));
        HeaderValue::from_str(&origin).context(CorsSnafu { origin })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_can_cross_tasks() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<WebUiServerError>();
    }

    #[test]
    fn cors_origin_defaults_to_listen_address() {
        let origin = Opts::builder()
            .build()
            .cors_origin("127.0.0.1:3000".parse().unwrap())
            .unwrap();
        assert_eq!(origin, "http://127.0.0.1:3000");
    }

    #[test]
    fn invalid_cors_origin_is_reported() {
        let err = Opts::builder()
            .cors_origin("http://lab.local\n".to_owned())
            .build()
            .cors_origin("127.0.0.1:3000".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, WebUiServerError::Cors { .. }), "{err}");
    }

    #[test_log::test(tokio::test)]
    async fn started_server_shuts_down_cleanly() {
        let server = start_ui(Opts::builder().listen("127.0.0.1:0").build())
            .await
            .unwrap();
        assert_ne!(server.local_addr().port(), 0);
        server.shutdown().await.unwrap();
    }
}
