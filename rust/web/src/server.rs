use crate::advice::{create_advice_source, AdviceSource};
use crate::errors::handle_rejection;
use crate::handlers;
use crate::tables::{TableId, TableRegistry, DEFAULT_TABLE_TTL};
use seatread_engine::logger::PromptLogger;
use seatread_engine::prompt::SceneBuilder;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::reply::{Reply, Response};
use warp::Filter;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    prompt_log: Option<PathBuf>,
    play_style: Option<String>,
    advice_source: String,
    table_ttl: Duration,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            prompt_log: None,
            play_style: None,
            advice_source: "disabled".to_string(),
            table_ttl: DEFAULT_TABLE_TTL,
        }
    }

    /// Loopback on an ephemeral port, no prompt log.
    pub fn for_tests() -> Self {
        Self::new("127.0.0.1", 0)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_prompt_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_log = Some(path.into());
        self
    }

    pub fn with_play_style(mut self, play_style: impl Into<String>) -> Self {
        self.play_style = Some(play_style.into());
        self
    }

    pub fn with_advice_source(mut self, name: impl Into<String>) -> Self {
        self.advice_source = name.into();
        self
    }

    pub fn with_table_ttl(mut self, ttl: Duration) -> Self {
        self.table_ttl = ttl;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn prompt_log(&self) -> Option<&Path> {
        self.prompt_log.as_deref()
    }

    pub fn play_style(&self) -> Option<&str> {
        self.play_style.as_deref()
    }

    pub fn advice_source(&self) -> &str {
        &self.advice_source
    }

    pub fn table_ttl(&self) -> Duration {
        self.table_ttl
    }
}

/// Shared state handed to every route.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    tables: Arc<TableRegistry>,
    advice: Arc<dyn AdviceSource>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let builder = match config.play_style() {
            Some(style) => SceneBuilder::with_play_style(style),
            None => SceneBuilder::new(),
        };
        let mut tables = TableRegistry::with_builder(builder).with_ttl(config.table_ttl());
        if let Some(path) = config.prompt_log() {
            let logger = PromptLogger::open(path).map_err(|err| {
                ServerError::ConfigError(format!(
                    "cannot open prompt log {}: {err}",
                    path.display()
                ))
            })?;
            tables = tables.with_prompt_log(Arc::new(Mutex::new(logger)));
        }
        let advice = create_advice_source(config.advice_source());

        Ok(Self::new_with_dependencies(
            config,
            Arc::new(tables),
            advice,
        ))
    }

    pub fn new_with_dependencies(
        config: ServerConfig,
        tables: Arc<TableRegistry>,
        advice: Arc<dyn AdviceSource>,
    ) -> Self {
        Self {
            config,
            tables,
            advice,
        }
    }

    pub fn new_for_tests() -> Self {
        Self::new_with_dependencies(
            ServerConfig::for_tests(),
            Arc::new(TableRegistry::new()),
            create_advice_source("disabled"),
        )
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn tables(&self) -> Arc<TableRegistry> {
        Arc::clone(&self.tables)
    }

    pub fn advice(&self) -> Arc<dyn AdviceSource> {
        Arc::clone(&self.advice)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = Self::bind_addr(context.config())?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(%addr, "web server listening");

        let sweep = sweep_expired_tables(context.tables());
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = server_future => {}
                _ = sweep => {}
            }
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(io_err) = err
            .source()
            .and_then(|source| source.downcast_ref::<std::io::Error>())
        {
            return ServerError::BindError(std::io::Error::new(io_err.kind(), io_err.to_string()));
        }

        ServerError::ConfigError(err.to_string())
    }

    /// Every route the server answers, with rejections rendered as JSON.
    pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        Self::health_route(context)
            .or(Self::table_routes(context))
            .unify()
            .recover(handle_rejection)
            .unify()
            .boxed()
    }

    fn health_route(context: &AppContext) -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .and(Self::with_tables(context.tables()))
            .map(|tables: Arc<TableRegistry>| {
                handlers::health(tables.active_tables().len()).into_response()
            })
            .boxed()
    }

    fn table_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let tables = context.tables();

        let create = warp::path!("api" / "tables")
            .and(warp::post())
            .and(Self::with_tables(tables.clone()))
            .and(warp::body::json())
            .and_then(
                |tables: Arc<TableRegistry>, request: handlers::SetupRequest| async move {
                    Ok::<_, Infallible>(handlers::create_table(tables, request).await)
                },
            );

        let setup = warp::path!("api" / "tables" / TableId / "setup")
            .and(warp::post())
            .and(Self::with_tables(tables.clone()))
            .and(warp::body::json())
            .and_then(
                |id: TableId, tables: Arc<TableRegistry>, request: handlers::SetupRequest| async move {
                    Ok::<_, Infallible>(handlers::setup_table(tables, id, request).await)
                },
            );

        let advice = warp::path!("api" / "tables" / TableId / "advice")
            .and(warp::post())
            .and(Self::with_tables(tables.clone()))
            .and(Self::with_advice(context.advice()))
            .and(warp::body::json())
            .and_then(
                |id: TableId,
                 tables: Arc<TableRegistry>,
                 source: Arc<dyn AdviceSource>,
                 request: handlers::AdviceRequest| async move {
                    Ok::<_, Infallible>(handlers::request_advice(tables, source, id, request).await)
                },
            );

        let reset = warp::path!("api" / "tables" / TableId / "reset")
            .and(warp::post())
            .and(Self::with_tables(tables.clone()))
            .and_then(|id: TableId, tables: Arc<TableRegistry>| async move {
                Ok::<_, Infallible>(handlers::reset_table(tables, id).await)
            });

        let status = warp::path!("api" / "tables" / TableId)
            .and(warp::get())
            .and(Self::with_tables(tables.clone()))
            .and_then(|id: TableId, tables: Arc<TableRegistry>| async move {
                Ok::<_, Infallible>(handlers::get_table(tables, id).await)
            });

        let delete = warp::path!("api" / "tables" / TableId)
            .and(warp::delete())
            .and(Self::with_tables(tables))
            .and_then(|id: TableId, tables: Arc<TableRegistry>| async move {
                Ok::<_, Infallible>(handlers::delete_table(tables, id).await)
            });

        create
            .or(setup)
            .unify()
            .or(advice)
            .unify()
            .or(reset)
            .unify()
            .or(status)
            .unify()
            .or(delete)
            .unify()
            .boxed()
    }

    fn with_tables(
        tables: Arc<TableRegistry>,
    ) -> impl Filter<Extract = (Arc<TableRegistry>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&tables))
    }

    fn with_advice(
        advice: Arc<dyn AdviceSource>,
    ) -> impl Filter<Extract = (Arc<dyn AdviceSource>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&advice))
    }
}

// Runs until the server task ends.
async fn sweep_expired_tables(tables: Arc<TableRegistry>) {
    let period = (tables.table_ttl() / 4).max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);
    interval.tick().await;
    loop {
        interval.tick().await;
        let removed = tables.cleanup_expired_tables();
        if removed > 0 {
            tracing::debug!(removed, "expired tables swept");
        }
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        tracing::info!(addr = %self.addr, "web server stopped");
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
