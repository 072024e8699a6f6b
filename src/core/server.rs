use crate::config::ServerConfig;
use crate::core::browser::{schedule_browser_open, BrowserOpenResult, DelayedAction};
use crate::core::file_check::{check_project_files, FileChecklist};
use crate::core::port_selector::{select_port, PortPlan, PortSelection};
use crate::domain::model::ServerPhase;
use crate::domain::ports::BrowserLauncher;
use crate::utils::error::{DevToolsError, Result};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCategory {
    Get,
    Post,
    NotFound,
    Other,
}

impl RequestCategory {
    /// 依序比對 GET、POST、404，第一個出現的子字串決定分類
    pub fn classify(line: &str) -> Self {
        if line.contains("GET") {
            RequestCategory::Get
        } else if line.contains("POST") {
            RequestCategory::Post
        } else if line.contains("404") {
            RequestCategory::NotFound
        } else {
            RequestCategory::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLogEntry {
    pub timestamp: String,
    pub line: String,
    pub category: RequestCategory,
}

impl RequestLogEntry {
    pub fn new(line: String) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            category: RequestCategory::classify(&line),
            line,
        }
    }
}

pub type RequestLogger = Arc<dyn Fn(&RequestLogEntry) + Send + Sync>;

async fn log_requests(
    State(logger): State<RequestLogger>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let response = next.run(request).await;

    let line = format!(
        "\"{} {} {:?}\" {}",
        method,
        uri,
        version,
        response.status().as_u16()
    );
    (*logger)(&RequestLogEntry::new(line));
    response
}

/// 靜態檔案服務，所有回應 (含錯誤) 都帶 CORS 標頭
pub fn build_router(root: &Path, logger: RequestLogger) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(middleware::from_fn_with_state(logger, log_requests))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

/// 低號埠沒有權限時給出專屬錯誤，其餘一律視為伺服器錯誤
pub fn bind_error(addr: SocketAddr, e: std::io::Error) -> DevToolsError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        DevToolsError::PermissionDenied { port: addr.port() }
    } else {
        DevToolsError::ServerError {
            message: format!("failed to bind {}: {}", addr, e),
        }
    }
}

#[derive(Debug)]
pub struct BoundServer {
    listener: tokio::net::TcpListener,
    addr: SocketAddr,
    root: PathBuf,
}

impl BoundServer {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }
}

/// 開發伺服器的啟動流程，每一步都對應一個 `ServerPhase`
pub struct DevServer {
    config: ServerConfig,
    phase: ServerPhase,
}

impl DevServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            phase: ServerPhase::NotStarted,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn phase(&self) -> ServerPhase {
        self.phase
    }

    fn transition(&mut self, next: ServerPhase) {
        if !self.phase.can_transition_to(next) {
            tracing::warn!("Unexpected server phase change {:?} -> {:?}", self.phase, next);
        }
        tracing::debug!("Server phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    fn abort<T>(&mut self, error: DevToolsError) -> Result<T> {
        self.transition(ServerPhase::Aborted);
        Err(error)
    }

    pub fn check_files(&mut self) -> Result<FileChecklist> {
        self.transition(ServerPhase::CheckingFiles);
        match check_project_files(&self.config) {
            Ok(checklist) => Ok(checklist),
            Err(e) => self.abort(e),
        }
    }

    pub fn select_port(&mut self) -> Result<PortSelection> {
        match select_port(&PortPlan::from_config(&self.config)) {
            Ok(selection) => {
                self.transition(ServerPhase::PortSelected);
                Ok(selection)
            }
            Err(e) => self.abort(e),
        }
    }

    pub async fn bind(&mut self, port: u16) -> Result<BoundServer> {
        let requested = SocketAddr::new(self.config.host, port);

        let listener = match tokio::net::TcpListener::bind(requested).await {
            Ok(listener) => listener,
            Err(e) => return self.abort(bind_error(requested, e)),
        };
        let addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(e) => return self.abort(DevToolsError::IoError(e)),
        };

        self.transition(ServerPhase::Bound);
        tracing::info!("Listening on {}", addr);

        Ok(BoundServer {
            listener,
            addr,
            root: self.config.root_dir(),
        })
    }

    /// 設定關閉自動開啟時回傳 None
    pub fn schedule_browser<F>(
        &self,
        bound: &BoundServer,
        launcher: Arc<dyn BrowserLauncher>,
        on_result: F,
    ) -> Option<DelayedAction>
    where
        F: FnOnce(&str, &BrowserOpenResult) + Send + 'static,
    {
        if !self.config.open_browser {
            tracing::debug!("Browser auto-open disabled");
            return None;
        }

        Some(schedule_browser_open(
            launcher,
            self.config.game_url(bound.port()),
            self.config.browser_delay(),
            on_result,
        ))
    }

    /// 阻塞直到 `shutdown` 完成
    pub async fn serve<F>(
        &mut self,
        bound: BoundServer,
        logger: RequestLogger,
        shutdown: F,
    ) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = build_router(&bound.root, logger);
        self.transition(ServerPhase::Serving);

        let served = axum::serve(bound.listener, router)
            .with_graceful_shutdown(shutdown)
            .await;

        match served {
            Ok(()) => {
                self.transition(ServerPhase::Stopped);
                Ok(())
            }
            Err(e) => self.abort(DevToolsError::ServerError {
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(
            RequestCategory::classify("\"GET /index.html HTTP/1.1\" 200"),
            RequestCategory::Get
        );
        assert_eq!(
            RequestCategory::classify("\"POST /api HTTP/1.1\" 405"),
            RequestCategory::Post
        );
        // GET 優先於 404
        assert_eq!(
            RequestCategory::classify("\"GET /missing.png HTTP/1.1\" 404"),
            RequestCategory::Get
        );
        assert_eq!(
            RequestCategory::classify("\"PUT /x HTTP/1.1\" 404"),
            RequestCategory::NotFound
        );
        assert_eq!(
            RequestCategory::classify("\"OPTIONS / HTTP/1.1\" 405"),
            RequestCategory::Other
        );
    }

    #[test]
    fn test_log_entry_timestamp_format() {
        let entry = RequestLogEntry::new("\"GET / HTTP/1.1\" 200".to_string());
        assert_eq!(entry.timestamp.len(), 8);
        assert_eq!(entry.timestamp.matches(':').count(), 2);
        assert_eq!(entry.category, RequestCategory::Get);
    }

    #[test]
    fn test_missing_entry_aborts_before_port_selection() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut server = DevServer::new(ServerConfig {
            project_root: Some(temp_dir.path().to_path_buf()),
            ..ServerConfig::default()
        });

        assert!(server.check_files().is_err());
        assert_eq!(server.phase(), ServerPhase::Aborted);
    }

    #[test]
    fn test_bind_permission_denied_maps_to_fatal_error() {
        let addr: SocketAddr = "127.0.0.1:80".parse().unwrap();
        let err = bind_error(
            addr,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        assert!(matches!(err, DevToolsError::PermissionDenied { port: 80 }));
        assert_ne!(err.exit_code(), 0);
        assert!(err.recovery_suggestion().contains("port"));
    }

    #[test]
    fn test_bind_other_failures_map_to_server_error() {
        let addr: SocketAddr = "127.0.0.1:8000".parse().unwrap();
        let err = bind_error(
            addr,
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        );

        match err {
            DevToolsError::ServerError { message } => assert!(message.contains("127.0.0.1:8000")),
            other => panic!("expected ServerError, got {:?}", other),
        }
    }
}
