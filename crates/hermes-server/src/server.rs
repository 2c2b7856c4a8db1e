//! Documentation HTTP server implementation.

use std::convert::Infallible;
use std::future::Future;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info, Instrument};

use hermes_telemetry::{log_request_complete, log_request_error};

use crate::error::{ErrorResponse, ServerError, ServerResult};
use crate::settings::ServerSettings;

const JSON_CONTENT_TYPE: &str = "application/json";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Serves the generated JSON document and a viewer page.
///
/// The artifact is read from disk on every request, so a concurrent
/// `generate` run is picked up without a restart.
#[derive(Debug, Clone)]
pub struct DocsServer {
    settings: Arc<ServerSettings>,
}

impl DocsServer {
    /// Create a server from validated settings.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if the settings are invalid.
    pub fn new(settings: ServerSettings) -> ServerResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings: Arc::new(settings),
        })
    }

    /// Server settings.
    #[must_use]
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Bind the configured address.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Bind` if the socket cannot be bound.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        let addr = self.settings.addr();
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Run until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn run(self) -> ServerResult<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn run_until<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()>,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Accept connections on `listener` until `shutdown` completes.
    ///
    /// Connections already accepted keep running on their own tasks.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Io` if the listener's local address is unavailable.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;
        info!(
            addr = %local_addr,
            spec = %self.settings.spec_route(),
            docs = %self.settings.docs_route(),
            artifact = %self.settings.artifact().display(),
            "Hermes documentation server listening"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutting down documentation server");
                    return Ok(());
                }
                accepted = listener.accept() => {
                    let (stream, peer_addr) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            error!(error = %e, "Failed to accept connection");
                            continue;
                        }
                    };

                    let settings = Arc::clone(&self.settings);

                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);

                        let service = service_fn(move |req| {
                            let settings = Arc::clone(&settings);
                            async move {
                                Ok::<_, Infallible>(handle_request(req, &settings, peer_addr).await)
                            }
                        });

                        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                            debug!(error = %e, "Connection error");
                        }
                    });
                }
            }
        }
    }
}

/// Handle an incoming request.
async fn handle_request(
    req: Request<Incoming>,
    settings: &ServerSettings,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        method = %method,
        path = %path,
        peer = %peer_addr,
    );

    async move {
        let response = route(settings, &method, &path).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        log_request_complete!(method, path, response.status().as_u16(), duration_ms);
        response
    }
    .instrument(span)
    .await
}

/// Dispatch a request by method and path.
pub(crate) async fn route(
    settings: &ServerSettings,
    method: &Method,
    path: &str,
) -> Response<Full<Bytes>> {
    if path == settings.spec_route() {
        if method != Method::GET {
            return method_not_allowed(method, path);
        }
        return serve_artifact(settings, method, path).await;
    }

    if path == settings.docs_route() {
        if method != Method::GET {
            return method_not_allowed(method, path);
        }
        return response(
            StatusCode::OK,
            HTML_CONTENT_TYPE,
            Bytes::from(settings.page()),
        );
    }

    error_response(StatusCode::NOT_FOUND, &format!("no route for {path}"))
}

async fn serve_artifact(
    settings: &ServerSettings,
    method: &Method,
    path: &str,
) -> Response<Full<Bytes>> {
    match tokio::fs::read(settings.artifact()).await {
        Ok(contents) => response(StatusCode::OK, JSON_CONTENT_TYPE, Bytes::from(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => error_response(
            StatusCode::NOT_FOUND,
            &format!(
                "OpenAPI document not generated yet: {}",
                settings.artifact().display()
            ),
        ),
        Err(e) => {
            log_request_error!(method, path, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to read OpenAPI document",
            )
        }
    }
}

fn method_not_allowed(method: &Method, path: &str) -> Response<Full<Bytes>> {
    let mut response = error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("{method} not allowed on {path}"),
    );
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static("GET"));
    response
}

/// Create a response with a static content type.
fn response(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Create a JSON response.
fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    response(status, JSON_CONTENT_TYPE, Bytes::from(json))
}

/// Create an error response.
fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let error = ErrorResponse::new(status.canonical_reason().unwrap_or("error"), message);
    json_response(status, &error)
}
