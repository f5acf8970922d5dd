use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::Response,
    Router,
};
use maud::html;
use percent_encoding::percent_decode_str;
use tokio::{fs, net::TcpSocket};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{debug, error, Level};

use crate::consts::DEFAULT_DOCUMENT;
use crate::server_utils::{log_server_start, CustomOnResponse};

#[derive(Clone)]
struct ServerState {
    root: Arc<PathBuf>,
}

pub async fn start_static_server(
    root: PathBuf,
    port: u16,
    host: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    let root = fs::canonicalize(&root).await.map_err(|err| {
        format!("Cannot serve {}: {}", root.display(), err)
    })?;

    // --host binds every interface, otherwise only localhost
    let addr = if host {
        IpAddr::from([0, 0, 0, 0])
    } else {
        IpAddr::from([127, 0, 0, 1])
    };

    let socket = TcpSocket::new_v4()?;
    let _ = socket.set_reuseaddr(true);
    socket.bind(SocketAddr::new(addr, port))?;
    let listener = socket.listen(1024)?;
    let local_addr = listener.local_addr()?;

    debug!("listening on {}", local_addr);

    let router = router(root.clone());

    log_server_start(start_time, host, local_addr, &root);

    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}

/// Every request, whatever its path, is answered from `root`.
pub fn router(root: PathBuf) -> Router {
    Router::new()
        .fallback(handle_request)
        .with_state(ServerState {
            root: Arc::new(root),
        })
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(CustomOnResponse),
        )
}

async fn handle_request(State(state): State<ServerState>, method: Method, uri: Uri) -> Response {
    let mut response = if method == Method::OPTIONS {
        preflight()
    } else {
        serve_path(&state.root, uri.path()).await
    };

    response.extensions_mut().insert(uri);
    response
}

/// Maps a decoded request path to a `/`-separated path relative to the served directory.
///
/// `.` segments are dropped and `..` segments remove the previous one. Returns `None` if the path would end up outside
/// of the directory, or contains anything that isn't a plain file name (drive prefixes, NUL bytes, ...). Hidden files
/// and directories, like the stored preferences, are refused too.
pub fn resolve_request_path(decoded: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            segment => {
                let mut components = Path::new(segment).components();
                let is_plain = matches!(
                    (components.next(), components.next()),
                    (Some(Component::Normal(_)), None)
                );

                if !is_plain || segment.contains('\0') || segment.starts_with('.') {
                    return None;
                }

                segments.push(segment);
            }
        }
    }

    if segments.is_empty() {
        return Some(DEFAULT_DOCUMENT.to_string());
    }

    Some(segments.join("/"))
}

pub fn content_type_for(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

pub async fn serve_path(root: &Path, raw_path: &str) -> Response {
    let Ok(decoded) = percent_decode_str(raw_path).decode_utf8() else {
        return respond(StatusCode::BAD_REQUEST, Some("text/html"), "<h1>400 - Requête invalide</h1>");
    };

    // Checked before touching the filesystem
    let Some(relative) = resolve_request_path(&decoded) else {
        return respond(StatusCode::FORBIDDEN, Some("text/html"), "<h1>403 - Accès interdit</h1>");
    };

    let path = relative
        .split('/')
        .fold(root.to_path_buf(), |path, segment| path.join(segment));

    match fs::read(&path).await {
        Ok(content) => respond(StatusCode::OK, Some(content_type_for(&relative)), content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            error!(name: "server", "file not found: {}", relative);
            let body = html! {
                h1 { "404 - Fichier non trouvé" }
                p { "Chemin: " (relative) }
            };
            respond(StatusCode::NOT_FOUND, Some("text/html"), body.into_string())
        }
        Err(err) => {
            error!(name: "server", "failed to read {}: {}", relative, err);
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
                format!("Erreur serveur: {}", error_code(&err)),
            )
        }
    }
}

fn error_code(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => format!("{:?} (os error {})", err.kind(), code),
        None => format!("{:?}", err.kind()),
    }
}

fn preflight() -> Response {
    let mut response = respond(StatusCode::OK, None, Body::empty());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Every response allows any origin.
fn respond(status: StatusCode, content_type: Option<&'static str>, body: impl Into<Body>) -> Response {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    if let Some(content_type) = content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    response
}
