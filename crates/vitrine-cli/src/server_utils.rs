use axum::{body::Body, http::Uri, response::Response};
use colored::Colorize;
use local_ip_address::local_ip;
use std::{net::SocketAddr, path::Path, time::Duration};
use tower_http::trace::OnResponse;
use tracing::{info, Span};

use crate::logging::{format_elapsed_time, FormatElapsedTimeOptions};

pub fn log_server_start(start_time: std::time::Instant, host: bool, addr: SocketAddr, root: &Path) {
    info!(name: "SKIP_FORMAT", "");
    let elapsed_time = format_elapsed_time(start_time.elapsed(), &FormatElapsedTimeOptions::startup());
    info!(name: "SKIP_FORMAT", "{} {}", "Vitrine 🖼".bold().bright_cyan(), format!("server started in {}", elapsed_time));
    info!(name: "SKIP_FORMAT", "");

    let port = addr.port();
    let url = format!("\x1b]8;;http://localhost:{port}\x1b\\http://localhost:{port}\x1b]8;;\x1b\\")
        .bold()
        .underline()
        .bright_blue();
    let network_url = if host {
        match local_ip() {
            Ok(local_ip) => format!(
                "\x1b]8;;http://{local_ip}:{port}\x1b\\http://{local_ip}:{port}\x1b]8;;\x1b\\"
            )
            .bold()
            .underline()
            .bright_magenta(),
            Err(_) => "Could not determine the local network address".dimmed(),
        }
    } else {
        "Use --host to expose the server to your network".dimmed()
    };
    info!(name: "SKIP_FORMAT", "🮔  {}    {}", "Local".bold(), url);
    info!(name: "SKIP_FORMAT", "🮔  {}  {}", "Network".bold(), network_url);
    info!(name: "SKIP_FORMAT", "🮔  {}   {}", "Folder".bold(), root.display().to_string().dimmed());
    info!(name: "SKIP_FORMAT", "");

    info!(name: "server", "{}", "waiting for requests, press CTRL+C to stop".dimmed());
}

#[derive(Clone, Debug)]
pub struct CustomOnResponse;

impl OnResponse<Body> for CustomOnResponse {
    fn on_response(self, response: &Response<Body>, latency: Duration, _span: &Span) {
        let status = response.status();

        // Skip informational responses
        if status.is_informational() {
            return;
        }

        let status = if status.is_server_error() {
            status.to_string().red()
        } else if status.is_client_error() {
            status.to_string().yellow()
        } else {
            status.to_string().green()
        };

        // The handler stores the request URI on the response
        let uri = response
            .extensions()
            .get::<Uri>()
            .unwrap_or(&Uri::default())
            .to_string()
            .bold();

        let latency = format_elapsed_time(latency, &FormatElapsedTimeOptions::default());

        info!(name: "", "{} {} {}", status, uri, latency);
    }
}
