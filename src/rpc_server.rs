//! raindrop-search RPC Server — JSON-RPC over stdin/stdout for launcher hosts.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"search.set", "params":{"collection":"all","search":"#rust"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//! Events:   {"event":"ready"|"toast"|"results", ...} pushed without a request.

use std::sync::Arc;
use std::time::Instant;

use raindrop_search::app::App;
use raindrop_search::logging;
use raindrop_search::rpc_handler::handle_method;
use raindrop_search::services::notifier::ChannelNotifier;
use raindrop_search::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

/// Overrides the settings file location.
const CONFIG_ENV_VAR: &str = "RAINDROP_SEARCH_CONFIG";

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(out: &mpsc::UnboundedSender<String>, message: Value) {
    if out.send(message.to_string()).is_err() {
        debug!("stdout writer closed");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings_engine = SettingsEngine::new(std::env::var(CONFIG_ENV_VAR).ok());
    let settings = settings_engine.load()?;
    logging::init(settings.logging.debug);
    info!(config = %settings_engine.get_config_path(), "starting rpc server");

    let token = settings_engine.resolve_token()?;
    let (toast_tx, mut toast_rx) = mpsc::unbounded_channel();
    let app = App::new(settings_engine, &token, Arc::new(ChannelNotifier::new(toast_tx)))?;
    let mut revisions = app.fetcher.subscribe();
    let app = Arc::new(Mutex::new(app));

    // Single writer so responses and events never interleave mid-line.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = out_rx.recv().await {
            let written = async {
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await
            };
            if let Err(e) = written.await {
                error!(error = %e, "failed to write to stdout");
                break;
            }
        }
    });

    let toast_out = out_tx.clone();
    let toasts = tokio::spawn(async move {
        while let Some(toast) = toast_rx.recv().await {
            emit(
                &toast_out,
                json!({"event": "toast", "style": toast.style, "title": toast.title, "message": toast.message}),
            );
        }
    });

    let results_out = out_tx.clone();
    let results_app = app.clone();
    let results = tokio::spawn(async move {
        while revisions.changed().await.is_ok() {
            let view = results_app.lock().await.results_view();
            match serde_json::to_value(view) {
                Ok(Value::Object(mut fields)) => {
                    fields.insert("event".to_string(), json!("results"));
                    emit(&results_out, Value::Object(fields));
                }
                Ok(_) => {}
                Err(e) => error!(error = %e, "failed to encode results"),
            }
        }
    });

    emit(&out_tx, json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    app.lock().await.startup().await;

    // Max 200 RPC requests per second
    let mut rate_limiter = RateLimiter::new(200);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&out_tx, json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            emit(&out_tx, json!({"id": id, "error": "rate limit exceeded"}));
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        emit(&out_tx, response);
    }

    info!("stdin closed, shutting down");
    toasts.abort();
    results.abort();
    drop(out_tx);
    let _ = writer.await;
    Ok(())
}
