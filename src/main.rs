use crate::app::App;
use crate::classifier::GeminiClient;
use crate::config::AppConfig;
use crate::db::tickets::count_tickets;
use crate::db::{init_db, Database};
use crate::privacy::PrivacyFilter;
use crate::router::handle;
use astra::Server;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod classifier;
mod config;
mod db;
mod domain;
mod errors;
mod ingress;
mod privacy;
mod responses;
mod router;
mod templates;


fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1️⃣ Configuration
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Database
    let db = Database::new(&config.database_path);
    if let Err(e) = init_db(&db) {
        tracing::error!("database initialization failed: {e}");
        std::process::exit(1);
    }
    match db.with_conn(|conn| count_tickets(conn)) {
        Ok(n) => tracing::info!(tickets = n, "ticket store ready"),
        Err(e) => tracing::warn!("could not count tickets: {e}"),
    }

    if let Err(e) = std::fs::create_dir_all(&config.scratch_dir) {
        tracing::error!(dir = %config.scratch_dir.display(), "cannot create audio scratch dir: {e}");
        std::process::exit(1);
    }

    // 3️⃣ Classifier
    let classifier = match GeminiClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("classifier client setup failed: {e}");
            std::process::exit(1);
        }
    };

    let app = App {
        db,
        classifier: Box::new(classifier),
        privacy: PrivacyFilter::new(config.classify_mode),
        scratch_dir: config.scratch_dir.clone(),
        max_upload_bytes: config.max_upload_bytes,
    };

    // 4️⃣ Serve
    let addr = config.socket_addr();
    tracing::info!(
        %addr,
        model = %config.model,
        mode = %config.classify_mode,
        workers = config.max_workers,
        "starting server"
    );

    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let resp = match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(error = %err, "request failed");
                responses::html_error_response(&err)
            }
        };
        tracing::info!(%method, %path, status = resp.status().as_u16(), "request");
        resp
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }

    tracing::info!("server shut down cleanly");
}
