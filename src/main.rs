//! Console driver for the advising dialog engine.
//!
//! Stands in for the voice transport: each line of stdin is one turn,
//! resolved locally against the active candidate lists. Configure the
//! catalog endpoint with `CAMPUS_ADVISOR__CATALOG__BASE_URL`.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing::error;
use tracing_subscriber::EnvFilter;

use campus_advisor::adapters::catalog::HttpCatalogClient;
use campus_advisor::adapters::notifier::LoggingNotifier;
use campus_advisor::adapters::session::InMemorySessionStore;
use campus_advisor::application::DialogService;
use campus_advisor::config::AppConfig;
use campus_advisor::domain::dialog::TurnRequest;
use campus_advisor::domain::foundation::{RequestId, SessionId};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(code) = run().await {
        std::process::exit(code);
    }
}

async fn run() -> Result<(), i32> {
    let config = AppConfig::load().map_err(|err| {
        error!(error = %err, "configuration loading failed");
        1
    })?;
    config.validate().map_err(|err| {
        error!(error = %err, "configuration is invalid");
        1
    })?;

    let catalog = HttpCatalogClient::new(config.catalog).map_err(|err| {
        error!(error = %err, "catalog client construction failed");
        1
    })?;

    let service = DialogService::new(
        Arc::new(catalog),
        Arc::new(LoggingNotifier::new()),
        Arc::new(InMemorySessionStore::new()),
    );

    let session_id = SessionId::new();
    let response = service.launch(&session_id).await.map_err(|err| {
        error!(error = %err, "session launch failed");
        1
    })?;
    speak(&response.speech);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        let request = TurnRequest::free_form(RequestId::random(), utterance);
        match service.handle_turn(&session_id, &request).await {
            Ok(response) => {
                if let Some(ack) = &response.acknowledgment {
                    speak(&ack.speech);
                }
                speak(&response.speech);
                if response.end_session {
                    break;
                }
            }
            Err(err) => {
                error!(error = %err, "turn failed");
                return Err(1);
            }
        }
    }

    Ok(())
}

fn speak(text: &str) {
    println!("{}", text);
    let _ = io::stdout().flush();
}
