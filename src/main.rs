//! Log Endpoint
//!
//! An authenticated HTTP front for Cloud Logging queries.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                  LOG ENDPOINT                     │
//!                     │                                                   │
//!   POST /query-logs  │  ┌──────────┐   ┌──────────┐   ┌──────────────┐  │
//!   ──────────────────┼─▶│ security │──▶│  http    │──▶│    query     │  │
//!                     │  │ x-api-key│   │ handler  │   │   engine     │  │
//!                     │  └──────────┘   └──────────┘   └──────┬───────┘  │
//!                     │                                       │          │
//!                     │                                       ▼          │
//!   JSON envelope     │  ┌──────────┐                  ┌──────────────┐  │     Cloud
//!   ◀─────────────────┼──│ response │◀─────────────────│   backend    │◀─┼──── Logging
//!                     │  │ envelope │                  │ entries:list │  │     API
//!                     │  └──────────┘                  └──────────────┘  │
//!                     │                                                   │
//!                     │   config · observability · lifecycle              │
//!                     └──────────────────────────────────────────────────┘
//! ```

use log_endpoint::lifecycle::startup;

#[tokio::main]
async fn main() {
    if let Err(e) = startup::run().await {
        tracing::error!(error = %e, "Fatal startup error");
        eprintln!("log-endpoint: {e}");
        std::process::exit(1);
    }
}
