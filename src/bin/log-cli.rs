use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "log-cli")]
#[command(about = "Command-line client for the Log Endpoint service", long_about = None)]
struct Cli {
    #[arg(short, long, env = "LOG_ENDPOINT_URL", default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "LOG_ENDPOINT_API_KEY", default_value = "")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query recent logs for a service
    Query {
        /// Cloud Run service name
        #[arg(short, long)]
        service: String,
        /// Extra Cloud Logging filter, e.g. 'severity>=ERROR'
        #[arg(short, long)]
        filter: Option<String>,
        /// Maximum number of entries
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show the usage guide
    Help,
    /// Check service status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Query {
            service,
            filter,
            limit,
        } => {
            let mut headers = HeaderMap::new();
            let mut key = HeaderValue::from_str(&cli.key)?;
            key.set_sensitive(true);
            headers.insert("x-api-key", key);

            let mut body = json!({ "service": service });
            if let Some(filter) = filter {
                body["filter"] = json!(filter);
            }
            if let Some(limit) = limit {
                body["limit"] = json!(limit);
            }

            client
                .post(format!("{base}/query-logs"))
                .headers(headers)
                .json(&body)
                .send()
                .await?
        }
        Commands::Help => client.get(format!("{base}/help")).send().await?,
        Commands::Status => client.get(format!("{base}/")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let is_markdown = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/markdown"));
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: Log Endpoint returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }

    if is_markdown {
        println!("{text}");
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
