use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "test-backend-cli")]
#[command(about = "Command-line client for the test backend user API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service liveness
    Health,
    /// Show service metadata and uptime
    Info,
    /// List all users
    List,
    /// Fetch a single user
    Get {
        /// User ID
        id: String,
    },
    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/healthz", base)).send().await?,
        Commands::Info => client.get(format!("{}/info", base)).send().await?,
        Commands::List => client.get(format!("{}/users", base)).send().await?,
        Commands::Get { id } => client.get(format!("{}/users/{}", base, id)).send().await?,
        Commands::Create { name, role } => {
            client
                .post(format!("{}/users", base))
                .json(&json!({ "name": name, "role": role }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
