//! `todo` - interactive terminal client for the todo service.
//!
//! ```text
//! todo [--base-url <URL>]
//! ```
//!
//! | Variable       | Default                 | Description        |
//! |----------------|-------------------------|--------------------|
//! | `TODO_API_URL` | `http://localhost:3000` | API base URL       |
//! | `RUST_LOG`     | `warn`                  | Log filter (stderr)|

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_cli::{Shell, Transport};
use todo_core::{TodoApp, TodoClient};

/// Interactive terminal client for the todo service.
#[derive(Debug, Parser)]
#[command(name = "todo", version)]
struct Cli {
    /// Base URL of the todo API.
    #[arg(long, default_value = "http://localhost:3000", env = "TODO_API_URL")]
    base_url: String,
}

impl Cli {
    fn client(&self) -> anyhow::Result<TodoClient> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("base URL must start with http:// or https://, got '{url}'");
        }
        Ok(TodoClient::new(url))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the rendered list.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = cli.client().context("invalid configuration")?;
    info!(base_url = client.base_url(), "starting");

    let shell = Shell::new(TodoApp::new(client));
    todo_cli::run(
        shell,
        Transport::new(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        let cli = Cli::parse_from(["todo"]);
        assert_eq!(cli.base_url, "http://localhost:3000");
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let cli = Cli::parse_from(["todo", "--base-url", "http://10.0.0.5:8080/"]);
        assert_eq!(cli.client().unwrap().base_url(), "http://10.0.0.5:8080");
    }

    #[test]
    fn rejects_non_http_url() {
        let cli = Cli {
            base_url: "localhost:3000".to_string(),
        };
        assert!(cli.client().is_err());
    }
}
