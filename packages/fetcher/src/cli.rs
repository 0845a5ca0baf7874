//! Command-line interface for the fetcher.

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::DEFAULT_PROXY_BASE_URL;
use crate::error::Result;
use crate::fetcher::Fetcher;

/// Logic Auditor Fetch - Print the readable text of an article.
#[derive(Parser)]
#[command(name = "logic-audit-fetch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Article URL (non-URL input is echoed back unchanged)
    pub url: String,

    /// Reader proxy base URL
    #[arg(long, default_value = DEFAULT_PROXY_BASE_URL)]
    pub proxy: String,

    /// Truncate the printed text to this many characters
    #[arg(long)]
    pub max_chars: Option<usize>,
}

/// Run the CLI.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    fetch_command(&cli).await
}

async fn fetch_command(cli: &Cli) -> Result<()> {
    let fetcher = Fetcher::new()?.with_proxy_base_url(&cli.proxy);

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Fetching {}", cli.url));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = fetcher.fetch_text(&cli.url).await;
    pb.finish_and_clear();
    let text = result?;

    let output = truncate_chars(&text, cli.max_chars);
    eprintln!(
        "{} {} characters",
        style("Fetched").green().bold(),
        style(text.chars().count()).cyan()
    );
    println!("{output}");
    Ok(())
}

fn truncate_chars(text: &str, max_chars: Option<usize>) -> &str {
    match max_chars.and_then(|max| text.char_indices().nth(max)) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
