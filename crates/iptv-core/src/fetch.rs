//! Playlist retrieval: HTTP(S) via reqwest, or a local file.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::config::FetchConfig;
use crate::error::FetchError;

/// Where a playlist URL points.
#[derive(Debug, PartialEq, Eq)]
enum Source {
    Http(String),
    File(PathBuf),
}

fn classify(url: &str) -> Source {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Source::Http(url.to_string())
    } else if let Some(path) = url.strip_prefix("file://") {
        Source::File(PathBuf::from(path))
    } else {
        Source::File(PathBuf::from(url))
    }
}

/// Fetch the raw text of a playlist.
///
/// Non-2xx answers are `FetchError::Status`; connection, TLS and timeout
/// failures are `FetchError::Transport`.
pub async fn fetch_text(url: &str, config: &FetchConfig) -> Result<String, FetchError> {
    match classify(url) {
        Source::Http(url) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(config.user_agent.as_str())
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?;
            debug!("fetch: GET {}", url);
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            let text = response.text().await?;
            debug!("fetch: {} bytes from {}", text.len(), url);
            Ok(text)
        }
        Source::File(path) => {
            debug!("fetch: reading {}", path.display());
            Ok(tokio::fs::read_to_string(&path).await?)
        }
    }
}
