//! Player: one mpv child process per stream.
//!
//! Starting a channel kills whatever was playing and spawns a fresh mpv
//! with the stream URL. mpv's stderr is appended to `mpv-stderr.log` in the
//! data directory.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use iptv_core::config::PlayerConfig;
use iptv_core::platform;
use tracing::{debug, info, warn};

pub struct Player {
    binary: Option<PathBuf>,
    extra_args: Vec<String>,
    volume: u8,
    stderr_path: PathBuf,
    process: Option<tokio::process::Child>,
}

impl Player {
    pub fn new(config: &PlayerConfig, log_dir: PathBuf) -> Self {
        Self {
            binary: config.binary.clone(),
            extra_args: config.extra_args.clone(),
            volume: config.volume.min(100),
            stderr_path: log_dir.join("mpv-stderr.log"),
            process: None,
        }
    }

    fn resolve_binary(&self) -> anyhow::Result<PathBuf> {
        match &self.binary {
            Some(path) => Ok(path.clone()),
            None => platform::find_mpv_binary().context("mpv binary not found"),
        }
    }

    fn args(&self, stream_url: &str, title: &str) -> Vec<String> {
        let mut args = vec![
            "--force-window=immediate".to_string(),
            "--fs".to_string(),
            "--quiet".to_string(),
            format!("--volume={}", self.volume),
            format!("--title={}", title),
        ];
        args.extend(self.extra_args.iter().cloned());
        args.push("--".to_string());
        args.push(stream_url.to_string());
        args
    }

    /// Replace the current stream with `stream_url`.
    pub fn play(&mut self, stream_url: &str, title: &str) -> anyhow::Result<()> {
        self.stop();
        let binary = self.resolve_binary()?;
        let stderr_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.stderr_path)
            .with_context(|| format!("open {}", self.stderr_path.display()))?;

        let child = tokio::process::Command::new(&binary)
            .args(self.args(stream_url, title))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(stderr_file)
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawn {}", binary.display()))?;
        info!("mpv: playing {} (pid {:?})", stream_url, child.id());
        self.process = Some(child);
        Ok(())
    }

    /// Kill the current mpv, if any.
    pub fn stop(&mut self) {
        if let Some(mut child) = self.process.take() {
            debug!("mpv: stopping pid {:?}", child.id());
            if let Err(e) = child.start_kill() {
                warn!("mpv: kill failed: {}", e);
            }
        }
    }

    /// Whether the mpv we started is still running. Reaps it when it exited.
    pub fn process_alive(&mut self) -> bool {
        let Some(child) = self.process.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                match status.code() {
                    Some(code) => info!("mpv exited with code {}", code),
                    None => warn!("mpv terminated by signal"),
                }
                self.process = None;
                false
            }
            Err(e) => {
                warn!("mpv: try_wait failed: {}", e);
                self.process = None;
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.process.is_some()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_end_with_stream() {
        let config = PlayerConfig {
            binary: Some(PathBuf::from("/usr/bin/mpv")),
            extra_args: vec!["--hwdec=auto".to_string()],
            volume: 150,
        };
        let player = Player::new(&config, std::env::temp_dir());
        let args = player.args("http://s/bbc", "BBC");
        assert!(args.contains(&"--volume=100".to_string()));
        assert!(args.contains(&"--hwdec=auto".to_string()));
        assert_eq!(&args[args.len() - 2..], ["--", "http://s/bbc"]);
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlayerConfig {
            binary: Some(dir.path().join("no-such-mpv")),
            ..PlayerConfig::default()
        };
        let mut player = Player::new(&config, dir.path().to_path_buf());
        assert!(player.play("http://s/bbc", "BBC").is_err());
        assert!(!player.is_running());
        assert!(!player.process_alive());
    }
}
