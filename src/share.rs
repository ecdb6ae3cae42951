//! Sharing photos through the platform opener.

use std::ffi::OsStr;
use std::io;

use async_trait::async_trait;
use thiserror::Error;

/// Mime type handed to the share surface for journal photos.
pub const SHARE_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Failed to launch the share handler: {0}")]
    Launch(#[from] io::Error),

    #[error("Share handler exited with status {status}")]
    Failed { status: i32 },
}

/// A surface that can hand a photo to the platform's share flow.
#[async_trait]
pub trait ShareSurface: Send + Sync {
    /// Whether sharing is available on this system at all.
    async fn is_available(&self) -> bool;

    /// Hand the resource at `uri` to the share flow.
    async fn share(&self, uri: &str, mime: &str) -> Result<(), ShareError>;
}

/// Shares by launching the platform opener on the locator.
#[derive(Debug, Default)]
pub struct SystemShare;

fn opener_binary() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "cmd.exe"
    } else {
        "xdg-open"
    }
}

fn opener_args(uri: &str) -> Vec<String> {
    if cfg!(target_os = "windows") {
        // `start` treats the first quoted argument as a window title.
        vec!["/C".into(), "start".into(), String::new(), uri.into()]
    } else {
        vec![uri.to_string()]
    }
}

/// Check whether `binary` resolves through the given PATH value.
fn find_in_path(binary: &str, path_var: &OsStr) -> bool {
    std::env::split_paths(path_var).any(|dir| dir.join(binary).is_file())
}

#[async_trait]
impl ShareSurface for SystemShare {
    async fn is_available(&self) -> bool {
        match std::env::var_os("PATH") {
            Some(path) => find_in_path(opener_binary(), &path),
            None => false,
        }
    }

    async fn share(&self, uri: &str, mime: &str) -> Result<(), ShareError> {
        tracing::debug!(uri = %uri, mime = %mime, "Launching share handler");
        let status = tokio::process::Command::new(opener_binary())
            .args(opener_args(uri))
            .status()
            .await?;

        if !status.success() {
            return Err(ShareError::Failed {
                status: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}
