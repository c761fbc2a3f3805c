//! Viewer that delegates to the OS file association resolver

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{FileViewer, ViewerError};

/// Opens files with `xdg-open`, `open` or `cmd /C start`
pub struct SystemViewer {
    program: String,
    leading_args: Vec<String>,
}

impl SystemViewer {
    /// Viewer for the current host OS
    pub fn new() -> Self {
        if cfg!(target_os = "macos") {
            Self::with_command("open", &[])
        } else if cfg!(target_os = "windows") {
            Self::with_command("cmd", &["/C", "start", ""])
        } else {
            Self::with_command("xdg-open", &[])
        }
    }

    /// Viewer running `program [leading_args..] <path>`
    pub fn with_command(program: impl Into<String>, leading_args: &[&str]) -> Self {
        Self {
            program: program.into(),
            leading_args: leading_args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileViewer for SystemViewer {
    async fn open(&self, uri: &str, media_type: &str) -> Result<(), ViewerError> {
        let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
        if !path.exists() {
            return Err(ViewerError::NotFound(uri.to_string()));
        }

        let status = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ViewerError::OpenFailed(format!("{} not found", self.program))
                } else {
                    ViewerError::OpenFailed(e.to_string())
                }
            })?;

        if !status.success() {
            log::debug!("{} exited with status: {}", self.program, status);
            return Err(ViewerError::NoHandler {
                media_type: media_type.to_string(),
            });
        }

        Ok(())
    }
}
