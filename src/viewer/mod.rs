//! Opening a rendered artifact for the user.
//!
//! Headless runs and tests use [`NoopViewer`]; interactive runs use
//! [`SystemViewer`], which hands the file to the platform's default opener.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{Result, UsageError};

/// Something that can show a file to the user.
pub trait ArtifactViewer {
    /// Open `path`.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewer;

impl ArtifactViewer for NoopViewer {
    fn open(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "Viewer disabled, not opening artifact");
        Ok(())
    }
}

/// Opens files with the operating system's default application.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl SystemViewer {
    fn command(path: &Path) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(path);
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
    }
}

impl ArtifactViewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<()> {
        let mut cmd = Self::command(path);
        info!(path = %path.display(), program = ?cmd.get_program(), "Opening artifact");

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| UsageError::ViewerError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

/// Pick a viewer: the system opener when `enabled`, otherwise a no-op.
pub fn viewer_for(enabled: bool) -> Box<dyn ArtifactViewer> {
    if enabled {
        Box::new(SystemViewer)
    } else {
        Box::new(NoopViewer)
    }
}
