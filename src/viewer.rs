use super::PlotError;
use chrono::prelude::*;
use log::warn;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Displays a chart image once it is written
pub trait Viewer {
    fn show(&self, path: &Path) -> Result<(), PlotError>;
}

/// Opens the image with the desktop's default viewer
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemViewer;

impl Viewer for SystemViewer {
    fn show(&self, path: &Path) -> Result<(), PlotError> {
        let status = opener(path).status().map_err(|source| PlotError::View {
            path: path.to_path_buf(),
            source,
        })?;
        if !status.success() {
            warn!("viewer exited with {} for {}", status, path.display());
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(&["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

/// where a chart goes when it is shown but not saved
pub fn scratch_path(file_name: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    std::env::temp_dir().join(format!("flightlog_plot_{}_{}", stamp, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_in_temp_dir() {
        let p = scratch_path("pitch.png");
        assert!(p.starts_with(std::env::temp_dir()));
        let name = p.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("flightlog_plot_"));
        assert!(name.ends_with("_pitch.png"));
    }
}
