use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "subitize").map(|pd| pd.config_dir().join("config.json"))
    }

    /// Where the log file goes; the terminal itself belongs to the UI.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("subitize");
            Some(state_dir.join("subitize.log"))
        } else {
            ProjectDirs::from("", "", "subitize")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("subitize.log"))
        }
    }
}
