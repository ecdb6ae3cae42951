use std::path::PathBuf;

/// Application configuration derived from the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub album_name: String,
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        Self {
            data_dir: expand_tilde(&cli.data_dir),
            album_name: cli.album.clone(),
        }
    }

    /// Path of the record store database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("journal.db")
    }

    /// Root of the media library.
    pub fn media_dir(&self) -> PathBuf {
        self.data_dir.join("media")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    #[test]
    fn test_expand_tilde_with_home() {
        let result = expand_tilde("~/Documents");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(result, home.join("Documents"));
        }
    }

    #[test]
    fn test_expand_tilde_no_prefix() {
        assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
        assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
    }

    #[test]
    fn test_from_cli_defaults() {
        let cli = crate::cli::Cli::try_parse_from(["camnotes", "list"]).unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.album_name, "Camera Notes");
        assert!(config.db_path().ends_with("journal.db"));
        assert!(config.media_dir().ends_with("media"));
    }

    #[test]
    fn test_from_cli_overrides() {
        let cli = crate::cli::Cli::try_parse_from([
            "camnotes",
            "--data-dir",
            "/tmp/cn",
            "--album",
            "Trips",
            "list",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cn"));
        assert_eq!(config.album_name, "Trips");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/cn/journal.db"));
    }
}
