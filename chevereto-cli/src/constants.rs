// ABOUTME: Centralized constants for the Chevereto CLI application
// ABOUTME: Contains environment variable names, config paths, UI timings and sample image settings

/// Environment variables that override config file values
pub mod env {
    pub const UPLOAD_URL: &str = "CHEVERETO_UPLOAD_URL";
    pub const API_KEY: &str = "CHEVERETO_API_KEY";
}

/// Config file locations
pub mod paths {
    /// Directory name under the user config directory
    pub const CONFIG_DIR: &str = "chevereto";

    /// File name inside the config directory
    pub const CONFIG_FILE: &str = "config.toml";

    /// Project-local config file in the working directory
    pub const PROJECT_CONFIG_FILE: &str = "chevereto.toml";
}

/// Timing for terminal feedback
pub mod timeouts {
    /// Spinner tick interval while probing mirrors
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// Generated sample image used by `test` when no file is given
pub mod sample {
    pub const WIDTH: u32 = 64;
    pub const HEIGHT: u32 = 64;
    pub const FILE_NAME: &str = "sample.png";
}

/// UI and formatting constants
pub mod ui {
    /// Longest error detail shown in table cells before truncating
    pub const MAX_DETAIL_WIDTH: usize = 60;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_names() {
        assert_eq!(env::UPLOAD_URL, "CHEVERETO_UPLOAD_URL");
        assert_eq!(env::API_KEY, "CHEVERETO_API_KEY");
    }

    #[test]
    fn test_paths() {
        assert!(paths::CONFIG_FILE.ends_with(".toml"));
        assert!(paths::PROJECT_CONFIG_FILE.ends_with(".toml"));
    }

    #[test]
    fn test_sample_dimensions() {
        assert!(sample::WIDTH > 0 && sample::HEIGHT > 0);
        assert!(sample::FILE_NAME.ends_with(".png"));
    }
}
