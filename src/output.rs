//! # Output Configuration
//!
//! Every outcome of a run is reported through log lines on stderr. This
//! module decides whether those lines are colored, based on terminal
//! capabilities and user preferences.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use env_logger::WriteStyle;
use std::env;

/// Output configuration for controlling colored log output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether log lines should be colored.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stderr is not a color-capable terminal (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Logs are written to stderr
        console::Term::stderr().features().colors_supported()
    }

    /// The `env_logger` write style matching this configuration.
    pub fn write_style(&self) -> WriteStyle {
        if self.use_color {
            WriteStyle::Always
        } else {
            WriteStyle::Never
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
        assert_eq!(config.write_style(), WriteStyle::Always);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("NEVER");
        assert!(!config.use_color);
        assert_eq!(config.write_style(), WriteStyle::Never);
    }

    #[test]
    #[serial]
    fn test_no_color_env_disables_auto() {
        env::set_var("NO_COLOR", "");
        let config = OutputConfig::from_env_and_flag("auto");
        env::remove_var("NO_COLOR");
        assert!(!config.use_color);
    }

    #[test]
    #[serial]
    fn test_clicolor_force_enables_auto() {
        env::remove_var("NO_COLOR");
        env::remove_var("CLICOLOR");
        env::set_var("CLICOLOR_FORCE", "1");
        let config = OutputConfig::from_env_and_flag("auto");
        env::remove_var("CLICOLOR_FORCE");
        assert!(config.use_color);
    }
}
