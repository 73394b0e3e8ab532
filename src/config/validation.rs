//! Configuration validation logic.

use crate::config::Config;
use crate::error::{Error, Result};

/// Narrowest progress line that still leaves room for a label.
pub const MIN_LINE_WIDTH: usize = 60;

/// Widest progress line accepted.
pub const MAX_LINE_WIDTH: usize = 240;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_line_width(config.output.line_width)?;
    validate_user_agent(&config.download.user_agent)?;
    validate_connect_timeout(config.download.connect_timeout_seconds)?;

    Ok(())
}

/// Validate the progress line width.
pub fn validate_line_width(width: usize) -> Result<()> {
    if !(MIN_LINE_WIDTH..=MAX_LINE_WIDTH).contains(&width) {
        return Err(Error::ConfigValidation {
            field: "line_width".to_string(),
            message: format!(
                "Line width must be between {} and {} (got {})",
                MIN_LINE_WIDTH, MAX_LINE_WIDTH, width
            ),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "user_agent".to_string(),
            message: "User agent cannot be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate the connect timeout.
pub fn validate_connect_timeout(seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "connect_timeout_seconds".to_string(),
            message: "Connect timeout must be at least one second".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_line_width_bounds() {
        assert!(validate_line_width(60).is_ok());
        assert!(validate_line_width(240).is_ok());
        assert!(validate_line_width(59).is_err());
        assert!(validate_line_width(241).is_err());
    }

    #[test]
    fn test_empty_user_agent() {
        assert!(validate_user_agent("").is_err());
        assert!(validate_user_agent("   ").is_err());
        assert!(validate_user_agent("pkgfetch/0.1.0").is_ok());
    }

    #[test]
    fn test_zero_timeout() {
        assert!(validate_connect_timeout(0).is_err());
        assert!(validate_connect_timeout(1).is_ok());
    }
}
