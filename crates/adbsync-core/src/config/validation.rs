//! Configuration validation and error reporting

use super::types::Config;
use crate::error::{Error, Result};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(separator) = config.separator {
            if separator == '*' || separator.is_whitespace() {
                return Err(Error::config(format!(
                    "invalid path separator {separator:?}"
                )));
            }
        }

        // Validate patterns are not empty strings
        for pattern in &config.ignore {
            if pattern.trim().is_empty() {
                return Err(Error::config("ignore pattern cannot be empty"));
            }
        }

        if let Some(serial) = &config.serial {
            if serial.trim().is_empty() {
                return Err(Error::config("device serial cannot be empty"));
            }
        }

        Ok(())
    }
}
