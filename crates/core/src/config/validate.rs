use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Staging and output directories are distinct (the sweep deletes staged
///   files; it must never run over finished output)
/// - Retention and sweep interval are non-zero
/// - Engine timeout is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Staging validation
    if config.staging.dir == config.output.dir {
        return Err(ConfigError::ValidationError(
            "staging.dir and output.dir must be different directories".to_string(),
        ));
    }
    if config.staging.retention_secs == 0 {
        return Err(ConfigError::ValidationError(
            "staging.retention_secs cannot be 0".to_string(),
        ));
    }
    if config.staging.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "staging.sweep_interval_secs cannot be 0".to_string(),
        ));
    }

    // Engine validation
    if config.engine.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "engine.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
