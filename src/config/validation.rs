use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Endpoint '{field}' must be an http(s) URL, got '{value}'")]
    InvalidEndpoint { field: String, value: String },

    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: String, value: u64 },

    #[error("User agent must not be empty")]
    EmptyUserAgent,

    #[error("Log filter must not be empty")]
    EmptyLogFilter,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_remote(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_remote(config: &Config) -> Result<(), ValidationError> {
    let remote = &config.remote;

    for (field, value) in [
        ("remote.animals_url", &remote.animals_url),
        ("remote.photos_url", &remote.photos_url),
    ] {
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            return Err(ValidationError::InvalidEndpoint {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    for (field, value) in [
        ("remote.connect_timeout_secs", remote.connect_timeout_secs),
        ("remote.request_timeout_secs", remote.request_timeout_secs),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidTimeout {
                field: field.to_string(),
                value,
            });
        }
    }

    if remote.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }

    Ok(())
}

fn validate_logging(config: &Config) -> Result<(), ValidationError> {
    if config.logging.filter.trim().is_empty() {
        return Err(ValidationError::EmptyLogFilter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = Config::default();
        config.remote.photos_url = "ftp://photos".to_string();

        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEndpoint { ref field, .. } if field == "remote.photos_url"
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.remote.request_timeout_secs = 0;

        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidTimeout { value: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_user_agent_and_filter() {
        let mut config = Config::default();
        config.remote.user_agent = "  ".to_string();
        assert!(matches!(validate(&config), Err(ValidationError::EmptyUserAgent)));

        let mut config = Config::default();
        config.logging.filter = String::new();
        assert!(matches!(validate(&config), Err(ValidationError::EmptyLogFilter)));
    }
}
