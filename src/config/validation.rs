use super::models::Config;
use thiserror::Error;

const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing Sonarr API key (set the SONARR_KEY environment variable)")]
    MissingApiKey,

    #[error("Missing Sonarr host (set SONARR_HOST or [controller] host)")]
    MissingHost,

    #[error("sweep.stall_after must be positive")]
    ZeroStallWindow,

    #[error("sweep.max_removals must be positive")]
    ZeroRemovalBudget,

    #[error("controller.page_size must be between 1 and 1000, got {actual}")]
    InvalidPageSize { actual: u32 },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_controller(config)?;
    validate_sweep(config)?;
    Ok(())
}

/// The API key and host are the only required settings; refuse to start without them
fn validate_controller(config: &Config) -> Result<(), ValidationError> {
    if config.controller.api_key.trim().is_empty() {
        return Err(ValidationError::MissingApiKey);
    }

    if config.controller.host.trim().is_empty() {
        return Err(ValidationError::MissingHost);
    }

    if config.controller.page_size == 0 || config.controller.page_size > MAX_PAGE_SIZE {
        return Err(ValidationError::InvalidPageSize {
            actual: config.controller.page_size,
        });
    }

    Ok(())
}

fn validate_sweep(config: &Config) -> Result<(), ValidationError> {
    if config.sweep.stall_after.as_secs() == 0 {
        return Err(ValidationError::ZeroStallWindow);
    }

    if config.sweep.max_removals == 0 {
        return Err(ValidationError::ZeroRemovalBudget);
    }

    Ok(())
}
