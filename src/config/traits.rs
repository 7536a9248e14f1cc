use crate::error::MelodyError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), MelodyError>;
}

pub(crate) fn check_rate(section: &str, name: &str, value: f64) -> Result<(), MelodyError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MelodyError::Configuration(format!(
            "{}.{} must be between 0 and 1, got {}",
            section, name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_positive(section: &str, name: &str, value: usize) -> Result<(), MelodyError> {
    if value == 0 {
        return Err(MelodyError::Configuration(format!(
            "{}.{} must be at least 1",
            section, name
        )));
    }
    Ok(())
}
