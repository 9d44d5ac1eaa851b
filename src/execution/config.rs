use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a serialized executor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown executor type '{0}'")]
    UnknownExecutorType(String),

    #[error("Executor record is missing its 'type' tag")]
    MissingExecutorType,

    #[error("Field '{field}' must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a [`ConstantVelocityExecutor`].
///
/// Serializes as a flat key-value record tagged `"type": "constant_velocity"`
/// so executor setups round-trip through simulator config files.
///
/// [`ConstantVelocityExecutor`]: super::ConstantVelocityExecutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "constant_velocity")]
pub struct ExecutorConfig {
    /// Trajectory resampling interval, in seconds.
    pub dt: f64,
    /// Linear velocity, in m/s.
    pub linear_velocity: f64,
    /// Maximum angular velocity, in rad/s. `None` leaves turning unbounded.
    pub max_angular_velocity: Option<f64>,
    /// Whether to run the concurrent path validation task during execution.
    pub validate_during_execution: bool,
    /// Polling interval for the validation task, in seconds.
    pub validation_dt: f64,
    /// Step size for discretizing the remaining path when collision checking.
    pub validation_step_dist: f64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            linear_velocity: 1.0,
            max_angular_velocity: None,
            validate_during_execution: false,
            validation_dt: 0.5,
            validation_step_dist: 0.025,
        }
    }
}

impl ExecutorConfig {
    /// Load and validate a configuration from a serialized record.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, ConfigError> {
        match value.get("type").and_then(|tag| tag.as_str()) {
            Some("constant_velocity") => {}
            Some(other) => return Err(ConfigError::UnknownExecutorType(other.to_string())),
            None => return Err(ConfigError::MissingExecutorType),
        }
        let config: Self = serde_json::from_value(value.clone())?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to the flat tagged record form.
    pub fn to_value(&self) -> serde_json::Value {
        // Serialization of this struct cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Check field ranges. Intervals and velocities must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("dt", self.dt),
            ("linear_velocity", self.linear_velocity),
            ("validation_dt", self.validation_dt),
            ("validation_step_dist", self.validation_step_dist),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if let Some(value) = self.max_angular_velocity {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "max_angular_velocity",
                    value,
                });
            }
        }
        Ok(())
    }
}
