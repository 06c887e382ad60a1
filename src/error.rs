use thiserror::Error;
use wasm_bindgen::JsValue;

/// Invalid `DashboardConfig`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{0} must not be negative")]
    Negative(&'static str),
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedRange { field: &'static str, min: f64, max: f64 },
    #[error("{field}: probability {value} is outside [0, 1]")]
    Probability { field: &'static str, value: f64 },
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Failures while binding the dashboard to the page.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("no performance clock")]
    NoPerformance,
    #[error("dashboard already started")]
    AlreadyStarted,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DashboardError {
    fn from(value: JsValue) -> Self {
        DashboardError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DashboardError> for JsValue {
    fn from(err: DashboardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
