use thiserror::Error;

/// Errors surfaced when building or reconfiguring controllers and emitters.
///
/// Numeric values are never clamped into range; anything outside the
/// accepted domain is rejected here so the per-frame paths can stay
/// infallible.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShipError {
    #[error("invalid value for `{field}`: {value} (expected {expected})")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("color map must contain at least one entry")]
    EmptyColorMap,

    #[error("color map limits must be sorted descending (entry {index}: {limit} >= {previous})")]
    UnsortedColorMap {
        index: usize,
        limit: f32,
        previous: f32,
    },

    #[error("cannot apply a {patch} patch to a {controller} controller")]
    PatchMismatch {
        patch: &'static str,
        controller: &'static str,
    },

    #[error("ship rig has no {kind} controller")]
    MissingMotion { kind: &'static str },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShipError>;

// Shared range checks used by every constructor and `update_config`.

pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(reject(field, value, "a finite value > 0"))
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(reject(field, value, "a finite value >= 0"))
    }
}

pub(crate) fn require_unit_open(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(reject(field, value, "a value in [0, 1)"))
    }
}

pub(crate) fn require_unit_closed(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(reject(field, value, "a value in [0, 1]"))
    }
}

fn reject(field: &'static str, value: f32, expected: &'static str) -> ShipError {
    log::warn!("[config] rejected {field}={value}: expected {expected}");
    ShipError::InvalidParameter {
        field,
        value: value as f64,
        expected,
    }
}
