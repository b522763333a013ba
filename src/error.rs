use thiserror::Error;

/// Fatal setup problems. Reported once; the engine refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reference pose asset not readable: {0}")]
    Io(#[from] std::io::Error),
    #[error("reference pose is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("reference pose has {actual} landmarks, expected {expected}")]
    LandmarkCount { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Raw failure reported by the capture device. The lifecycle controller
/// classifies it; only a busy device is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("capture device is in use by another application")]
    Busy,
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no capture device found")]
    NotFound,
    #[error("capture failed: {0}")]
    Other(String),
}

impl DeviceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, DeviceError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_busy_is_transient() {
        assert!(DeviceError::Busy.is_transient());
        assert!(!DeviceError::PermissionDenied.is_transient());
        assert!(!DeviceError::NotFound.is_transient());
        assert!(!DeviceError::Other("unplugged".into()).is_transient());
    }
}
