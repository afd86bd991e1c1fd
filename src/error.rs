use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A reducer that needs at least one value was handed none.
    #[error("cannot compute `{reducer}` over an empty value sequence")]
    Domain { reducer: &'static str },

    /// A transform ran without a control value it requires.
    #[error("control `{control}` has no bound value")]
    Config { control: &'static str },

    #[error("value `{value}` is not a known category for control `{control}`")]
    UnknownCategory { control: &'static str, value: String },

    #[error("invalid value for control `{control}`: {reason}")]
    InvalidControlValue {
        control: &'static str,
        reason: String,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Errors raised while assigning a control value; the previous value stays in place.
    #[must_use]
    pub fn is_rejected_control_value(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. } | Self::InvalidControlValue { .. }
        )
    }
}
