use crate::ToggleResponse;

/// An auto-water toggle the user flipped, waiting for the server's answer.
///
/// The control shows `requested` right away; [`PendingToggle::resolve`]
/// decides whether it stays that way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingToggle {
    requested: bool,
}

/// What the control shows once the server has answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied { enabled: bool },
    Reverted { checked: bool, alert: String },
}

impl PendingToggle {
    pub fn begin(requested: bool) -> Self {
        Self { requested }
    }

    pub fn requested(&self) -> bool {
        self.requested
    }

    /// The checked state before the click.
    pub fn previous(&self) -> bool {
        !self.requested
    }

    pub fn resolve<E: std::fmt::Display>(self, result: Result<ToggleResponse, E>) -> ToggleOutcome {
        match result {
            Ok(response) if response.is_success() => ToggleOutcome::Applied {
                enabled: response.auto_water_enabled.unwrap_or(self.requested),
            },
            Ok(response) => ToggleOutcome::Reverted {
                checked: self.previous(),
                alert: format!(
                    "Failed to change auto watering: {}",
                    response.message.as_deref().unwrap_or("unknown error")
                ),
            },
            Err(e) => ToggleOutcome::Reverted {
                checked: self.previous(),
                alert: format!("Auto watering request failed: {e}"),
            },
        }
    }
}

impl ToggleOutcome {
    pub fn checked(&self) -> bool {
        match self {
            Self::Applied { enabled } => *enabled,
            Self::Reverted { checked, .. } => *checked,
        }
    }

    pub fn alert(&self) -> Option<&str> {
        match self {
            Self::Applied { .. } => None,
            Self::Reverted { alert, .. } => Some(alert),
        }
    }
}
