// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use ssukssuk_model::{SensorSnapshot, ToggleResponse};

/// Why talking to the plant device failed.
#[derive(Debug, thiserror::Error)]
pub enum PlantError {
    /// Connection, timeout, non-success status or undecodable body.
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server refused a toggle with a non-success status.
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    #[error("invalid server URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type PlantControllerPointer = Arc<dyn PlantController + Send + Sync>;

/// The plant controller trait that provides the sensor data and accepts the
/// auto-water switch.
#[async_trait::async_trait]
pub trait PlantController {
    /// Fetches the current sensor snapshot.
    async fn current_data(&self) -> Result<SensorSnapshot, PlantError>;

    /// Asks the device to enable or disable automatic watering.
    async fn set_auto_water(&self, enabled: bool) -> Result<ToggleResponse, PlantError>;
}
