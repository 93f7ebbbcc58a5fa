// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use ssukssuk_model::{SensorSnapshot, ToggleResponse};

use crate::plant::plantcontroller::{PlantController, PlantError};

#[derive(Deserialize, Default)]
struct SimulatedDevice {
    reading: SensorSnapshot,

    /// Polls it takes for the soil to dry out after watering.
    drying_polls: u32,

    #[serde(skip)]
    polls_since_watering: u32,
}

impl SimulatedDevice {
    /// One pass of the device loop: the soil dries over time, and dry soil is
    /// watered only while automatic watering is on.
    fn advance(&mut self) {
        self.polls_since_watering += 1;

        let soil_is_dry = self.polls_since_watering >= self.drying_polls;
        let pump_status = match (soil_is_dry, self.reading.auto_water_enabled) {
            (true, true) => {
                self.polls_since_watering = 0;
                "Watering (5s)"
            }
            (true, false) => "Stopped (auto off)",
            (false, _) => "Stopped",
        };

        self.reading.soil_is_dry = Some(soil_is_dry);
        self.reading.pump_status = Some(pump_status.to_string());
    }
}

/// A plant device simulated in memory, for running the dashboard without
/// hardware.
pub struct DummyPlantController {
    device: Mutex<SimulatedDevice>,
}

impl DummyPlantController {
    pub fn new() -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./dummyplant.json");

        Ok(Self {
            device: Mutex::new(serde_json::from_str(json_data)?),
        })
    }

    fn with_device(&self) -> std::sync::MutexGuard<'_, SimulatedDevice> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl PlantController for DummyPlantController {
    async fn current_data(&self) -> Result<SensorSnapshot, PlantError> {
        let mut device = self.with_device();
        device.advance();

        Ok(device.reading.clone())
    }

    async fn set_auto_water(&self, enabled: bool) -> Result<ToggleResponse, PlantError> {
        let mut device = self.with_device();
        device.reading.auto_water_enabled = enabled;
        log::info!("Simulated auto watering set to {enabled}");

        Ok(ToggleResponse::success(enabled))
    }
}
