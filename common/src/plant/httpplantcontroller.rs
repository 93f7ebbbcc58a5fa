// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use std::time::Duration;

use reqwest::{Client, Url};
use ssukssuk_model::{SensorSnapshot, ToggleRequest, ToggleResponse};

use crate::plant::plantcontroller::{PlantController, PlantError};

/// Talks to the plant server over HTTP (`GET /data`, `POST /toggle_auto_water`).
pub struct HttpPlantController {
    client: Client,
    data_url: Url,
    toggle_url: Url,
}

impl HttpPlantController {
    /// Creates a controller for the server at `base_url`, e.g.
    /// `http://raspberrypi.local:5000`. Each request gives up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PlantError> {
        let invalid = |reason: String| PlantError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        // The trailing slash makes `join` append instead of replacing the last segment.
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
        }

        let data_url = base.join("data").map_err(|e| invalid(e.to_string()))?;
        let toggle_url = base
            .join("toggle_auto_water")
            .map_err(|e| invalid(e.to_string()))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            data_url,
            toggle_url,
        })
    }

    pub fn data_url(&self) -> &Url {
        &self.data_url
    }

    pub fn toggle_url(&self) -> &Url {
        &self.toggle_url
    }
}

#[async_trait::async_trait]
impl PlantController for HttpPlantController {
    async fn current_data(&self) -> Result<SensorSnapshot, PlantError> {
        log::debug!("-> GET {}", self.data_url);
        let response = self
            .client
            .get(self.data_url.clone())
            .send()
            .await?
            .error_for_status()?;
        log::debug!("<- {}", response.status());

        Ok(response.json().await?)
    }

    async fn set_auto_water(&self, enabled: bool) -> Result<ToggleResponse, PlantError> {
        log::debug!("-> POST {} enabled={enabled}", self.toggle_url);
        let response = self
            .client
            .post(self.toggle_url.clone())
            .json(&ToggleRequest { enabled })
            .send()
            .await?;

        let status = response.status();
        log::debug!("<- {status}");

        if !status.is_success() {
            let message = response
                .json::<ToggleResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Server error".to_string());

            return Err(PlantError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
