use serde::{Deserialize, Deserializer, Serialize};

/// One reading of the plant, as served by `GET /data`.
///
/// Every sensor field may be `null` when the device could not read it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Air temperature in °C.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Relative air humidity in percent.
    #[serde(default)]
    pub humidity: Option<f64>,

    /// Whether the soil moisture sensor reports dry soil.
    #[serde(default)]
    pub soil_is_dry: Option<bool>,

    /// Free-form pump state text, e.g. "Stopped" or "Watering (5s)".
    #[serde(default)]
    pub pump_status: Option<String>,

    /// Missing and `null` both read as disabled.
    #[serde(default, deserialize_with = "null_as_false")]
    pub auto_water_enabled: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Body of `POST /toggle_auto_water`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleRequest {
    pub enabled: bool,
}

/// Outcome reported by the server for a toggle request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStatus {
    Success,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Body returned by `POST /toggle_auto_water`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ToggleResponse {
    #[serde(default)]
    pub status: ToggleStatus,

    /// The flag as the server now has it. Only sent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_water_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToggleResponse {
    pub fn success(enabled: bool) -> Self {
        Self {
            status: ToggleStatus::Success,
            auto_water_enabled: Some(enabled),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToggleStatus::Error,
            auto_water_enabled: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ToggleStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_with_all_fields() {
        let json = r#"{
            "temperature": 23.4,
            "humidity": 61.0,
            "soil_is_dry": true,
            "pump_status": "Stopped",
            "auto_water_enabled": true
        }"#;

        let snapshot: SensorSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.temperature, Some(23.4));
        assert_eq!(snapshot.humidity, Some(61.0));
        assert_eq!(snapshot.soil_is_dry, Some(true));
        assert_eq!(snapshot.pump_status.as_deref(), Some("Stopped"));
        assert!(snapshot.auto_water_enabled);
    }

    #[test]
    fn snapshot_with_nulls_and_missing_flag() {
        let json = r#"{
            "temperature": null,
            "humidity": null,
            "soil_is_dry": null,
            "pump_status": null
        }"#;

        let snapshot: SensorSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot, SensorSnapshot::default());
    }

    #[test]
    fn null_auto_water_flag_reads_as_disabled() {
        let snapshot: SensorSnapshot =
            serde_json::from_str(r#"{"auto_water_enabled": null}"#).unwrap();
        assert!(!snapshot.auto_water_enabled);
    }

    #[test]
    fn toggle_request_body() {
        let body = serde_json::to_string(&ToggleRequest { enabled: true }).unwrap();
        assert_eq!(body, r#"{"enabled":true}"#);
    }

    #[test]
    fn toggle_response_statuses() {
        let ok: ToggleResponse =
            serde_json::from_str(r#"{"status": "success", "auto_water_enabled": false}"#).unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.auto_water_enabled, Some(false));

        let failed: ToggleResponse =
            serde_json::from_str(r#"{"status": "error", "message": "Missing 'enabled' parameter"}"#)
                .unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.message.as_deref(), Some("Missing 'enabled' parameter"));

        let odd: ToggleResponse = serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert_eq!(odd.status, ToggleStatus::Unknown);
        assert!(!odd.is_success());
    }
}
