use crate::SensorSnapshot;

/// Shown in every status field after a failed poll.
pub const ERROR_TOKEN: &str = "Error";

/// Shown for a sensor value the device could not read.
pub const NOT_AVAILABLE: &str = "N/A";

/// Moisture classification, used to colour the soil field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SoilState {
    #[default]
    Unknown,
    Dry,
    Moist,
}

/// The dashboard's status fields, formatted from one poll.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReadout {
    pub temperature: String,
    pub humidity: String,
    pub soil: String,
    pub soil_state: SoilState,
    pub pump_status: String,
    /// `None` leaves the toggle as it is.
    pub auto_water_enabled: Option<bool>,
}

impl SensorReadout {
    pub fn from_snapshot(snapshot: &SensorSnapshot) -> Self {
        let (soil, soil_state) = match snapshot.soil_is_dry {
            Some(true) => ("Dry".to_string(), SoilState::Dry),
            Some(false) => ("Moist".to_string(), SoilState::Moist),
            None => (NOT_AVAILABLE.to_string(), SoilState::Unknown),
        };

        let pump_status = match snapshot.pump_status.as_deref() {
            Some(status) if !status.is_empty() => status.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        };

        Self {
            temperature: one_decimal(snapshot.temperature),
            humidity: one_decimal(snapshot.humidity),
            soil,
            soil_state,
            pump_status,
            auto_water_enabled: Some(snapshot.auto_water_enabled),
        }
    }

    /// What a failed poll shows: the error token in the four status fields,
    /// the toggle untouched.
    pub fn failed() -> Self {
        Self {
            temperature: ERROR_TOKEN.to_string(),
            humidity: ERROR_TOKEN.to_string(),
            soil: ERROR_TOKEN.to_string(),
            soil_state: SoilState::Unknown,
            pump_status: ERROR_TOKEN.to_string(),
            auto_water_enabled: None,
        }
    }

    /// What is shown before the first poll completes.
    pub fn waiting() -> Self {
        Self {
            temperature: "--".to_string(),
            humidity: "--".to_string(),
            soil: "--".to_string(),
            soil_state: SoilState::Unknown,
            pump_status: "--".to_string(),
            auto_water_enabled: None,
        }
    }

    /// Drops the toggle update, e.g. while a toggle request is in flight.
    pub fn without_toggle(mut self) -> Self {
        self.auto_water_enabled = None;
        self
    }
}

fn one_decimal(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.1}"),
        None => NOT_AVAILABLE.to_string(),
    }
}
