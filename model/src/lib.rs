//! Plant dashboard model: the data the sensor server sends, how it is shown,
//! and the start date the growth counter is measured from.
//!
//! Nothing in here talks to the network or the UI toolkit, so the rules that
//! decide what the dashboard displays can be tested on their own.

mod growth;
mod readout;
mod sensor;
mod start_date;
mod toggle;

pub use growth::{format_current_date, today, GrowthDay};
pub use readout::{SensorReadout, SoilState, ERROR_TOKEN, NOT_AVAILABLE};
pub use sensor::{SensorSnapshot, ToggleRequest, ToggleResponse, ToggleStatus};
pub use start_date::{
    FileStorage, KeyValueStorage, MemoryStorage, StartDateStore, StorageError,
    DEFAULT_START_DATE, START_DATE_KEY,
};
pub use toggle::{PendingToggle, ToggleOutcome};
