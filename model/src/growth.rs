use chrono::NaiveDate;

const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// How long the plant has been growing, counted in calendar days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthDay {
    /// The start date lies in the future.
    BeforeStart,
    /// Day `n` of growth, where the start date itself is day 1.
    Day(u32),
    /// The stored start date is not an ISO date.
    DateError,
}

impl GrowthDay {
    /// Counts the days from `start_date` (as stored, `YYYY-MM-DD`) up to and
    /// including `today`.
    pub fn compute(start_date: &str, today: NaiveDate) -> Self {
        let Ok(start) = NaiveDate::parse_from_str(start_date.trim(), START_DATE_FORMAT) else {
            return Self::DateError;
        };

        let elapsed = today.signed_duration_since(start).num_days();
        if elapsed < 0 {
            return Self::BeforeStart;
        }

        u32::try_from(elapsed + 1)
            .map(Self::Day)
            .unwrap_or(Self::DateError)
    }
}

impl std::fmt::Display for GrowthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BeforeStart => write!(f, "Before start"),
            Self::Day(day) => write!(f, "+ Day {day} of growing"),
            Self::DateError => write!(f, "Date error"),
        }
    }
}

/// Today in the local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The date line shown above the growth counter, e.g. `2025.06.01`.
pub fn format_current_date(today: NaiveDate) -> String {
    today.format("%Y.%m.%d").to_string()
}
