use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Dashboard for the ssukssuk plant-watering device.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Base URL of the plant server.
    #[arg(long, env = "SSUKSSUK_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    pub server_url: String,

    /// How often the sensors are polled.
    #[arg(long, env = "SSUKSSUK_POLL_INTERVAL_MS", default_value_t = 2000, value_parser = clap::value_parser!(u64).range(100..))]
    pub poll_interval_ms: u64,

    /// How long a single request may take.
    #[arg(long, env = "SSUKSSUK_REQUEST_TIMEOUT_MS", default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_ms: u64,

    /// Where the start date is saved. Defaults to the user's data directory.
    #[arg(long, env = "SSUKSSUK_STORAGE_FILE")]
    pub storage_file: Option<PathBuf>,

    /// Run against a simulated device instead of the server.
    #[arg(long, env = "SSUKSSUK_DUMMY")]
    pub dummy: bool,
}

impl Args {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["ssukssuk"]).unwrap();
        assert_eq!(args.server_url, "http://127.0.0.1:5000");
        assert_eq!(args.poll_interval(), Duration::from_secs(2));
        assert_eq!(args.request_timeout(), Duration::from_secs(5));
        assert_eq!(args.storage_file, None);
        assert!(!args.dummy);
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "ssukssuk",
            "--server-url",
            "http://raspberrypi.local:5000",
            "--poll-interval-ms",
            "500",
            "--storage-file",
            "/tmp/ssukssuk.json",
            "--dummy",
        ])
        .unwrap();
        assert_eq!(args.server_url, "http://raspberrypi.local:5000");
        assert_eq!(args.poll_interval(), Duration::from_millis(500));
        assert_eq!(args.storage_file, Some(PathBuf::from("/tmp/ssukssuk.json")));
        assert!(args.dummy);
    }

    #[test]
    fn rejects_a_zero_interval() {
        assert!(Args::try_parse_from(["ssukssuk", "--poll-interval-ms", "0"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
