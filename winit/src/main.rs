// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod args;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use ssukssuk_common::plant::{DummyPlantController, HttpPlantController, PlantControllerPointer};
use ssukssuk_model::{
    format_current_date, today, FileStorage, GrowthDay, KeyValueStorage, MemoryStorage,
    PendingToggle, SensorReadout, StartDateStore, ToggleOutcome,
};

use crate::args::Args;

/// Our App struct that holds the UI and the plant controller.
///
/// A timer polls the sensors; the HTTP requests themselves run on a tokio
/// runtime and hand their results back to the UI thread with
/// `upgrade_in_event_loop`, so the UI state is only ever touched from there.
struct App {
    ui: AppWindow,
    plant_controller: PlantControllerPointer,
    start_date: Rc<RefCell<StartDateStore>>,
    runtime: tokio::runtime::Runtime,
    timer: slint::Timer,
    poll_interval: std::time::Duration,
    read_in_flight: Arc<AtomicBool>,
}

impl App {
    /// Create a new App struct.
    ///
    /// Picks the plant controller and loads the start date from local storage.
    fn new(args: &Args) -> anyhow::Result<Self> {
        let ui = AppWindow::new()?;

        // Talk to the server, unless a simulated device was asked for.
        let plant_controller: PlantControllerPointer = if args.dummy {
            log::info!("Using the simulated plant device");
            Arc::new(DummyPlantController::new()?)
        } else {
            log::info!("Using the plant server at {}", args.server_url);
            Arc::new(HttpPlantController::new(&args.server_url, args.request_timeout())?)
        };

        let storage = open_storage(args.storage_file.as_deref());
        let start_date = Rc::new(RefCell::new(StartDateStore::load(storage)));

        let runtime = tokio::runtime::Runtime::new()?;

        let model = ui.global::<ViewModel>();
        model.set_start_date(start_date.borrow().current().into());
        show_readout(&model, &SensorReadout::waiting());

        Ok(Self {
            ui,
            plant_controller,
            start_date,
            runtime,
            timer: slint::Timer::default(),
            poll_interval: args.poll_interval(),
            read_in_flight: Arc::default(),
        })
    }

    /// Run the App: bind the callbacks, poll once, then keep polling on the timer.
    fn run(&mut self) -> anyhow::Result<()> {
        self.bind_start_date();
        self.bind_auto_water();
        self.bind_alert();

        show_growth(&self.ui.global::<ViewModel>(), self.start_date.borrow().current());
        poll_sensors(
            self.ui.as_weak(),
            self.plant_controller.clone(),
            self.runtime.handle(),
            self.read_in_flight.clone(),
        );

        let ui_handle = self.ui.as_weak();
        let plant_controller = self.plant_controller.clone();
        let handle = self.runtime.handle().clone();
        let read_in_flight = self.read_in_flight.clone();
        let start_date = self.start_date.clone();

        self.timer.start(
            slint::TimerMode::Repeated,
            self.poll_interval,
            move || {
                let Some(ui) = ui_handle.upgrade() else {
                    return;
                };

                // Keeps the day counter right for a window left open past midnight.
                show_growth(&ui.global::<ViewModel>(), start_date.borrow().current());

                poll_sensors(
                    ui_handle.clone(),
                    plant_controller.clone(),
                    &handle,
                    read_in_flight.clone(),
                );
            },
        );

        // Run the UI (and map an error to an anyhow::Error).
        self.ui.run().map_err(|e| e.into())
    }

    fn bind_start_date(&self) {
        let ui_handle = self.ui.as_weak();
        let start_date = self.start_date.clone();

        self.ui.global::<ViewModel>().on_start_date_edited(move |text| {
            let mut start_date = start_date.borrow_mut();
            if let Err(e) = start_date.set(&text) {
                log::error!("Failed to save the start date: {e}");
            }

            if let Some(ui) = ui_handle.upgrade() {
                let model = ui.global::<ViewModel>();
                model.set_start_date(start_date.current().into());
                show_growth(&model, start_date.current());
            }
        });
    }

    fn bind_auto_water(&self) {
        let ui_handle = self.ui.as_weak();
        let plant_controller = self.plant_controller.clone();
        let handle = self.runtime.handle().clone();

        // The checkbox has already flipped when this runs.
        self.ui.global::<ViewModel>().on_auto_water_toggled(move |requested| {
            let pending = PendingToggle::begin(requested);

            if let Some(ui) = ui_handle.upgrade() {
                ui.global::<ViewModel>().set_toggle_pending(true);
            }

            let ui_handle = ui_handle.clone();
            let plant_controller = plant_controller.clone();
            handle.spawn(async move {
                let result = plant_controller.set_auto_water(pending.requested()).await;
                let outcome = pending.resolve(result);

                match &outcome {
                    ToggleOutcome::Applied { enabled } => {
                        log::info!("Auto watering changed: enabled={enabled}")
                    }
                    ToggleOutcome::Reverted { alert, .. } => log::error!("{alert}"),
                }

                let delivered = ui_handle.upgrade_in_event_loop(move |ui| {
                    let model = ui.global::<ViewModel>();
                    model.set_auto_water_enabled(outcome.checked());
                    model.set_toggle_pending(false);
                    if let Some(alert) = outcome.alert() {
                        model.set_alert_message(alert.into());
                    }
                });
                if let Err(e) = delivered {
                    log::error!("Failed to hand the toggle result to the UI: {e}");
                }
            });
        });
    }

    fn bind_alert(&self) {
        let ui_handle = self.ui.as_weak();

        self.ui.global::<ViewModel>().on_dismiss_alert(move || {
            if let Some(ui) = ui_handle.upgrade() {
                ui.global::<ViewModel>().set_alert_message("".into());
            }
        });
    }
}

/// Opens the local storage for the start date, or a throwaway in-memory one
/// if the file cannot be used.
fn open_storage(path: Option<&Path>) -> Box<dyn KeyValueStorage> {
    let storage = match path {
        Some(path) => FileStorage::open(path),
        None => FileStorage::open_default(),
    };

    match storage {
        Ok(storage) => {
            log::info!("Start date is kept in {}", storage.path().display());
            Box::new(storage)
        }
        Err(e) => {
            log::warn!("Local storage unavailable, the start date will not be saved: {e}");
            Box::new(MemoryStorage::default())
        }
    }
}

/// Reads the sensors in the background and shows the result.
///
/// A tick that comes while the previous read is still running is skipped.
fn poll_sensors(
    ui_handle: slint::Weak<AppWindow>,
    plant_controller: PlantControllerPointer,
    handle: &tokio::runtime::Handle,
    read_in_flight: Arc<AtomicBool>,
) {
    if read_in_flight.swap(true, Ordering::AcqRel) {
        log::debug!("Previous sensor read still running, skipping this tick");
        return;
    }

    handle.spawn(async move {
        let result = plant_controller.current_data().await;
        read_in_flight.store(false, Ordering::Release);

        let readout = match result {
            Ok(snapshot) => SensorReadout::from_snapshot(&snapshot),
            Err(e) => {
                log::error!("Failed to fetch sensor data: {e}");
                SensorReadout::failed()
            }
        };

        let delivered = ui_handle.upgrade_in_event_loop(move |ui| {
            let model = ui.global::<ViewModel>();

            // A toggle in flight owns the checkbox until it resolves.
            let readout = if model.get_toggle_pending() {
                readout.without_toggle()
            } else {
                readout
            };
            show_readout(&model, &readout);
        });
        if let Err(e) = delivered {
            log::error!("Failed to hand sensor data to the UI: {e}");
        }
    });
}

fn show_readout(model: &ViewModel, readout: &SensorReadout) {
    model.set_temperature(readout.temperature.as_str().into());
    model.set_humidity(readout.humidity.as_str().into());
    model.set_soil_status(readout.soil.as_str().into());
    model.set_soil_state(readout.soil_state.into());
    model.set_pump_status(readout.pump_status.as_str().into());

    if let Some(enabled) = readout.auto_water_enabled {
        model.set_auto_water_enabled(enabled);
    }
}

fn show_growth(model: &ViewModel, start_date: &str) {
    let today = today();
    model.set_current_date(format_current_date(today).into());
    model.set_growth_text(GrowthDay::compute(start_date, today).to_string().into());
}

/// Convert the soil classification into the UI's enum.
impl From<ssukssuk_model::SoilState> for SoilState {
    fn from(state: ssukssuk_model::SoilState) -> Self {
        match state {
            ssukssuk_model::SoilState::Unknown => SoilState::Unknown,
            ssukssuk_model::SoilState::Dry => SoilState::Dry,
            ssukssuk_model::SoilState::Moist => SoilState::Moist,
        }
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    app.run()
}
