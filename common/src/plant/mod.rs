// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

mod plantcontroller;
mod dummyplantcontroller;

pub use plantcontroller::{PlantController, PlantControllerPointer, PlantError};

pub use dummyplantcontroller::DummyPlantController;

#[cfg(feature = "http")]
mod httpplantcontroller;

#[cfg(feature = "http")]
pub use httpplantcontroller::HttpPlantController;
