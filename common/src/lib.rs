//! Access to the plant-watering device: the [`plant::PlantController`] trait
//! and its implementations.

pub mod plant;
