//! Problem-instance data model.
//!
//! Field names on the serialized artifacts are camelCase so that instance
//! files remain readable by the existing solver harnesses.

use serde::{Deserialize, Serialize};

/// One directional/speed bin of a wind rose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindProfile {
    /// Wind speed in m/s, must be positive
    pub speed: f64,
    /// Direction the wind blows from, degrees in 0..=359
    pub angle: u32,
    /// Occurrence probability in 0..=1; bins of one scenario sum to 1.0
    pub probability: f64,
}

/// Physical constants shared by every instance in a generation batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalConstants {
    pub rotor_radius: f64,
    pub hub_height: f64,
    pub rotor_efficiency: f64,
    pub thrust_coefficient: f64,
    pub air_density: f64,
    pub surface_roughness: f64,
    pub grid_width: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            rotor_radius: 40.0,
            hub_height: 100.0,
            rotor_efficiency: 0.9,
            thrust_coefficient: 0.8,
            air_density: 1.225,
            surface_roughness: 0.1,
            grid_width: 200.0,
        }
    }
}

/// One WFLOP configuration handed to external solvers.
///
/// Immutable once generated: solvers read these artifacts, they never
/// write them back. `number_of_turbines` is always derived as
/// `floor(dimension² × density)` by the generator, never supplied
/// independently, so identity and content stay consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemInstance {
    #[serde(flatten)]
    pub constants: PhysicalConstants,
    /// Grid edge length; the farm is dimension × dimension cells
    pub dimension: u32,
    pub number_of_turbines: u32,
    pub wind_profiles: Vec<WindProfile>,
}
