//! Problem-instance generation for WFLOP solver benchmarking.
//!
//! Enumerates the Cartesian product of (grid dimension × turbine density ×
//! wind scenario) into uniquely-identified [`wflop_core::ProblemInstance`]
//! records, writes one JSON artifact per instance and a manifest for
//! downstream discovery.

pub mod manifest;
pub mod spec;

pub use manifest::{
    load_manifest, materialize_instances, write_manifest, InstanceArtifact, InstanceManifest,
};
pub use spec::{
    load_spec_from_path, resolve_instances, turbine_count, validate, GenerationSpec,
    ResolvedInstance, WindScenario, MAX_DIMENSION, PROBABILITY_TOLERANCE,
};
