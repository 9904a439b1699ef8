use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use wflop_core::{instance_identity, PhysicalConstants, ProblemInstance, WflopError, WindProfile};

/// Scenario probabilities must sum to 1.0 within this tolerance.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Largest grid edge length whose cell count (and thus any turbine count)
/// still fits in a `u32`.
pub const MAX_DIMENSION: u32 = 65_535;

/// A named wind rose: the directional/speed bins one batch of instances
/// shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindScenario {
    pub name: String,
    pub profiles: Vec<WindProfile>,
}

impl WindScenario {
    pub fn validate(&self) -> Result<(), WflopError> {
        if self.name.trim().is_empty() {
            return Err(WflopError::Validation(
                "scenario name cannot be empty".into(),
            ));
        }
        // the name becomes part of the artifact filename
        if self.name.contains(['/', '\\']) || self.name.contains("..") {
            return Err(WflopError::Validation(format!(
                "scenario name '{}' must not contain path separators or '..'",
                self.name
            )));
        }
        if self.profiles.is_empty() {
            return Err(WflopError::Validation(format!(
                "scenario '{}' has no wind profiles",
                self.name
            )));
        }
        for profile in &self.profiles {
            if profile.speed <= 0.0 {
                return Err(WflopError::Validation(format!(
                    "scenario '{}': wind speed must be positive, got {}",
                    self.name, profile.speed
                )));
            }
            if profile.angle >= 360 {
                return Err(WflopError::Validation(format!(
                    "scenario '{}': angle must be below 360 degrees, got {}",
                    self.name, profile.angle
                )));
            }
            if !(0.0..=1.0).contains(&profile.probability) {
                return Err(WflopError::Validation(format!(
                    "scenario '{}': probability must lie in [0, 1], got {}",
                    self.name, profile.probability
                )));
            }
        }
        let total: f64 = self.profiles.iter().map(|p| p.probability).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(WflopError::Validation(format!(
                "scenario '{}': profile probabilities sum to {}, expected 1.0 within {}",
                self.name, total, PROBABILITY_TOLERANCE
            )));
        }
        Ok(())
    }
}

/// The generation parameter space: everything the generator needs is passed
/// in here, nothing is read from ambient module state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSpec {
    /// Physical constants shared by every instance in the batch
    #[serde(default)]
    pub constants: PhysicalConstants,
    /// Grid edge lengths to enumerate
    pub dimensions: Vec<u32>,
    /// Turbine density fractions in (0, 1]
    pub densities: Vec<f64>,
    /// Named wind scenarios
    pub scenarios: Vec<WindScenario>,
}

impl Default for GenerationSpec {
    /// The reference parameter space: five grid sizes, four densities and
    /// three wind scenarios, 60 instances in total.
    fn default() -> Self {
        let profile = |speed: f64, angle: u32, probability: f64| WindProfile {
            speed,
            angle,
            probability,
        };
        Self {
            constants: PhysicalConstants::default(),
            dimensions: vec![10, 20, 30, 40, 50],
            densities: vec![0.2, 0.4, 0.6, 0.8],
            scenarios: vec![
                WindScenario {
                    name: "single_dir".into(),
                    profiles: vec![profile(12.0, 270, 1.0)],
                },
                WindScenario {
                    name: "uniform_dirs".into(),
                    profiles: (0..8u32).map(|i| profile(12.0, i * 45, 0.125)).collect(),
                },
                WindScenario {
                    name: "varying_nonuniform".into(),
                    profiles: vec![
                        profile(8.0, 270, 0.20),
                        profile(10.0, 270, 0.25),
                        profile(12.0, 270, 0.20),
                        profile(9.0, 240, 0.10),
                        profile(11.0, 240, 0.10),
                        profile(7.0, 300, 0.05),
                        profile(13.0, 300, 0.10),
                    ],
                },
            ],
        }
    }
}

/// Load a generation spec from YAML or JSON, decided by file extension with
/// a try-both fallback for anything else.
pub fn load_spec_from_path(path: &Path) -> Result<GenerationSpec> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading generation spec '{}'", path.display()))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            serde_yaml::from_str(&data).context("parsing generation spec yaml")
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&data).context("parsing generation spec json")
        }
        _ => serde_yaml::from_str(&data)
            .or_else(|_| serde_json::from_str(&data))
            .context("parsing generation spec"),
    }
}

/// `floor(dimension² × density)` — the only way a turbine count is ever
/// produced. Validation caps dimensions at [`MAX_DIMENSION`] so the count
/// always fits.
pub fn turbine_count(dimension: u32, density: f64) -> u32 {
    let cells = (dimension as u64 * dimension as u64) as f64;
    (cells * density).floor() as u32
}

/// Validate the whole parameter space before any artifact is written.
/// Generation fails fast: a single bad scenario aborts the batch.
pub fn validate(spec: &GenerationSpec) -> Result<(), WflopError> {
    if spec.dimensions.is_empty() {
        return Err(WflopError::Validation(
            "generation spec declares no dimensions".into(),
        ));
    }
    if spec.densities.is_empty() {
        return Err(WflopError::Validation(
            "generation spec declares no densities".into(),
        ));
    }
    if spec.scenarios.is_empty() {
        return Err(WflopError::Validation(
            "generation spec declares no wind scenarios".into(),
        ));
    }
    for &dimension in &spec.dimensions {
        if dimension == 0 {
            return Err(WflopError::Validation(
                "grid dimension must be positive".into(),
            ));
        }
        if dimension > MAX_DIMENSION {
            return Err(WflopError::Validation(format!(
                "grid dimension {dimension} exceeds the maximum of {MAX_DIMENSION}"
            )));
        }
    }
    for &density in &spec.densities {
        if !(density > 0.0 && density <= 1.0) {
            return Err(WflopError::Validation(format!(
                "turbine density must lie in (0, 1], got {density}"
            )));
        }
    }
    let mut seen = HashSet::new();
    for scenario in &spec.scenarios {
        scenario.validate()?;
        if !seen.insert(scenario.name.clone()) {
            return Err(WflopError::Validation(format!(
                "duplicate scenario name '{}' in spec",
                scenario.name
            )));
        }
    }
    Ok(())
}

/// One combination of the parameter space, ready to be written.
#[derive(Debug, Clone)]
pub struct ResolvedInstance {
    pub identity: String,
    pub dimension: u32,
    pub density: f64,
    pub scenario: String,
    pub instance: ProblemInstance,
}

/// Enumerate the Cartesian product of the parameter space.
///
/// The identity keys on the realized turbine count, not the nominal
/// density, so two densities that floor to the same count for one
/// dimension collapse to one identity. Such collisions are deduplicated:
/// the first density wins and the collision is logged as a warning.
pub fn resolve_instances(spec: &GenerationSpec) -> Result<Vec<ResolvedInstance>, WflopError> {
    validate(spec)?;
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for &dimension in &spec.dimensions {
        for &density in &spec.densities {
            let number_of_turbines = turbine_count(dimension, density);
            for scenario in &spec.scenarios {
                let identity = instance_identity(dimension, number_of_turbines, &scenario.name);
                if !seen.insert(identity.clone()) {
                    tracing::warn!(
                        identity = %identity,
                        density,
                        "density floors to an already-generated turbine count; keeping the first instance"
                    );
                    continue;
                }
                resolved.push(ResolvedInstance {
                    identity,
                    dimension,
                    density,
                    scenario: scenario.name.clone(),
                    instance: ProblemInstance {
                        constants: spec.constants,
                        dimension,
                        number_of_turbines,
                        wind_profiles: scenario.profiles.clone(),
                    },
                });
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbine_count_floors_cell_fraction() {
        assert_eq!(turbine_count(10, 0.2), 20);
        assert_eq!(turbine_count(10, 0.25), 25);
        assert_eq!(turbine_count(3, 0.5), 4); // floor(4.5)
        assert_eq!(turbine_count(50, 0.8), 2000);
    }

    #[test]
    fn turbine_count_stays_within_grid() {
        let spec = GenerationSpec::default();
        for &dimension in &spec.dimensions {
            for &density in &spec.densities {
                let count = turbine_count(dimension, density);
                assert!(count <= dimension * dimension);
            }
        }
    }

    #[test]
    fn default_scenarios_have_unit_probability_mass() {
        for scenario in GenerationSpec::default().scenarios {
            let total: f64 = scenario.profiles.iter().map(|p| p.probability).sum();
            assert!(
                (total - 1.0).abs() <= PROBABILITY_TOLERANCE,
                "scenario '{}' sums to {}",
                scenario.name,
                total
            );
            scenario.validate().unwrap();
        }
    }

    #[test]
    fn validate_rejects_bad_probability_mass() {
        let scenario = WindScenario {
            name: "skewed".into(),
            profiles: vec![
                WindProfile {
                    speed: 12.0,
                    angle: 0,
                    probability: 0.5,
                },
                WindProfile {
                    speed: 12.0,
                    angle: 180,
                    probability: 0.4,
                },
            ],
        };
        let err = scenario.validate().unwrap_err();
        assert!(matches!(err, WflopError::Validation(_)));
        assert!(err.to_string().contains("skewed"));
    }

    #[test]
    fn validate_rejects_path_hostile_scenario_names() {
        for name in ["a/b", "a\\b", "..", "up/../side"] {
            let scenario = WindScenario {
                name: name.into(),
                profiles: vec![WindProfile {
                    speed: 12.0,
                    angle: 270,
                    probability: 1.0,
                }],
            };
            let err = scenario.validate().unwrap_err();
            assert!(matches!(err, WflopError::Validation(_)), "name: {name}");
            assert!(err.to_string().contains("path separators"), "name: {name}");
        }
    }

    #[test]
    fn validate_rejects_duplicate_scenario_names() {
        let mut spec = GenerationSpec::default();
        let copy = spec.scenarios[0].clone();
        spec.scenarios.push(copy);
        let err = validate(&spec).unwrap_err();
        assert!(err.to_string().contains("duplicate scenario name"));
    }

    #[test]
    fn validate_rejects_oversized_dimension() {
        let mut spec = GenerationSpec::default();
        spec.dimensions.push(MAX_DIMENSION + 1);
        let err = validate(&spec).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
        assert_eq!(
            turbine_count(MAX_DIMENSION, 1.0),
            MAX_DIMENSION * MAX_DIMENSION
        );
    }

    #[test]
    fn validate_rejects_out_of_range_density() {
        let mut spec = GenerationSpec::default();
        spec.densities.push(1.5);
        assert!(validate(&spec).is_err());
    }

    #[test]
    fn resolve_covers_the_full_product() {
        let spec = GenerationSpec::default();
        let resolved = resolve_instances(&spec).unwrap();
        assert_eq!(
            resolved.len(),
            spec.dimensions.len() * spec.densities.len() * spec.scenarios.len()
        );
        for item in &resolved {
            assert_eq!(
                item.instance.number_of_turbines,
                turbine_count(item.dimension, item.density)
            );
        }
    }

    #[test]
    fn resolve_deduplicates_density_rounding_collisions() {
        let mut spec = GenerationSpec::default();
        spec.dimensions = vec![10];
        // both floor to 20 turbines on a 10×10 grid
        spec.densities = vec![0.2, 0.201];
        spec.scenarios.truncate(1);
        let resolved = resolve_instances(&spec).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].density, 0.2);
        assert_eq!(resolved[0].identity, "wf_dim10_turb20_single_dir");
    }

    #[test]
    fn spec_round_trips_through_yaml() {
        let spec = GenerationSpec::default();
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let parsed: GenerationSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.dimensions, spec.dimensions);
        assert_eq!(parsed.scenarios.len(), spec.scenarios.len());
        validate(&parsed).unwrap();
    }

    #[test]
    fn load_spec_reads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let spec = GenerationSpec::default();

        let json_path = dir.path().join("space.json");
        fs::write(&json_path, serde_json::to_string(&spec).unwrap()).unwrap();
        let from_json = load_spec_from_path(&json_path).unwrap();
        assert_eq!(from_json.dimensions, spec.dimensions);

        let yaml_path = dir.path().join("space.yaml");
        fs::write(&yaml_path, serde_yaml::to_string(&spec).unwrap()).unwrap();
        let from_yaml = load_spec_from_path(&yaml_path).unwrap();
        assert_eq!(from_yaml.densities, spec.densities);
    }
}
