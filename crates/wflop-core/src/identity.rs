//! Deterministic instance identity scheme.
//!
//! The identity string doubles as the artifact filename stem and as the
//! correlation key joining generated instances to solver results, so both
//! sides of the pipeline must derive it from the same function.

/// Derive the identity for a `(dimension, numberOfTurbines, scenario)` triple.
///
/// Injective over distinct triples: every component is embedded verbatim
/// between fixed markers, so two identities collide only when the triples
/// are equal.
pub fn instance_identity(dimension: u32, number_of_turbines: u32, scenario_name: &str) -> String {
    format!("wf_dim{dimension}_turb{number_of_turbines}_{scenario_name}")
}

/// Recover the `(dimension, numberOfTurbines, scenario)` triple from an
/// identity string. Returns `None` for anything that was not produced by
/// [`instance_identity`].
pub fn parse_identity(identity: &str) -> Option<(u32, u32, &str)> {
    let rest = identity.strip_prefix("wf_dim")?;
    let (dimension, rest) = rest.split_once("_turb")?;
    let (turbines, scenario) = rest.split_once('_')?;
    if scenario.is_empty() {
        return None;
    }
    Some((dimension.parse().ok()?, turbines.parse().ok()?, scenario))
}
