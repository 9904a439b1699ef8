use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::spec::{resolve_instances, GenerationSpec};

/// One generated instance: its identity and where it was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceArtifact {
    pub id: String,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstanceManifest {
    pub generated_at: DateTime<Utc>,
    pub num_instances: usize,
    pub instances: Vec<InstanceArtifact>,
}

/// Materialize a generation spec into per-instance JSON artifacts plus a
/// manifest.
///
/// **Algorithm:**
/// 1. Validate the spec and resolve the full parameter product.
/// 2. Write `out_dir/<identity>.json` for each instance, atomically
///    (temp file + rename), so an interrupted batch never leaves a
///    half-written artifact.
/// 3. Collect `InstanceArtifact` records and log each as a discovery-feed
///    entry.
/// 4. Write `out_dir/instance_manifest.json` listing all artifacts.
///
/// **Output structure:**
/// ```text
/// out_dir/
///   instance_manifest.json
///   wf_dim10_turb20_single_dir.json
///   wf_dim10_turb40_single_dir.json
///   ...
/// ```
///
/// Re-running with the same spec overwrites the same paths; identities are
/// deterministic, so regeneration never duplicates artifacts.
pub fn materialize_instances(
    spec: &GenerationSpec,
    out_dir: &Path,
) -> Result<Vec<InstanceArtifact>> {
    let resolved = resolve_instances(spec)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating instance output directory '{}'", out_dir.display()))?;
    let mut artifacts = Vec::with_capacity(resolved.len());
    for item in &resolved {
        let path = out_dir.join(format!("{}.json", item.identity));
        let json = serde_json::to_string_pretty(&item.instance)
            .context("serializing problem instance to JSON")?;
        write_atomic(&path, &json)
            .with_context(|| format!("writing instance artifact '{}'", path.display()))?;
        let artifact = InstanceArtifact {
            id: item.identity.clone(),
            path: path.display().to_string(),
        };
        tracing::info!(id = %artifact.id, path = %artifact.path, "materialized problem instance");
        artifacts.push(artifact);
    }
    let manifest = InstanceManifest {
        generated_at: Utc::now(),
        num_instances: artifacts.len(),
        instances: artifacts.clone(),
    };
    let manifest_path = out_dir.join("instance_manifest.json");
    write_manifest(&manifest_path, &manifest)?;
    Ok(artifacts)
}

/// Write to a temp sibling first, then rename into place. Rename is atomic
/// on the same filesystem, so readers see the artifact complete or absent.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

/// Manifest writes go through the same temp-then-rename path as instance
/// artifacts, so an interrupted batch never leaves a truncated manifest.
pub fn write_manifest(path: &Path, manifest: &InstanceManifest) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("serializing instance manifest to JSON")?;
    write_atomic(path, &json)
        .with_context(|| format!("writing instance manifest '{}'", path.display()))?;
    Ok(())
}

pub fn load_manifest(path: &Path) -> Result<InstanceManifest> {
    let file = File::open(path)
        .with_context(|| format!("opening instance manifest '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing instance manifest '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};
    use wflop_core::ProblemInstance;

    fn small_spec() -> GenerationSpec {
        let mut spec = GenerationSpec::default();
        spec.dimensions = vec![10];
        spec.densities = vec![0.2];
        spec.scenarios.truncate(1); // single_dir
        spec
    }

    #[test]
    fn materialize_writes_expected_artifact() {
        let dir = tempdir().unwrap();
        let artifacts = materialize_instances(&small_spec(), dir.path()).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].id, "wf_dim10_turb20_single_dir");

        let artifact_path = dir.path().join("wf_dim10_turb20_single_dir.json");
        assert!(artifact_path.exists());
        let text = fs::read_to_string(&artifact_path).unwrap();
        let instance: ProblemInstance = serde_json::from_str(&text).unwrap();
        assert_eq!(instance.dimension, 10);
        assert_eq!(instance.number_of_turbines, 20);
        assert_eq!(instance.wind_profiles.len(), 1);
        assert_eq!(instance.wind_profiles[0].speed, 12.0);
        assert_eq!(instance.wind_profiles[0].angle, 270);
        assert_eq!(instance.wind_profiles[0].probability, 1.0);
        // no leftover temp files
        assert!(!dir.path().join("wf_dim10_turb20_single_dir.json.tmp").exists());
    }

    #[test]
    fn regeneration_overwrites_instead_of_duplicating() {
        let dir = tempdir().unwrap();
        let spec = small_spec();
        materialize_instances(&spec, dir.path()).unwrap();
        materialize_instances(&spec, dir.path()).unwrap();
        let json_files = fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".json")
            })
            .count();
        // one artifact plus the manifest
        assert_eq!(json_files, 2);
    }

    #[test]
    fn manifest_lists_every_artifact() {
        let dir = tempdir().unwrap();
        let spec = GenerationSpec::default();
        let artifacts = materialize_instances(&spec, dir.path()).unwrap();
        let manifest = load_manifest(&dir.path().join("instance_manifest.json")).unwrap();
        assert_eq!(manifest.num_instances, artifacts.len());
        assert_eq!(manifest.instances.len(), artifacts.len());
        assert!(manifest
            .instances
            .iter()
            .any(|a| a.id == "wf_dim50_turb2000_varying_nonuniform"));
    }

    #[test]
    fn invalid_spec_aborts_before_any_write() {
        let dir = tempdir().unwrap();
        let mut spec = small_spec();
        spec.scenarios[0].profiles[0].probability = 0.5;
        let err = materialize_instances(&spec, dir.path()).unwrap_err();
        assert!(err.to_string().contains("single_dir"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn hostile_scenario_name_aborts_before_any_write() {
        let dir = tempdir().unwrap();
        let mut spec = small_spec();
        spec.scenarios[0].name = "a/b".into();
        let err = materialize_instances(&spec, dir.path()).unwrap_err();
        assert!(err.to_string().contains("path separators"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn manifest_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        materialize_instances(&small_spec(), dir.path()).unwrap();
        let manifest_path = dir.path().join("instance_manifest.json");
        assert!(manifest_path.exists());
        assert!(!dir.path().join("instance_manifest.json.tmp").exists());
        load_manifest(&manifest_path).unwrap();
    }

    #[test]
    fn manifest_writes_and_reads_back() {
        let manifest = InstanceManifest {
            generated_at: Utc::now(),
            num_instances: 1,
            instances: vec![InstanceArtifact {
                id: "wf_dim10_turb20_single_dir".into(),
                path: "instances/wf_dim10_turb20_single_dir.json".into(),
            }],
        };
        let tmp = NamedTempFile::new().unwrap();
        write_manifest(tmp.path(), &manifest).unwrap();
        let parsed = load_manifest(tmp.path()).unwrap();
        assert_eq!(parsed.num_instances, 1);
        assert_eq!(parsed.instances[0].id, manifest.instances[0].id);
    }
}
