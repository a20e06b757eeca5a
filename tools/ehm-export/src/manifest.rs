//! Manifest parsing and batch builds
//!
//! Parses `ehm.toml` and exports every listed scene. Relative paths resolve
//! against the manifest's directory.
//!
//! ```toml
//! [output]
//! dir = "build/"
//!
//! [defaults]
//! axis = "yzx"
//!
//! [[exports]]
//! scene = "scenes/hero.json"
//! output = "hero.ehm"
//! weld_normals = true
//! ```

use anyhow::{Context, Result};
use hashbrown::HashSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::axis::AxisConversion;
use crate::export::{ExportReport, export_to_file};
use crate::mesh::TriangulationMethod;
use crate::options::ExportOptions;
use crate::scene::SceneSnapshot;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub defaults: ExportOptions,
    #[serde(default)]
    pub exports: Vec<ExportEntry>,
    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("ehm/")
}

/// One scene to export, with optional overrides of `[defaults]`
#[derive(Debug, Deserialize)]
pub struct ExportEntry {
    pub scene: PathBuf,
    /// File name under the output directory (defaults to `<scene stem>.ehm`)
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub selection_only: Option<bool>,
    #[serde(default)]
    pub axis: Option<AxisConversion>,
    #[serde(default)]
    pub triangulation: Option<TriangulationMethod>,
    #[serde(default)]
    pub weld_normals: Option<bool>,
    #[serde(default)]
    pub skeleton: Option<bool>,
    #[serde(default)]
    pub animations: Option<bool>,
}

impl ExportEntry {
    /// `defaults` with this entry's overrides applied
    pub fn options(&self, defaults: &ExportOptions) -> ExportOptions {
        let mut options = defaults.clone();
        if let Some(v) = self.selection_only {
            options.selection_only = v;
        }
        if let Some(v) = self.axis {
            options.axis = v;
        }
        if let Some(v) = self.triangulation {
            options.triangulation = v;
        }
        if let Some(v) = self.weld_normals {
            options.weld.include_normals = v;
        }
        if let Some(v) = self.skeleton {
            options.export_skeleton = v;
        }
        if let Some(v) = self.animations {
            options.export_animations = v;
        }
        options
    }

    pub fn output_name(&self) -> PathBuf {
        match &self.output {
            Some(p) => p.clone(),
            None => {
                let stem = self.scene.file_stem().unwrap_or(self.scene.as_os_str());
                Path::new(stem).with_extension(ehm_common::EHM_EXT)
            }
        }
    }
}

impl Manifest {
    pub fn from_toml(text: &str, base_dir: &Path) -> Result<Self> {
        let mut manifest: Manifest = toml::from_str(text)?;
        manifest.base_dir = base_dir.to_path_buf();
        Ok(manifest)
    }

    pub fn scene_path(&self, entry: &ExportEntry) -> PathBuf {
        self.base_dir.join(&entry.scene)
    }

    pub fn output_dir(&self, output_override: Option<&Path>) -> PathBuf {
        match output_override {
            Some(dir) => dir.to_path_buf(),
            None => self.base_dir.join(&self.output.dir),
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let base_dir = path.parent().unwrap_or(Path::new(""));
    Manifest::from_toml(&content, base_dir)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.exports.is_empty() {
        anyhow::bail!("Manifest lists no exports");
    }

    let mut outputs = HashSet::new();
    for (i, entry) in manifest.exports.iter().enumerate() {
        let scene = manifest.scene_path(entry);
        if !scene.is_file() {
            anyhow::bail!("Export #{} scene not found: {:?}", i, scene);
        }
        let output = entry.output_name();
        if output.extension().and_then(|e| e.to_str()) != Some(ehm_common::EHM_EXT) {
            anyhow::bail!(
                "Export #{} output {:?} must have the .{} extension",
                i,
                output,
                ehm_common::EHM_EXT
            );
        }
        if !outputs.insert(output.clone()) {
            anyhow::bail!("Export #{} writes {:?}, which another entry already writes", i, output);
        }
    }
    Ok(())
}

/// Export every entry of a manifest
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<ExportReport>> {
    validate(manifest)?;

    let output_dir = manifest.output_dir(output_override);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut reports = Vec::with_capacity(manifest.exports.len());
    for entry in &manifest.exports {
        let scene_path = manifest.scene_path(entry);
        let output = output_dir.join(entry.output_name());
        tracing::info!("Exporting scene: {:?} -> {:?}", scene_path, output);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }

        let scene = SceneSnapshot::load(&scene_path)
            .with_context(|| format!("Failed to load scene: {:?}", scene_path))?;
        let report = export_to_file(&scene, &entry.options(&manifest.defaults), &output)
            .with_context(|| format!("Failed to export {:?}", scene_path))?;
        reports.push(report);
    }
    Ok(reports)
}
