//! Export pipeline: snapshot -> EHM file
//!
//! The skeleton is linearized first, then meshes are converted (on the rayon
//! pool when enabled, collected in scene order), then clips are compressed
//! against the skeleton. The finished file is serialized in memory; nothing
//! touches disk until the bytes are complete.

use std::fs;
use std::path::Path;

use ehm_common::EhmFile;
use rayon::prelude::*;

use crate::animation::compress_clip;
use crate::collect::collect;
use crate::error::{ExportError, ExportWarning};
use crate::mesh::{ConvertedMesh, convert_mesh};
use crate::options::ExportOptions;
use crate::scene::{MeshObject, SceneSnapshot};
use crate::skeleton::linearize;

/// In-memory export result
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub file: EhmFile,
    pub warnings: Vec<ExportWarning>,
}

/// Summary of a written file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    pub meshes: usize,
    pub vertices: usize,
    pub indices: usize,
    pub bones: usize,
    pub clips: usize,
    pub bytes: usize,
    pub warnings: Vec<ExportWarning>,
}

impl ExportReport {
    fn new(file: &EhmFile, bytes: usize, warnings: Vec<ExportWarning>) -> Self {
        Self {
            meshes: file.meshes.len(),
            vertices: file.meshes.iter().map(|m| m.vertices.len()).sum(),
            indices: file.meshes.iter().map(|m| m.indices.len()).sum(),
            bones: file.bones.len(),
            clips: file.clips.len(),
            bytes,
            warnings,
        }
    }
}

/// Run the whole pipeline and return the file model
pub fn build_file(scene: &SceneSnapshot, options: &ExportOptions) -> Result<ExportOutput, ExportError> {
    let collected = collect(scene, options);
    let mut warnings = collected.warnings;
    let axis = options.axis.map();

    let skeleton = collected
        .armature
        .map(|armature| linearize(armature, &axis))
        .transpose()?;

    let convert = |mesh: &MeshObject| convert_mesh(mesh, skeleton.as_ref(), options);
    let converted: Vec<ConvertedMesh> = if options.parallel {
        collected
            .meshes
            .par_iter()
            .map(|&mesh| convert(mesh))
            .collect::<Result<_, _>>()?
    } else {
        collected
            .meshes
            .iter()
            .map(|&mesh| convert(mesh))
            .collect::<Result<_, _>>()?
    };

    let mut file = EhmFile::default();
    for c in converted {
        warnings.extend(c.warnings);
        file.meshes.push(c.mesh);
    }

    if let Some(skeleton) = &skeleton {
        file.bones = skeleton.to_ehm();
        let rate = scene.playback_rate();
        for clip in &collected.clips {
            let compressed = compress_clip(clip, skeleton, rate, &axis)?;
            warnings.extend(compressed.warnings);
            file.clips.push(compressed.clip);
        }
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    Ok(ExportOutput { file, warnings })
}

/// Export a scene to EHM bytes
pub fn export(scene: &SceneSnapshot, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let output = build_file(scene, options)?;
    Ok(output.file.to_bytes()?)
}

/// Export a scene and write it to `path`. On failure the destination is
/// removed so no partial file is left behind.
pub fn export_to_file(
    scene: &SceneSnapshot,
    options: &ExportOptions,
    path: &Path,
) -> Result<ExportReport, ExportError> {
    let output = build_file(scene, options)?;
    let bytes = output.file.to_bytes()?;

    if let Err(e) = fs::write(path, &bytes) {
        if path.is_file() {
            let _ = fs::remove_file(path);
        }
        return Err(e.into());
    }

    let report = ExportReport::new(&output.file, bytes.len(), output.warnings);
    tracing::info!(
        "Wrote {:?}: {} meshes ({} vertices, {} indices), {} bones, {} clips, {} bytes",
        path,
        report.meshes,
        report.vertices,
        report.indices,
        report.bones,
        report.clips,
        report.bytes
    );
    Ok(report)
}
