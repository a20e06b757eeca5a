//! ehm-export library
//!
//! Converts a scene snapshot (meshes, one armature, animation clips) into an
//! EHM binary file. Used by the `ehm-export` CLI and by host plugins that
//! hand over a snapshot directly.

pub mod animation;
pub mod axis;
pub mod collect;
pub mod error;
pub mod export;
pub mod manifest;
pub mod mesh;
pub mod options;
pub mod scene;
pub mod skeleton;

// Re-export the entry points
pub use axis::{AxisConversion, AxisMap};
pub use error::{ExportError, ExportWarning};
pub use export::{ExportOutput, ExportReport, build_file, export, export_to_file};
pub use options::ExportOptions;
pub use scene::SceneSnapshot;

// Re-export the file model so callers don't need a direct ehm-common dependency
pub use ehm_common::{EHM_EXT, EHM_VERSION, EhmFile, EhmVersion};
