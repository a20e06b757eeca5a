//! ehm-export - Event Horizon Mesh export tool
//!
//! Converts scene snapshots (JSON) to .ehm binary files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ehm_export::mesh::TriangulationMethod;
use ehm_export::{AxisConversion, EHM_EXT, EhmFile, ExportOptions, SceneSnapshot, manifest};

#[derive(Parser)]
#[command(name = "ehm-export")]
#[command(about = "Event Horizon Mesh export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single scene snapshot
    Export {
        /// Input scene snapshot (.json)
        input: PathBuf,

        /// Output .ehm file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only export selected objects
        #[arg(long)]
        selection_only: bool,

        /// Axis conversion (identity, yzx, z_up_to_y_up)
        #[arg(long, default_value = "yzx")]
        axis: AxisConversion,

        /// Keep vertices with different normals apart (hard edges)
        #[arg(long)]
        weld_normals: bool,

        /// Triangulate with plain fans instead of the beauty heuristic (quads still split on the shorter diagonal)
        #[arg(long)]
        fan: bool,

        /// Convert meshes on a single thread
        #[arg(long)]
        serial: bool,

        /// Skip the skeleton (and with it all animation)
        #[arg(long)]
        no_skeleton: bool,

        /// Skip animation clips
        #[arg(long)]
        no_animations: bool,
    },

    /// Export every scene listed in a manifest file
    Build {
        /// Path to ehm.toml manifest
        #[arg(default_value = "ehm.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without building
    Check {
        /// Path to ehm.toml manifest
        #[arg(default_value = "ehm.toml")]
        manifest: PathBuf,
    },

    /// Print a summary of an .ehm file
    Inspect {
        /// Input .ehm file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            output,
            selection_only,
            axis,
            weld_normals,
            fan,
            serial,
            no_skeleton,
            no_animations,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(EHM_EXT));
            let mut options = ExportOptions {
                selection_only,
                axis,
                export_skeleton: !no_skeleton,
                export_animations: !no_animations,
                parallel: !serial,
                ..Default::default()
            };
            options.weld.include_normals = weld_normals;
            if fan {
                options.triangulation = TriangulationMethod::Fan;
            }

            tracing::info!(
                "Exporting {:?} -> {:?} (axis {})",
                input,
                output,
                options.axis.name()
            );
            let scene = SceneSnapshot::load(&input)
                .with_context(|| format!("Failed to load scene: {:?}", input))?;
            ehm_export::export_to_file(&scene, &options, &output)
                .with_context(|| format!("Failed to export {:?}", input))?;
            tracing::info!("Done!");
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building exports from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            let reports = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} files written", reports.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Inspect { input } => inspect(&input)?,
    }

    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let file =
        EhmFile::from_bytes(&bytes).with_context(|| format!("Failed to decode {:?}", path))?;

    tracing::info!("{:?}: EHM {}, {} bytes", path, file.version, bytes.len());
    for mesh in &file.meshes {
        let skinned = mesh.vertices.iter().filter(|v| v.bound_influences() > 0).count();
        tracing::info!(
            "  mesh '{}': {} vertices ({} skinned), {} triangles",
            mesh.name,
            mesh.vertices.len(),
            skinned,
            mesh.triangle_count()
        );
    }
    if !file.bones.is_empty() {
        let roots = file.bones.iter().filter(|b| b.is_root()).count();
        tracing::info!("  skeleton: {} bones, {} roots", file.bones.len(), roots);
    }
    for clip in &file.clips {
        let changesets: usize = clip.tracks.iter().map(|t| t.keyframes.len()).sum();
        tracing::info!(
            "  clip '{}': {:.3}s, {} tracks, {} changesets",
            clip.name,
            clip.duration,
            clip.tracks.len(),
            changesets
        );
    }
    Ok(())
}
