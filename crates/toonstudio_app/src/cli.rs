// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command line interface.

use crate::commands::{parse_script, CommandError};
use crate::config::AppConfig;
use crate::manifest::ManifestWriter;
use crate::project::{MovieProject, ProjectError};
use crate::session::EditorSession;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toonstudio_timeline::{plan_export, CatalogError, CharacterCatalog, ExportError, ExportSettings};

/// Top-level application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Project file error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Edit script failed
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Catalog could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Export failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Script is not valid RON
    #[error("Script parse error: {0}")]
    Script(#[from] ron::error::SpannedError),

    /// File system error
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

/// toonstudio movie editor
#[derive(Parser, Debug)]
#[command(name = "toonstudio", version)]
pub struct Cli {
    /// Configuration file (RON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new movie project.
    New {
        /// Project directory
        dir: PathBuf,
        /// Movie name
        #[arg(long, default_value = "Untitled Movie")]
        name: String,
    },
    /// Print a summary of a movie.
    Info {
        /// Project file
        project: PathBuf,
    },
    /// Apply an edit script to a movie.
    Run {
        /// Project file
        project: PathBuf,
        /// Edit script (RON list of commands)
        #[arg(long)]
        script: PathBuf,
        /// Character catalog (RON list of entries)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Write the result back to the project file
        #[arg(long)]
        save: bool,
    },
    /// Write the frame manifest for the video encoder.
    Export {
        /// Project file
        project: PathBuf,
        /// Output manifest path (JSON lines)
        #[arg(long)]
        out: PathBuf,
        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,
        /// Frame width
        #[arg(long)]
        width: Option<u32>,
        /// Frame height
        #[arg(long)]
        height: Option<u32>,
        /// Hold each keyframe instead of blending between them
        #[arg(long)]
        stepped: bool,
    },
}

impl Cli {
    /// Execute the selected subcommand
    pub fn run(self, config: &AppConfig) -> Result<(), AppError> {
        match self.cmd {
            Command::New { dir, name } => {
                std::fs::create_dir_all(&dir)?;
                let path = MovieProject::project_file_path(&dir);
                let mut session = EditorSession::new(name, config.history_depth);
                session.export = config.export_settings();
                session.save_to_path(&path)?;
                println!("Created {}", path.display());
                Ok(())
            }
            Command::Info { project } => info(&project, config),
            Command::Run {
                project,
                script,
                catalog,
                save,
            } => run_script(&project, &script, catalog.as_deref(), save, config),
            Command::Export {
                project,
                out,
                fps,
                width,
                height,
                stepped,
            } => {
                let session = EditorSession::open(&project, config.history_depth)?;
                let mut settings = session.export;
                if let Some(fps) = fps {
                    settings.fps = fps;
                }
                if let Some(width) = width {
                    settings.width = width;
                }
                if let Some(height) = height {
                    settings.height = height;
                }
                if stepped {
                    settings.interpolate = false;
                }
                export(&session, &settings, &out)
            }
        }
    }
}

fn info(project: &Path, config: &AppConfig) -> Result<(), AppError> {
    let session = EditorSession::open(project, config.history_depth)?;
    let timeline = &session.timeline;

    println!("Movie: {}", session.name);
    println!(
        "Duration: {:.2}s at {} fps",
        timeline.end_time(),
        timeline.frame_rate
    );
    if let Some(audio) = &session.audio {
        println!("Audio: {} ({:.2}s - {:.2}s)", audio.asset_path, audio.offset, audio.end_time());
    }
    for (index, keyframe) in timeline.keyframes().iter().enumerate() {
        let marker = if index == timeline.current_index() { '>' } else { ' ' };
        println!(
            "{marker} [{index}] {:>7.2}s  {} character(s)",
            keyframe.time,
            keyframe.characters.len()
        );
        for character in keyframe.characters.iter() {
            println!(
                "        {} at ({:.1}, {:.1}) scale {:.2} rot {:.1} {}",
                character.name,
                character.position[0],
                character.position[1],
                character.scale,
                character.rotation,
                character.animation.name()
            );
        }
    }
    Ok(())
}

fn run_script(
    project: &Path,
    script: &Path,
    catalog: Option<&Path>,
    save: bool,
    config: &AppConfig,
) -> Result<(), AppError> {
    let mut session = EditorSession::open(project, config.history_depth)?;
    if let Some(catalog) = catalog {
        session.catalog = CharacterCatalog::from_ron_str(&std::fs::read_to_string(catalog)?)?;
    }

    let commands = parse_script(&std::fs::read_to_string(script)?)?;
    let report = session.run_script(&commands)?;
    println!(
        "Applied {} command(s), skipped {}; {} keyframe(s)",
        report.applied,
        report.skipped,
        session.timeline.keyframe_count()
    );
    let stats = session.history().stats();
    if let Some(last) = session.history().undo_description() {
        println!("Undo: {} step(s), last '{}'", stats.undo_count, last);
    }

    if save && session.has_unsaved_changes() {
        session.save()?;
    }
    Ok(())
}

fn export(session: &EditorSession, settings: &ExportSettings, out: &Path) -> Result<(), AppError> {
    let plan = plan_export(&session.timeline, session.audio.as_ref(), settings)?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = ManifestWriter::new(BufWriter::new(File::create(out)?));
    plan.drive(&mut writer)?;
    println!(
        "Wrote {} frame(s) ({:.2}s) to {}",
        writer.frames_written(),
        plan.duration(),
        out.display()
    );
    Ok(())
}
