//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{Correction, Output};
use super::parse::{parse_inset, parse_point, parse_rect, parse_viewport};
use crate::geometry::{Point, Rect, Size};

/// Position dog-filter sprites over detected face landmarks
#[derive(Parser, Debug)]
#[command(name = "landmark-overlay")]
#[command(version, about = "Real-time face landmark overlay engine", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the pipeline on a synthetic camera with a scripted detector
    Run(RunArgs),
    /// Map one landmark group into pixel space and print its region
    Map(MapArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Detection script (JSON)
    #[arg(long, short)]
    pub script: PathBuf,

    /// Stop after this many processed frames
    #[arg(long, short = 'n')]
    pub frames: Option<u64>,

    /// Capture frame rate
    #[arg(long)]
    pub fps: Option<u32>,

    /// Viewport size (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Size>,

    /// Front-camera orientation correction
    #[arg(long)]
    pub correction: Option<Correction>,

    /// Scene output format
    #[arg(long, short)]
    pub output: Option<Output>,

    /// Outline eyebrows, nose crest and lips in the debug layer
    #[arg(long)]
    pub extra_landmarks: bool,

    /// Hide sprites whose landmarks are missing instead of leaving them in place
    #[arg(long)]
    pub hide_missing: bool,

    /// Disable the debug layer
    #[arg(long)]
    pub no_debug: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MapArgs {
    /// Normalized face box (x,y,width,height)
    #[arg(long = "box", value_parser = parse_rect)]
    pub face_box: Rect,

    /// Viewport size (WIDTHxHEIGHT)
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Size,

    /// Landmark point normalized to the face box (x,y); repeatable
    #[arg(long = "point", short, value_parser = parse_point)]
    pub points: Vec<Point>,

    /// Padding around the group bounds
    #[arg(long, value_parser = parse_inset)]
    pub inset: Option<f64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
    /// Print the config file path
    Path,
}
