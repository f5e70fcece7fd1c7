//! Persistent layout settings.
//!
//! Every heuristic the engine uses is a named value here so it can be tuned
//! without touching the force policy. The defaults are the tuned values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// All tunable layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    // Canvas
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Seed for initial positions; entropy when unset
    pub seed: Option<u64>,

    // Forces
    /// Fraction of each raw force delta that is committed (0, 1]; 1 commits
    /// forces in full
    pub damping: f64,
    /// Base fraction of the distance past the horizon covered by attraction
    pub attraction_rate: f64,
    /// Horizon for parent/child snapping and the minimum attraction horizon
    pub snap_horizon: f64,
    /// Degree difference above which a node is drawn toward a bigger neighbor
    pub degree_gap: usize,
    /// Relatedness needed before a low-degree node is drawn to a hub
    pub related_threshold: f64,
    /// Attraction horizon grows by this much per degree of the moving node
    pub horizon_per_degree: f64,
    /// Pairs at or below this multiple of the minimum relatedness repel
    pub weak_relation_factor: f64,
    /// Range of the repulsion between weakly related nodes
    pub far_repulsion_radius: f64,
    /// Range of the fallback repulsion every non-hub pair gets
    pub near_repulsion_radius: f64,
    /// Degrees a repelled node is rotated about the repelling one
    pub repulsion_angle_step: f64,
    /// Distance a repelled node is pushed outward
    pub repulsion_push: f64,
    /// Scale of the linear push between two hubs
    pub hub_repulsion_factor: f64,
    /// Largest single push between two hubs
    pub hub_repulsion_bound: f64,
    /// Cap in degrees on the rotation around a shared-neighbor hub
    pub rotation_max_angle: f64,
    /// Radius of the circle isolated nodes are placed on, as a multiple of
    /// the canvas width
    pub isolated_orbit_factor: f64,

    // Edge crossings
    /// Run the crossing pass after each tick
    pub resolve_crossings: bool,
    /// Distance a crossing endpoint is moved off the other edge
    pub crossing_nudge: f64,
    /// Only edges longer than this are untangled
    pub crossing_min_length: f64,

    // Relatedness
    /// Maximum number of paths counted per node pair
    pub path_limit: Option<usize>,

    // Driver
    pub max_ticks: usize,
    /// Stop once a tick moves no coordinate by more than this
    pub settle_threshold: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            // Canvas
            canvas_width: 1536.0,
            canvas_height: 1024.0,
            seed: None,

            // Forces
            damping: 1.0,
            attraction_rate: 0.25,
            snap_horizon: 60.0,
            degree_gap: 3,
            related_threshold: 0.1,
            horizon_per_degree: 10.0,
            weak_relation_factor: 3.0,
            far_repulsion_radius: 80.0,
            near_repulsion_radius: 25.0,
            repulsion_angle_step: 2.0,
            repulsion_push: 1.0,
            hub_repulsion_factor: 4.0,
            hub_repulsion_bound: 500.0,
            rotation_max_angle: 360.0,
            isolated_orbit_factor: 1.0,

            // Edge crossings
            resolve_crossings: false,
            crossing_nudge: 2.25,
            crossing_min_length: 360.0,

            // Relatedness
            path_limit: None,

            // Driver
            max_ticks: 500,
            settle_threshold: 0.5,
        }
    }
}

impl LayoutSettings {
    /// Get the path to the settings file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("kinlayout");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the user config directory, returning defaults if
    /// the file doesn't exist or is invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("could not determine config directory, using defaults");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&contents).map_err(|source| Error::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to the user config directory, returning where they went
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| Error::SettingsIo {
            path: PathBuf::from("settings.json"),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine config directory",
            ),
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to an explicit file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_error = |source| Error::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| Error::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_error)?;
        tracing::info!("saved settings to {:?}", path);
        Ok(())
    }
}
