//! Settings read at startup. Every field is optional in the configuration file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    camera::{Lens, ScrollDolly, Speeds},
    track_file::track_path,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub tracks: TrackConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Track Editor".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// world units per second
    pub move_speed: f32,
    /// radians per second
    pub rotation_speed: f32,
    /// distance per scroll wheel notch
    pub scroll_step: f32,
    pub forward_cap: f32,
    pub backward_cap: f32,
    /// distance of the race camera to the car
    pub orbit_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
            move_speed: 20.0,
            rotation_speed: 1.5,
            scroll_step: 4.0,
            forward_cap: 40.0,
            backward_cap: 40.0,
            orbit_distance: 30.0,
        }
    }
}

impl CameraConfig {
    #[must_use]
    pub fn lens(&self, aspect_ratio: f32) -> Lens {
        Lens {
            fov_degrees: self.fov,
            aspect_ratio,
            near: self.near,
            far: self.far,
        }
    }

    #[must_use]
    pub fn speeds(&self) -> Speeds {
        Speeds {
            movement: self.move_speed,
            rotation: self.rotation_speed,
        }
    }

    #[must_use]
    pub fn dolly(&self) -> ScrollDolly {
        ScrollDolly::new(self.scroll_step, self.forward_cap, self.backward_cap)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackConfig {
    pub save_directory: PathBuf,
    pub file_name: String,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            save_directory: PathBuf::from("Saved Tracks"),
            file_name: "track.xml".to_owned(),
        }
    }
}

impl TrackConfig {
    /// Where the editor saves to and loads from.
    #[must_use]
    pub fn track_path(&self) -> PathBuf {
        track_path(Path::new(&self.save_directory), &self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() -> Result<(), serde_json::Error> {
        let config: EditorConfig = serde_json::from_str("{}")?;
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.window.title, "Track Editor");
        assert_eq!(
            config.tracks.track_path(),
            Path::new("Saved Tracks").join("track.xml")
        );
        Ok(())
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() -> Result<(), serde_json::Error> {
        let config: EditorConfig = serde_json::from_str(
            r#"{
                "camera": { "fov": 75.0, "forward_cap": 10.0 },
                "tracks": { "file_name": "monza" }
            }"#,
        )?;
        assert!((config.camera.fov - 75.0).abs() < f32::EPSILON);
        assert!((config.camera.dolly().forward_cap - 10.0).abs() < f32::EPSILON);
        assert!((config.camera.backward_cap - 40.0).abs() < f32::EPSILON);
        assert_eq!(
            config.tracks.track_path(),
            Path::new("Saved Tracks").join("monza.xml")
        );
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<EditorConfig>(r#"{ "camera": { "zoom": 2 } }"#);
        assert!(result.is_err());
    }
}
