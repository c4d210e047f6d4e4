//! Plain text track files.
//!
//! A track file looks like XML but is read and written line by line: one element per line,
//! nested sections indented by tabs, and the grid stored as rows of space separated
//! numbers.

mod reader;
mod writer;

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use glam::UVec2;
use log::info;
use thiserror::Error;

use crate::{
    grid::{GridLayout, GRID_SIZE},
    race_track::{BestTimes, Weather},
};

pub use reader::{read_track, LoadError, LoadErrorKind};
pub use writer::{write_track, TrackWriter};

/// The first line of every track file. Files starting with anything else are rejected.
pub const VERSION_HEADER: &str = r#"<?xml version="1" encoding="UTF-8"?>"#;

/// File extension of track files.
pub const EXTENSION: &str = "xml";

/// Element names of the best time slots, fastest first.
const SLOT_TAGS: [&str; 5] = ["First", "Second", "Third", "Fourth", "Fifth"];

/// Everything stored in a track file.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackSnapshot {
    pub best_times: BestTimes,
    pub weather: Weather,
    pub layout: GridLayout,
}

impl Default for TrackSnapshot {
    fn default() -> Self {
        Self {
            best_times: BestTimes::default(),
            weather: Weather::default(),
            layout: GridLayout::new(UVec2::splat(GRID_SIZE)),
        }
    }
}

#[derive(Debug, Error)]
#[error("cannot save track to {}: {source}", .path.display())]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The path of a track named `name` inside `directory`, with the track file extension added
/// unless `name` already carries one.
#[must_use]
pub fn track_path(directory: &Path, name: &str) -> PathBuf {
    let path = directory.join(name);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(EXTENSION)
    }
}

/// Writes a track file, creating its directory if necessary.
///
/// # Errors
///
/// Fails if the directory or the file cannot be created or written.
pub fn save_track(path: &Path, snapshot: &TrackSnapshot) -> Result<(), SaveError> {
    let wrap = |source| SaveError {
        path: path.to_owned(),
        source,
    };
    if let Some(directory) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(directory).map_err(wrap)?;
    }
    let mut out = BufWriter::new(File::create(path).map_err(wrap)?);
    write_track(&mut out, snapshot).map_err(wrap)?;
    info!("saved track to {}", path.display());
    Ok(())
}

/// Reads a track file.
///
/// # Errors
///
/// Fails if the file cannot be opened (reported as line `0`) or is malformed.
pub fn load_track(path: &Path) -> Result<TrackSnapshot, LoadError> {
    let file = File::open(path).map_err(|error| LoadError {
        line: 0,
        kind: error.into(),
    })?;
    let snapshot = read_track(BufReader::new(file))?;
    info!("loaded track from {}", path.display());
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::{env, error::Error, io::Cursor, process};

    use glam::Vec2;

    use crate::{
        grid::LayoutCell,
        race_track::{Clouds, WeatherType},
        track_piece::{Rotation, TrackPieceType},
    };

    use super::*;

    fn sample() -> Result<TrackSnapshot, Box<dyn Error>> {
        let mut snapshot = TrackSnapshot {
            best_times: BestTimes([58.375, 61.0, 75.25, 0.0, 0.0]),
            weather: Weather {
                time_of_day: 6.75,
                clouds: Clouds {
                    movement: Vec2::new(0.1, -0.033),
                    global_coverage: 0.9,
                },
                kind: WeatherType::Rain,
            },
            ..TrackSnapshot::default()
        };
        let pieces = [
            (UVec2::new(0, 0), TrackPieceType::Start, Rotation::Deg90),
            (UVec2::new(1, 0), TrackPieceType::Straight, Rotation::Deg90),
            (UVec2::new(2, 0), TrackPieceType::Corner, Rotation::Deg180),
            (UVec2::new(2, 1), TrackPieceType::Ramp, Rotation::Deg0),
            (UVec2::new(15, 15), TrackPieceType::Finish, Rotation::Deg270),
        ];
        for (position, piece_type, rotation) in pieces {
            snapshot.layout.set(
                position,
                LayoutCell {
                    piece_type,
                    rotation,
                },
            )?;
        }
        Ok(snapshot)
    }

    #[test]
    fn written_tracks_read_back_equal() -> Result<(), Box<dyn Error>> {
        let snapshot = sample()?;
        let mut buffer = Vec::new();
        write_track(&mut buffer, &snapshot)?;

        let loaded = read_track(Cursor::new(buffer))?;
        assert_eq!(loaded, snapshot);
        Ok(())
    }

    #[test]
    fn empty_track_reads_back_equal() -> Result<(), Box<dyn Error>> {
        let mut buffer = Vec::new();
        write_track(&mut buffer, &TrackSnapshot::default())?;
        assert_eq!(read_track(Cursor::new(buffer))?, TrackSnapshot::default());
        Ok(())
    }

    #[test]
    fn track_paths_get_an_extension() {
        let directory = Path::new("Saved Tracks");
        assert_eq!(
            track_path(directory, "monza"),
            Path::new("Saved Tracks/monza.xml")
        );
        assert_eq!(
            track_path(directory, "track.xml"),
            Path::new("Saved Tracks/track.xml")
        );
    }

    #[test]
    fn save_and_load_through_the_file_system() -> Result<(), Box<dyn Error>> {
        let directory = env::temp_dir().join(format!("track-file-test-{}", process::id()));
        let path = track_path(&directory.join("nested"), "round-trip");
        let snapshot = sample()?;

        save_track(&path, &snapshot)?;
        let loaded = load_track(&path);
        fs::remove_dir_all(&directory)?;

        assert_eq!(loaded?, snapshot);
        Ok(())
    }

    #[test]
    fn missing_files_fail_on_line_zero() {
        let result = load_track(Path::new("does/not/exist.xml"));
        assert!(
            matches!(
                result,
                Err(LoadError {
                    line: 0,
                    kind: LoadErrorKind::Io(_)
                })
            ),
            "{result:?}"
        );
    }
}
