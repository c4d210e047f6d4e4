//! Everything that makes up a track: the grid of pieces, the ground below it, the weather
//! and the best lap times.

pub mod weather;

use glam::{Mat4, Vec2, Vec3};
use log::{debug, info};
use track_framework_common::render::{ModelHandle, RenderBackend};

use crate::{
    grid::{coordinates::HALF_EXTENT, EditorGrid, GridError},
    model::ModelCache,
    piece_factory::TrackPieceFactory,
    track_file::TrackSnapshot,
};

pub use weather::{Clouds, UnknownWeather, Weather, WeatherType};

/// Number of lap times kept per track.
pub const BEST_TIME_SLOTS: usize = 5;

/// The fastest laps in seconds, ascending. Unused slots hold `0.0` and sort last.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BestTimes(pub [f32; BEST_TIME_SLOTS]);

impl BestTimes {
    /// Inserts a lap time and returns its rank (`0` is the fastest), or `None` if it is not
    /// fast enough to be kept.
    pub fn record(&mut self, time: f32) -> Option<usize> {
        if !time.is_finite() || time <= 0.0 {
            return None;
        }
        let rank = self
            .0
            .iter()
            .position(|&slot| slot <= 0.0 || time < slot)?;
        let tail = self.0.get_mut(rank..)?;
        tail.rotate_right(1);
        *tail.first_mut()? = time;
        Some(rank)
    }

    /// The recorded times, fastest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied().filter(|&time| time > 0.0)
    }
}

/// The flat terrain covering the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ground {
    model: ModelHandle,
    transform: Mat4,
}

impl Ground {
    /// Stretches a unit plane over the whole grid, just below the pieces.
    #[must_use]
    pub fn new(model: ModelHandle) -> Self {
        let transform = Mat4::from_translation(Vec3::new(0.0, -0.01, 0.0))
            * Mat4::from_scale(Vec3::new(HALF_EXTENT * 2.0, 1.0, HALF_EXTENT * 2.0));
        Self { model, transform }
    }

    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn render(&self, backend: &mut dyn RenderBackend) {
        backend.render_model_at(self.model, self.transform);
    }
}

#[derive(Debug)]
pub struct RaceTrack {
    best_times: BestTimes,
    weather: Weather,
    grid: EditorGrid,
    ground: Ground,
    cloud_offset: Vec2,
}

impl RaceTrack {
    #[must_use]
    pub fn new(models: &mut ModelCache) -> Self {
        Self {
            best_times: BestTimes::default(),
            weather: Weather::default(),
            grid: EditorGrid::new(),
            ground: Ground::new(models.load("ground")),
            cloud_offset: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &EditorGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut EditorGrid {
        &mut self.grid
    }

    #[must_use]
    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    #[must_use]
    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    #[must_use]
    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }

    /// See [`BestTimes::record`].
    pub fn record_time(&mut self, time: f32) -> Option<usize> {
        let rank = self.best_times.record(time);
        if let Some(rank) = rank {
            info!("new best time #{}: {time:.2}s", rank + 1);
        }
        rank
    }

    /// Current position of the cloud layer, wrapping in `0.0..1.0`.
    #[must_use]
    pub fn cloud_offset(&self) -> Vec2 {
        self.cloud_offset
    }

    /// Lets the clouds drift.
    pub fn update(&mut self, delta_time: f32) {
        let offset = self.cloud_offset + self.weather.clouds.movement * delta_time;
        self.cloud_offset = Vec2::new(offset.x.rem_euclid(1.0), offset.y.rem_euclid(1.0));
    }

    /// Draws the ground and every piece.
    pub fn render(&self, backend: &mut dyn RenderBackend) {
        self.ground.render(backend);
        for piece in self.grid.iter_pieces() {
            backend.render_model_at(piece.model(), piece.world_transform());
        }
    }

    /// Everything a track file stores.
    #[must_use]
    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            best_times: self.best_times,
            weather: self.weather,
            layout: self.grid.layout(),
        }
    }

    /// Replaces times, weather and pieces with the content of `snapshot`.
    ///
    /// # Errors
    ///
    /// Fails if a piece cannot be built. The track is left unchanged in that case.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &TrackSnapshot,
        factory: &TrackPieceFactory,
    ) -> Result<(), GridError> {
        let grid = EditorGrid::from_layout(&snapshot.layout, factory)?;
        debug!("applying track with {} pieces", grid.occupied_count());
        self.grid = grid;
        self.best_times = snapshot.best_times;
        self.weather = snapshot.weather;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec2;

    use crate::{
        grid::{GridLayout, LayoutCell},
        track_piece::{Rotation, TrackPieceType},
    };

    use super::*;

    #[test]
    fn best_times_stay_sorted() {
        let mut times = BestTimes::default();
        assert_eq!(times.record(42.0), Some(0));
        assert_eq!(times.record(50.0), Some(1));
        assert_eq!(times.record(30.0), Some(0));
        assert_eq!(times.0, [30.0, 42.0, 50.0, 0.0, 0.0]);
        assert_eq!(times.iter().count(), 3);
    }

    #[test]
    fn slow_laps_fall_off() {
        let mut times = BestTimes([10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(times.record(60.0), None);
        assert_eq!(times.record(25.0), Some(2));
        assert_eq!(times.0, [10.0, 20.0, 25.0, 30.0, 40.0]);
        assert_eq!(times.record(f32::NAN), None);
        assert_eq!(times.record(-1.0), None);
    }

    #[test]
    fn clouds_wrap_around() {
        let mut track = RaceTrack::new(&mut ModelCache::new());
        track.set_weather(Weather {
            clouds: Clouds {
                movement: Vec2::new(0.25, -0.25),
                global_coverage: 0.5,
            },
            ..Weather::default()
        });
        track.update(5.0);
        assert!(
            track.cloud_offset().abs_diff_eq(Vec2::new(0.25, 0.75), 1e-6),
            "{}",
            track.cloud_offset()
        );
    }

    #[test]
    fn ground_covers_the_grid() {
        let ground = Ground::new(ModelHandle(0));
        let corner = ground.transform().transform_point3(Vec3::new(0.5, 0.0, -0.5));
        assert!(corner.abs_diff_eq(Vec3::new(64.0, -0.01, -64.0), 1e-4), "{corner}");
    }

    #[test]
    fn failed_snapshot_leaves_the_track_alone() -> Result<(), GridError> {
        let mut models = ModelCache::new();
        let factory = TrackPieceFactory::with_default_pieces(&mut models);
        let mut track = RaceTrack::new(&mut models);
        track
            .grid_mut()
            .set_piece(TrackPieceType::Straight, UVec2::new(1, 1), &factory)?;
        let before = track.snapshot();

        let mut layout = GridLayout::new(UVec2::splat(16));
        layout.set(
            UVec2::new(5, 5),
            LayoutCell {
                piece_type: TrackPieceType::Bridge,
                rotation: Rotation::Deg90,
            },
        )?;
        let snapshot = TrackSnapshot {
            best_times: BestTimes([1.0; BEST_TIME_SLOTS]),
            weather: Weather::default(),
            layout,
        };

        assert!(track
            .apply_snapshot(&snapshot, &TrackPieceFactory::new())
            .is_err());
        assert_eq!(track.snapshot(), before);

        track.apply_snapshot(&snapshot, &factory)?;
        assert_eq!(track.snapshot(), snapshot);
        Ok(())
    }
}
