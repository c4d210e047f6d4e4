use std::{
    io::{self, BufRead, Lines},
    str::FromStr,
};

use glam::UVec2;
use log::trace;
use thiserror::Error;

use super::{TrackSnapshot, SLOT_TAGS, VERSION_HEADER};
use crate::{
    grid::{GridLayout, LayoutCell, GRID_SIZE},
    race_track::{BestTimes, Clouds, UnknownWeather, Weather, WeatherType},
    track_piece::{Rotation, TrackPieceType, UnknownPieceId},
};

#[derive(Debug, Error)]
pub enum LoadErrorKind {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("the file is empty")]
    MissingHeader,
    #[error("unsupported version header {found:?}")]
    VersionMismatch { found: String },
    #[error("the file ended inside of <{section}>")]
    UnexpectedEof { section: &'static str },
    #[error("the file contains no <{section}> section")]
    MissingSection { section: &'static str },
    #[error("{value:?} is not a number")]
    InvalidNumber { value: String },
    #[error(transparent)]
    UnknownWeather(#[from] UnknownWeather),
    #[error(transparent)]
    UnknownPieceId(#[from] UnknownPieceId),
    #[error("{degrees} is not a multiple of 90 below 360")]
    InvalidRotation { degrees: u32 },
    #[error("cell in row {row}, column {column} lies outside of the grid")]
    OutOfRange { row: usize, column: usize },
}

/// A track file could not be read. `line` is 1-based; `0` means the file could not be
/// opened at all.
#[derive(Debug, Error)]
#[error("line {line}: {kind}")]
pub struct LoadError {
    pub line: usize,
    #[source]
    pub kind: LoadErrorKind,
}

/// Hands out trimmed lines and remembers where it is for error reporting.
struct LineCursor<R> {
    lines: Lines<R>,
    number: usize,
}

impl<R: BufRead> LineCursor<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            number: 0,
        }
    }

    /// The next line as written, without its line ending.
    fn next_raw_line(&mut self) -> Result<Option<String>, LoadError> {
        let Some(line) = self.lines.next() else {
            return Ok(None);
        };
        self.number += 1;
        let mut line = line.map_err(|error| self.error(error.into()))?;
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn next_line(&mut self) -> Result<Option<String>, LoadError> {
        Ok(self
            .next_raw_line()?
            .map(|line| line.trim().to_owned()))
    }

    /// Like [`LineCursor::next_line`], but running out of lines is an error.
    fn next_in(&mut self, section: &'static str) -> Result<String, LoadError> {
        self.next_line()?
            .ok_or_else(|| self.error(LoadErrorKind::UnexpectedEof { section }))
    }

    fn error(&self, kind: LoadErrorKind) -> LoadError {
        LoadError {
            line: self.number,
            kind,
        }
    }

    fn attach<T>(&self, result: Result<T, impl Into<LoadErrorKind>>) -> Result<T, LoadError> {
        result.map_err(|error| self.error(error.into()))
    }
}

/// Splits `<Tag>value</Tag>` into tag and value. Whitespace around the value is dropped.
fn element(line: &str) -> Option<(&str, &str)> {
    let (tag, rest) = line.strip_prefix('<')?.split_once('>')?;
    let value = rest.strip_suffix('>')?.strip_suffix(tag)?.strip_suffix("</")?;
    Some((tag, value.trim()))
}

fn is_closing(line: &str, section: &str) -> bool {
    line.strip_prefix("</")
        .and_then(|rest| rest.strip_suffix('>'))
        == Some(section)
}

fn number<T: FromStr>(value: &str) -> Result<T, LoadErrorKind> {
    value.parse().map_err(|_err| LoadErrorKind::InvalidNumber {
        value: value.to_owned(),
    })
}

/// Reads a complete track file.
///
/// Sections may come in any order and may be missing, except for `<TrackData>`. Missing
/// values keep their defaults, unknown lines are skipped.
///
/// # Errors
///
/// Fails on the first malformed line; see [`LoadErrorKind`].
pub fn read_track(reader: impl BufRead) -> Result<TrackSnapshot, LoadError> {
    let mut lines = LineCursor::new(reader);

    let header = lines
        .next_raw_line()?
        .ok_or_else(|| lines.error(LoadErrorKind::MissingHeader))?;
    if header != VERSION_HEADER {
        return Err(lines.error(LoadErrorKind::VersionMismatch { found: header }));
    }

    let mut best_times = BestTimes::default();
    let mut weather = Weather::default();
    let mut piece_types = None;
    let mut rotations = None;

    while let Some(line) = lines.next_line()? {
        match line.as_str() {
            "<Times>" => best_times = read_times(&mut lines)?,
            "<Weather>" => weather = read_weather(&mut lines)?,
            "<TrackData>" => {
                piece_types = Some(read_grid(&mut lines, "TrackData", |value| {
                    Ok(TrackPieceType::try_from(number::<u32>(value)?)?)
                })?);
            }
            "<RotationData>" => {
                rotations = Some(read_grid(&mut lines, "RotationData", |value| {
                    let degrees = number(value)?;
                    Rotation::from_degrees(degrees)
                        .ok_or(LoadErrorKind::InvalidRotation { degrees })
                })?);
            }
            "" | "<TrackGrid>" | "</TrackGrid>" => {}
            other => trace!("skipping line {}: {other:?}", lines.number),
        }
    }

    let piece_types = piece_types.ok_or_else(|| {
        lines.error(LoadErrorKind::MissingSection {
            section: "TrackData",
        })
    })?;
    let rotations = rotations.unwrap_or_default();

    let mut layout = GridLayout::new(UVec2::splat(GRID_SIZE));
    for (position, piece_type) in piece_types.cells() {
        if piece_type == TrackPieceType::Empty {
            continue;
        }
        let cell = LayoutCell {
            piece_type,
            rotation: rotations.get(position),
        };
        layout.set(position, cell).map_err(|_err| {
            lines.error(LoadErrorKind::OutOfRange {
                row: position.y as usize,
                column: position.x as usize,
            })
        })?;
    }

    Ok(TrackSnapshot {
        best_times,
        weather,
        layout,
    })
}

fn read_times(lines: &mut LineCursor<impl BufRead>) -> Result<BestTimes, LoadError> {
    let mut times = BestTimes::default();
    loop {
        let line = lines.next_in("Times")?;
        if is_closing(&line, "Times") {
            return Ok(times);
        }
        let Some((tag, value)) = element(&line) else {
            trace!("skipping line {}: {line:?}", lines.number);
            continue;
        };
        let slot = SLOT_TAGS
            .iter()
            .position(|slot_tag| *slot_tag == tag)
            .and_then(|index| times.0.get_mut(index));
        if let Some(slot) = slot {
            *slot = lines.attach(number(value))?;
        }
    }
}

fn read_weather(lines: &mut LineCursor<impl BufRead>) -> Result<Weather, LoadError> {
    let mut weather = Weather::default();
    loop {
        let line = lines.next_in("Weather")?;
        if is_closing(&line, "Weather") {
            return Ok(weather);
        }
        if line == "<Clouds>" {
            weather.clouds = read_clouds(lines)?;
            continue;
        }
        match element(&line) {
            Some(("TimeOfDay", value)) => weather.time_of_day = lines.attach(number(value))?,
            Some(("Type", value)) => weather.kind = lines.attach(WeatherType::from_token(value))?,
            _ => trace!("skipping line {}: {line:?}", lines.number),
        }
    }
}

fn read_clouds(lines: &mut LineCursor<impl BufRead>) -> Result<Clouds, LoadError> {
    let mut clouds = Clouds::default();
    loop {
        let line = lines.next_in("Clouds")?;
        if is_closing(&line, "Clouds") {
            return Ok(clouds);
        }
        match element(&line) {
            Some(("MovementSpeedX", value)) => clouds.movement.x = lines.attach(number(value))?,
            Some(("MovementSpeedY", value)) => clouds.movement.y = lines.attach(number(value))?,
            Some(("GlobalCoverage", value)) => {
                clouds.global_coverage = lines.attach(number(value))?;
            }
            _ => trace!("skipping line {}: {line:?}", lines.number),
        }
    }
}

/// Values of a grid section in row-major order; cells missing at the end of a row keep
/// their default.
struct GridValues<T> {
    values: Vec<T>,
}

impl<T: Copy + Default> Default for GridValues<T> {
    fn default() -> Self {
        let cell_count = usize::try_from(GRID_SIZE * GRID_SIZE).unwrap_or_default();
        Self {
            values: vec![T::default(); cell_count],
        }
    }
}

impl<T: Copy + Default> GridValues<T> {
    fn get(&self, position: UVec2) -> T {
        let index = usize::try_from(position.y * GRID_SIZE + position.x).unwrap_or(usize::MAX);
        self.values.get(index).copied().unwrap_or_default()
    }

    fn cells(&self) -> impl Iterator<Item = (UVec2, T)> + '_ {
        (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| UVec2::new(x, y)))
            .zip(self.values.iter().copied())
    }
}

fn read_grid<T: Copy + Default>(
    lines: &mut LineCursor<impl BufRead>,
    section: &'static str,
    parse: impl Fn(&str) -> Result<T, LoadErrorKind>,
) -> Result<GridValues<T>, LoadError> {
    let size = usize::try_from(GRID_SIZE).unwrap_or_default();
    let mut grid = GridValues::default();
    let mut row = 0;
    loop {
        let line = lines.next_in(section)?;
        if is_closing(&line, section) {
            return Ok(grid);
        }
        if line.is_empty() {
            continue;
        }
        for (column, value) in line.split_whitespace().enumerate() {
            let out_of_range = || lines.error(LoadErrorKind::OutOfRange { row, column });
            if row >= size || column >= size {
                return Err(out_of_range());
            }
            let cell = grid
                .values
                .get_mut(row * size + column)
                .ok_or_else(out_of_range)?;
            *cell = lines.attach(parse(value))?;
        }
        row += 1;
    }
}
