use std::io::{self, Write};

use super::{TrackSnapshot, SLOT_TAGS, VERSION_HEADER};
use crate::{
    grid::{GridLayout, LayoutCell},
    race_track::{BestTimes, Weather},
};

/// Writes the sections of a track file one after another into a single output.
///
/// Every section method returns the writer again, so a whole file is written by chaining
/// them in file order and calling [`TrackWriter::finish`].
pub struct TrackWriter<W: Write> {
    out: W,
}

impl<W: Write> TrackWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Version line and the opening root tag.
    ///
    /// # Errors
    ///
    /// Passes on errors of the underlying writer.
    pub fn header(&mut self) -> io::Result<&mut Self> {
        writeln!(self.out, "{VERSION_HEADER}")?;
        writeln!(self.out, "<TrackGrid>")?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Passes on errors of the underlying writer.
    pub fn times(&mut self, times: &BestTimes) -> io::Result<&mut Self> {
        writeln!(self.out, "\t<Times>")?;
        for (tag, time) in SLOT_TAGS.iter().zip(times.0) {
            writeln!(self.out, "\t\t<{tag}>{time}</{tag}>")?;
        }
        writeln!(self.out, "\t</Times>")?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Passes on errors of the underlying writer.
    pub fn weather(&mut self, weather: &Weather) -> io::Result<&mut Self> {
        let clouds = &weather.clouds;
        writeln!(self.out, "\t<Weather>")?;
        writeln!(self.out, "\t\t<TimeOfDay>{}</TimeOfDay>", weather.time_of_day)?;
        writeln!(self.out, "\t\t<Clouds>")?;
        writeln!(
            self.out,
            "\t\t\t<MovementSpeedX>{}</MovementSpeedX>",
            clouds.movement.x
        )?;
        writeln!(
            self.out,
            "\t\t\t<MovementSpeedY>{}</MovementSpeedY>",
            clouds.movement.y
        )?;
        writeln!(
            self.out,
            "\t\t\t<GlobalCoverage>{}</GlobalCoverage>",
            clouds.global_coverage
        )?;
        writeln!(self.out, "\t\t</Clouds>")?;
        writeln!(self.out, "\t\t<Type>{}</Type>", weather.kind.token())?;
        writeln!(self.out, "\t</Weather>")?;
        Ok(self)
    }

    /// One row of piece type ids per grid row.
    ///
    /// # Errors
    ///
    /// Passes on errors of the underlying writer.
    pub fn track_data(&mut self, layout: &GridLayout) -> io::Result<&mut Self> {
        self.grid_section("TrackData", layout, |cell| cell.piece_type.id())
    }

    /// One row of rotations in degrees per grid row.
    ///
    /// # Errors
    ///
    /// Passes on errors of the underlying writer.
    pub fn rotation_data(&mut self, layout: &GridLayout) -> io::Result<&mut Self> {
        self.grid_section("RotationData", layout, |cell| cell.rotation.degrees())
    }

    fn grid_section(
        &mut self,
        tag: &str,
        layout: &GridLayout,
        value: impl Fn(&LayoutCell) -> u32,
    ) -> io::Result<&mut Self> {
        writeln!(self.out, "\t<{tag}>")?;
        for row in layout.rows() {
            let values: Vec<_> = row.iter().map(|cell| value(cell).to_string()).collect();
            writeln!(self.out, "\t\t{}", values.join(" "))?;
        }
        writeln!(self.out, "\t</{tag}>")?;
        Ok(self)
    }

    /// Closes the root tag and flushes the output.
    ///
    /// # Errors
    ///
    /// Passes on errors of the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out, "</TrackGrid>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Writes a complete track file.
///
/// # Errors
///
/// Passes on errors of the underlying writer.
pub fn write_track(out: &mut impl Write, snapshot: &TrackSnapshot) -> io::Result<()> {
    let mut writer = TrackWriter::new(out);
    writer
        .header()?
        .times(&snapshot.best_times)?
        .weather(&snapshot.weather)?
        .track_data(&snapshot.layout)?
        .rotation_data(&snapshot.layout)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use glam::{UVec2, Vec2};

    use crate::{
        race_track::{Clouds, WeatherType},
        track_piece::{Rotation, TrackPieceType},
    };

    use super::*;

    #[test]
    fn file_layout() -> Result<(), Box<dyn Error>> {
        let mut layout = GridLayout::new(UVec2::new(3, 2));
        layout.set(
            UVec2::new(1, 0),
            LayoutCell {
                piece_type: TrackPieceType::Corner,
                rotation: Rotation::Deg270,
            },
        )?;
        let snapshot = TrackSnapshot {
            best_times: BestTimes([61.5, 0.0, 0.0, 0.0, 0.0]),
            weather: Weather {
                time_of_day: 18.25,
                clouds: Clouds {
                    movement: Vec2::new(0.5, -0.125),
                    global_coverage: 0.75,
                },
                kind: WeatherType::Snow,
            },
            layout,
        };

        let mut out = Vec::new();
        write_track(&mut out, &snapshot)?;

        let expected = "\
<?xml version=\"1\" encoding=\"UTF-8\"?>
<TrackGrid>
\t<Times>
\t\t<First>61.5</First>
\t\t<Second>0</Second>
\t\t<Third>0</Third>
\t\t<Fourth>0</Fourth>
\t\t<Fifth>0</Fifth>
\t</Times>
\t<Weather>
\t\t<TimeOfDay>18.25</TimeOfDay>
\t\t<Clouds>
\t\t\t<MovementSpeedX>0.5</MovementSpeedX>
\t\t\t<MovementSpeedY>-0.125</MovementSpeedY>
\t\t\t<GlobalCoverage>0.75</GlobalCoverage>
\t\t</Clouds>
\t\t<Type>SNOW</Type>
\t</Weather>
\t<TrackData>
\t\t0 2 0
\t\t0 0 0
\t</TrackData>
\t<RotationData>
\t\t0 270 0
\t\t0 0 0
\t</RotationData>
</TrackGrid>
";
        assert_eq!(String::from_utf8(out)?, expected);
        Ok(())
    }
}
