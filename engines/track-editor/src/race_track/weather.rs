use std::fmt;

use glam::Vec2;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown weather type {0:?}")]
pub struct UnknownWeather(pub String);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeatherType {
    #[default]
    Sun,
    Rain,
    Snow,
    Ice,
}

impl WeatherType {
    /// The keyword representing this weather in track files.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Sun => "SUN",
            Self::Rain => "RAIN",
            Self::Snow => "SNOW",
            Self::Ice => "ICE",
        }
    }

    /// # Errors
    ///
    /// Fails for anything but the exact (upper case) keywords.
    pub fn from_token(token: &str) -> Result<Self, UnknownWeather> {
        match token {
            "SUN" => Ok(Self::Sun),
            "RAIN" => Ok(Self::Rain),
            "SNOW" => Ok(Self::Snow),
            "ICE" => Ok(Self::Ice),
            other => Err(UnknownWeather(other.to_owned())),
        }
    }
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clouds {
    /// cloud layer drift in texture units per second
    pub movement: Vec2,
    /// share of the sky covered, `0.0..=1.0`
    pub global_coverage: f32,
}

impl Default for Clouds {
    fn default() -> Self {
        Self {
            movement: Vec2::new(0.01, 0.005),
            global_coverage: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weather {
    /// hours since midnight
    pub time_of_day: f32,
    pub clouds: Clouds,
    pub kind: WeatherType,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            time_of_day: 12.0,
            clouds: Clouds::default(),
            kind: WeatherType::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for kind in [
            WeatherType::Sun,
            WeatherType::Rain,
            WeatherType::Snow,
            WeatherType::Ice,
        ] {
            assert_eq!(WeatherType::from_token(kind.token()), Ok(kind));
        }
        assert_eq!(
            WeatherType::from_token("sun"),
            Err(UnknownWeather("sun".to_owned()))
        );
    }
}
