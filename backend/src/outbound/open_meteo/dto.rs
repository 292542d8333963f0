//! Wire types for the Open-Meteo forecast endpoint.

use chrono::DateTime;
use serde::Deserialize;

use crate::domain::WeatherObservation;

/// Variables requested in the `current` block.
pub(super) const CURRENT_VARIABLES: &str = "temperature_2m,wind_speed_10m,wind_direction_10m,\
surface_pressure,precipitation,cloud_cover,weather_code";

#[derive(Debug, Deserialize)]
pub(super) struct ForecastDto {
    current: CurrentDto,
}

#[derive(Debug, Deserialize)]
struct CurrentDto {
    /// Unix seconds; requested with `timeformat=unixtime`.
    time: i64,
    temperature_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
    surface_pressure: Option<f64>,
    precipitation: Option<f64>,
    cloud_cover: Option<f64>,
    weather_code: Option<u8>,
}

impl ForecastDto {
    pub(super) fn into_observation(self) -> Result<WeatherObservation, String> {
        let current = self.current;
        let observed_at = DateTime::from_timestamp(current.time, 0)
            .ok_or_else(|| format!("observation time {} out of range", current.time))?;
        Ok(WeatherObservation {
            observed_at,
            temperature_c: current.temperature_2m,
            wind_speed_kmh: current.wind_speed_10m,
            wind_direction_deg: current.wind_direction_10m,
            pressure_hpa: current.surface_pressure,
            precipitation_mm: current.precipitation,
            cloud_cover_pct: current.cloud_cover,
            description: current.weather_code.map(describe_wmo_code).map(str::to_owned),
        })
    }
}

/// Short label for a WMO weather interpretation code.
fn describe_wmo_code(code: u8) -> &'static str {
    match code {
        0 => "clear sky",
        1..=3 => "partly cloudy",
        45 | 48 => "fog",
        51..=57 => "drizzle",
        61..=67 => "rain",
        71..=77 => "snow",
        80..=82 => "rain showers",
        85 | 86 => "snow showers",
        95..=99 => "thunderstorm",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "clear sky")]
    #[case(2, "partly cloudy")]
    #[case(63, "rain")]
    #[case(96, "thunderstorm")]
    #[case(200, "unknown")]
    fn labels_wmo_codes(#[case] code: u8, #[case] label: &str) {
        assert_eq!(describe_wmo_code(code), label);
    }
}
