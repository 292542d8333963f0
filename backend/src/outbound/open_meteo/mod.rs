//! Open-Meteo outbound adapter.
//!
//! Thin HTTP implementation of the `WeatherSource` port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_OPEN_METEO_URL, OpenMeteoSource};
