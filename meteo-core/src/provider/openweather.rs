use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    config::WEATHER_TIMEOUT,
    error::{ProviderError, truncate_body},
    model::WeatherSnapshot,
};

use super::WeatherProvider;

const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current-weather provider backed by the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    language: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, language: String) -> Self {
        Self { api_key, language, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "unknown".to_string());

        WeatherSnapshot {
            city: self.name,
            temperature: round1(self.main.temp),
            feels_like: round1(self.main.feels_like),
            description,
            humidity: self.main.humidity,
            wind_speed: mps_to_kmh(self.wind.speed),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<Option<WeatherSnapshot>, ProviderError> {
        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .timeout(WEATHER_TIMEOUT)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();

        // Unknown city: the provider answers 404, not an error for us.
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(Some(parsed.into_snapshot()))
    }
}

/// OpenWeather reports wind in m/s; the assistant speaks km/h.
fn mps_to_kmh(speed: f64) -> f64 {
    round1(speed * 3.6)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_speed_is_converted_to_kmh() {
        assert_eq!(mps_to_kmh(5.0), 18.0);
        assert_eq!(mps_to_kmh(3.12), 11.2);
        assert_eq!(mps_to_kmh(0.0), 0.0);
    }

    #[test]
    fn temperatures_are_rounded_to_one_decimal() {
        assert_eq!(round1(21.456), 21.5);
        assert_eq!(round1(-0.04), -0.0);
    }

    #[test]
    fn response_maps_to_snapshot() {
        let raw = r#"{
            "name": "Paris",
            "main": { "temp": 18.46, "feels_like": 17.91, "humidity": 63 },
            "weather": [ { "description": "light rain" } ],
            "wind": { "speed": 4.5 }
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(raw).unwrap();
        let snapshot = parsed.into_snapshot();

        assert_eq!(snapshot.city, "Paris");
        assert_eq!(snapshot.temperature, 18.5);
        assert_eq!(snapshot.feels_like, 17.9);
        assert_eq!(snapshot.description, "light rain");
        assert_eq!(snapshot.humidity, 63);
        assert_eq!(snapshot.wind_speed, 16.2);
    }

    #[test]
    fn missing_weather_entry_falls_back_to_unknown() {
        let raw = r#"{
            "name": "Paris",
            "main": { "temp": 10.0, "feels_like": 9.0, "humidity": 70 },
            "weather": [],
            "wind": { "speed": 1.0 }
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_snapshot().description, "unknown");
    }
}
