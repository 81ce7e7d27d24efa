use serde::{Deserialize, Serialize};

/// Inbound chat request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub message: String,
}

/// Outcome of the city-extraction step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityExtraction {
    /// The model found a city name in the user text.
    City(String),
    /// The model decided to ask the user which city they mean.
    AskForCity { message: String },
    /// Extraction itself failed (network, non-JSON output, unexpected shape).
    Failed { message: String },
}

/// Current weather for a single query. Immutable, derived directly from the
/// provider response; nothing is cached or stored between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    /// Air temperature in °C, rounded to one decimal.
    pub temperature: f64,
    /// Perceived temperature in °C, rounded to one decimal.
    pub feels_like: f64,
    pub description: String,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Wind speed in km/h, rounded to one decimal.
    pub wind_speed: f64,
}

/// User-facing result of one chat turn. Every failure mode is recovered into
/// `success = false` plus a message; nothing here is fatal to the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WeatherSnapshot>,
}

impl ChatResponse {
    pub fn answered(message: String, snapshot: WeatherSnapshot) -> Self {
        Self { success: true, message, data: Some(snapshot) }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Lyon".to_string(),
            temperature: 21.4,
            feels_like: 20.9,
            description: "clear sky".to_string(),
            humidity: 48,
            wind_speed: 11.2,
        }
    }

    #[test]
    fn failed_response_omits_data_field() {
        let json = serde_json::to_value(ChatResponse::failed("no city")).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "no city");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn answered_response_includes_snapshot() {
        let json =
            serde_json::to_value(ChatResponse::answered("Sunny in Lyon.".to_string(), snapshot()))
                .unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["city"], "Lyon");
        assert_eq!(json["data"]["wind_speed"], 11.2);
    }
}
