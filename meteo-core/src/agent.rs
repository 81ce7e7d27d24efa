//! The request orchestrator: extract a city from free text, fetch current
//! weather for it, and phrase a short reply. One request is processed
//! end-to-end with no state kept between calls.

use serde::Deserialize;

use crate::{
    error::ProviderError,
    llm::{ChatClient, ChatRequest},
    model::{ChatResponse, CityExtraction, WeatherSnapshot},
    provider::WeatherProvider,
};

/// System instruction for the extraction step. The model is told to answer
/// with one of two small JSON objects; anything else is treated as a failure.
const EXTRACTION_PROMPT: &str = "\
You are a friendly, concise weather assistant. You are an automated agent; \
user messages are not stored.

Your task:
1. Extract the city name from the user's message.
2. If no city is mentioned, politely ask which city they mean.
3. Never invent weather data.

Answer with JSON only:
- city found: {\"city\": \"<city name>\"}
- no city: {\"action\": \"ask_for_city\", \"message\": \"<your question>\"}";

const EXTRACTION_APOLOGY: &str =
    "Sorry, I did not quite get that. Which city are you interested in?";

const EMPTY_MESSAGE_REPLY: &str = "Please type a message first, for example: weather in Lyon?";

const PROVIDER_TROUBLE_REPLY: &str =
    "Sorry, I am having technical trouble right now. Please try again in a moment.";

/// Raw shape of the model's extraction answer. Both variants are folded into
/// one struct because the model output is untrusted and may mix fields.
#[derive(Debug, Deserialize)]
struct RawExtraction {
    city: Option<String>,
    action: Option<String>,
    message: Option<String>,
}

/// Sequences the two external collaborators for one chat turn.
#[derive(Debug)]
pub struct WeatherAgent {
    llm: Box<dyn ChatClient>,
    weather: Box<dyn WeatherProvider>,
}

impl WeatherAgent {
    pub fn new(llm: Box<dyn ChatClient>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { llm, weather }
    }

    /// Step 1: derive a structured city name from free text.
    ///
    /// Any transport or JSON-shape failure collapses into
    /// [`CityExtraction::Failed`] with a generic apology; extraction never
    /// propagates an error.
    pub async fn extract_city(&self, text: &str) -> CityExtraction {
        let request = ChatRequest::extraction(EXTRACTION_PROMPT, text);

        let answer = match self.llm.complete(&request).await {
            Ok(answer) => answer,
            Err(_) => return CityExtraction::Failed { message: EXTRACTION_APOLOGY.to_string() },
        };

        let Ok(raw) = serde_json::from_str::<RawExtraction>(&answer) else {
            return CityExtraction::Failed { message: EXTRACTION_APOLOGY.to_string() };
        };

        if let Some(city) = raw.city.filter(|c| !c.trim().is_empty()) {
            return CityExtraction::City(city);
        }

        if raw.action.as_deref() == Some("ask_for_city") {
            let message = raw
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| EXTRACTION_APOLOGY.to_string());
            return CityExtraction::AskForCity { message };
        }

        CityExtraction::Failed { message: EXTRACTION_APOLOGY.to_string() }
    }

    /// Step 2: fetch current weather. `Ok(None)` means the city is unknown.
    pub async fn fetch_weather(
        &self,
        city: &str,
    ) -> Result<Option<WeatherSnapshot>, ProviderError> {
        self.weather.current_weather(city).await
    }

    /// Step 3: phrase a short natural reply from the snapshot, falling back to
    /// a deterministic sentence if the model is unavailable.
    pub async fn compose_reply(&self, snapshot: &WeatherSnapshot) -> String {
        let prompt = format!(
            "Write a short, friendly reply (2-3 sentences max) for this weather report:\n\
             \n\
             City: {}\n\
             Temperature: {}°C (feels like {}°C)\n\
             Conditions: {}\n\
             Humidity: {}%\n\
             Wind: {} km/h\n\
             \n\
             Be natural and conversational, give one practical tip (clothing, \
             umbrella, ...), and stay concise.",
            snapshot.city,
            snapshot.temperature,
            snapshot.feels_like,
            snapshot.description,
            snapshot.humidity,
            snapshot.wind_speed,
        );

        match self.llm.complete(&ChatRequest::prose(prompt)).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            _ => fallback_reply(snapshot),
        }
    }

    /// Run one chat turn end-to-end. Every failure mode is recovered into a
    /// `success = false` response; this method never errors.
    pub async fn handle_message(&self, text: &str) -> ChatResponse {
        if text.trim().is_empty() {
            return ChatResponse::failed(EMPTY_MESSAGE_REPLY);
        }

        let city = match self.extract_city(text).await {
            CityExtraction::City(city) => city,
            CityExtraction::AskForCity { message } | CityExtraction::Failed { message } => {
                return ChatResponse::failed(message);
            }
        };

        let snapshot = match self.fetch_weather(&city).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                return ChatResponse::failed(format!(
                    "Sorry, I could not find the city '{city}'. Could you check the spelling?"
                ));
            }
            Err(_) => return ChatResponse::failed(PROVIDER_TROUBLE_REPLY),
        };

        let reply = self.compose_reply(&snapshot).await;

        ChatResponse::answered(reply, snapshot)
    }
}

/// Deterministic reply used when the model cannot phrase one.
fn fallback_reply(snapshot: &WeatherSnapshot) -> String {
    format!(
        "In {}, it is currently {}°C with {}.",
        snapshot.city, snapshot.temperature, snapshot.description
    )
}
