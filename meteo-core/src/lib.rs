//! Core library for the `meteo` conversational weather assistant.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstractions over the two external collaborators (language model, weather provider)
//! - The orchestration agent (extract city, fetch weather, compose reply)
//! - Shared domain models (snapshots, chat responses)
//!
//! It is used by `meteo-server`, but can also be reused by other binaries or services.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod provider;

pub use agent::WeatherAgent;
pub use config::Config;
pub use error::{LlmError, ProviderError};
pub use llm::{ChatClient, ChatRequest, MistralClient};
pub use model::{ChatMessage, ChatResponse, CityExtraction, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider};
