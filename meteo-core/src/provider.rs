use std::fmt::Debug;

use async_trait::async_trait;

use crate::{error::ProviderError, model::WeatherSnapshot};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Abstraction over a current-weather provider so the agent can be tested
/// against a double.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current weather for a city by name.
    ///
    /// Returns `Ok(None)` when the provider does not know the city; any other
    /// failure is a [`ProviderError`].
    async fn current_weather(&self, city: &str) -> Result<Option<WeatherSnapshot>, ProviderError>;
}
