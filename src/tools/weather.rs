//! Weather tool: current conditions via the OpenWeatherMap API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use tracing::debug;

use super::base::Tool;

/// OpenWeatherMap "current weather by city name" endpoint.
const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Environment variable holding the API key.
const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Client-side bound on the whole request, body read included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Cap on the returned string, truncation marker included.
const MAX_OUTPUT_LEN: usize = 10_000;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Outcome of a single weather lookup.
///
/// Every way a lookup can end maps to one variant. Conversion to plain
/// text happens once, at the tool boundary; the host contract is that
/// tools always return a string, so nothing here is a `Result` error.
#[derive(Debug)]
pub enum LookupOutcome {
    /// Rendered weather report.
    Success(String),
    /// No API key was injected and the environment variable is unset.
    CredentialMissing,
    /// The request exceeded the client-side timeout.
    Timeout,
    /// Any other transport failure, non-2xx statuses included.
    Transport(String),
    /// Valid HTTP response whose payload signals an application error.
    Provider(String),
    /// Last-resort catch-all: malformed JSON, unexpected payload shape.
    Internal(String),
}

impl LookupOutcome {
    /// Render the outcome as the text handed back to the host.
    pub fn into_text(self) -> String {
        match self {
            Self::Success(report) => report,
            Self::CredentialMissing => "Error: OpenWeatherMap API key not found. \
                 Please set the OPENWEATHER_API_KEY environment variable."
                .to_string(),
            Self::Timeout => "The request timed out. Please try again later.".to_string(),
            Self::Transport(detail) | Self::Provider(detail) => {
                format!("Error fetching weather data: {}", detail)
            }
            Self::Internal(detail) => format!("An unexpected error occurred: {}", detail),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider payload
// ---------------------------------------------------------------------------

/// Current-conditions payload, decoded leniently.
///
/// Every field is optional: an incomplete success payload renders
/// placeholders instead of failing the call.
#[derive(Debug, Deserialize)]
struct WeatherPayload {
    /// Status sentinel; a number on success, a string in error payloads.
    cod: Option<serde_json::Value>,
    message: Option<String>,
    name: Option<String>,
    sys: Option<SysInfo>,
    weather: Option<Vec<Condition>>,
    main: Option<MainInfo>,
    wind: Option<WindInfo>,
}

#[derive(Debug, Deserialize)]
struct SysInfo {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainInfo {
    temp: Option<Number>,
    feels_like: Option<Number>,
    humidity: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: Option<Number>,
}

// ---------------------------------------------------------------------------
// WeatherTool
// ---------------------------------------------------------------------------

/// Tool to look up current weather for a location.
pub struct WeatherTool {
    api_key: Option<String>,
    endpoint: String,
    timeout: Duration,
    client: Client,
}

impl WeatherTool {
    /// Create a new weather tool.
    ///
    /// An injected `api_key` takes precedence; if it is empty/None, the
    /// `OPENWEATHER_API_KEY` environment variable is checked. The resolved
    /// credential is fixed for the lifetime of the tool.
    pub fn new(api_key: Option<String>) -> Self {
        let resolved_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty());

        Self {
            api_key: resolved_key,
            endpoint: OPENWEATHER_ENDPOINT.to_string(),
            timeout: REQUEST_TIMEOUT,
            client: Client::new(),
        }
    }

    /// Look up current weather for `location`.
    ///
    /// The location travels to the provider verbatim; malformed or empty
    /// values come back as a provider error rather than being rejected
    /// locally.
    pub async fn lookup(&self, location: &str) -> LookupOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            return LookupOutcome::CredentialMissing;
        };

        debug!("fetching current weather for '{}'", location);

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("q", location), ("appid", api_key), ("units", "metric")])
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return LookupOutcome::Timeout,
            Err(e) => return LookupOutcome::Transport(e.to_string()),
        };

        let payload: WeatherPayload = match response.json().await {
            Ok(payload) => payload,
            Err(e) if e.is_timeout() => return LookupOutcome::Timeout,
            Err(e) => return LookupOutcome::Internal(e.to_string()),
        };

        // The sentinel is 200 on success; error payloads carry it as a
        // string (e.g. "404") alongside a message field.
        if payload.cod.as_ref().and_then(serde_json::Value::as_i64) != Some(200) {
            let message = payload
                .message
                .unwrap_or_else(|| "Unknown error occurred.".to_string());
            return LookupOutcome::Provider(message);
        }

        LookupOutcome::Success(render_report(&payload))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Gets current weather information for a specified location. \
         Requires an OpenWeatherMap API key set in the environment variable \
         'OPENWEATHER_API_KEY'. Returns a formatted string containing \
         temperature (in °C), humidity, weather description, and wind speed."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "The name of the city (optionally with country code, e.g., 'London,UK') to fetch weather for."
                }
            },
            "required": ["location"]
        })
    }

    async fn invoke(&self, params: HashMap<String, serde_json::Value>) -> String {
        let location = match params.get("location").and_then(|v| v.as_str()) {
            Some(l) => l,
            None => return "Error: 'location' parameter is required".to_string(),
        };

        truncate_output(self.lookup(location).await.into_text())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the fixed multi-line report, with placeholders for anything the
/// payload left out.
fn render_report(payload: &WeatherPayload) -> String {
    let city = payload.name.as_deref().unwrap_or("Unknown location");
    let country = payload
        .sys
        .as_ref()
        .and_then(|s| s.country.as_deref())
        .filter(|c| !c.is_empty())
        .unwrap_or("N/A");
    let description = payload
        .weather
        .as_ref()
        .and_then(|conditions| conditions.first())
        .and_then(|c| c.description.as_deref())
        .unwrap_or("No description");

    let main = payload.main.as_ref();
    let temp = render_number(main.and_then(|m| m.temp.as_ref()));
    let feels_like = render_number(main.and_then(|m| m.feels_like.as_ref()));
    let humidity = render_number(main.and_then(|m| m.humidity.as_ref()));
    let wind_speed = render_number(payload.wind.as_ref().and_then(|w| w.speed.as_ref()));

    format!(
        "**Weather in {}, {}**\n\n\
         - Description: {}\n\
         - Temperature: {}°C (feels like {}°C)\n\
         - Humidity: {}%\n\
         - Wind Speed: {} m/s",
        city,
        country,
        capitalize(description),
        temp,
        feels_like,
        humidity,
        wind_speed
    )
}

/// Echo a JSON number exactly as the provider sent it (`14.0` stays
/// `14.0`, `80` stays `80`); missing values render as `unknown`.
fn render_number(value: Option<&Number>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "unknown".to_string(),
    }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Enforce the output cap; the marker fits inside it.
fn truncate_output(mut text: String) -> String {
    const MARKER: &str = "\n... (output truncated)";

    if text.len() <= MAX_OUTPUT_LEN {
        return text;
    }

    let mut cut = MAX_OUTPUT_LEN - MARKER.len();
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text.push_str(MARKER);
    text
}
