use anyhow::{bail, Context, Result};

/// Swahili cue words used by the Tagalog correction rule unless overridden
pub const DEFAULT_SWAHILI_KEYWORDS: [&str; 5] = ["habari", "mambo", "napenda", "safari", "jambo"];

/// Confidence ceiling applied when a Tagalog detection is corrected to Swahili
pub const DEFAULT_SWAHILI_CONFIDENCE_CAP: f64 = 0.90;

#[derive(Debug, Clone)]
pub struct Config {
    // AWS
    pub aws_region: String,
    pub comprehend_endpoint_url: Option<String>,

    // Correction policy
    pub swahili_keywords: Vec<String>,
    pub swahili_confidence_cap: f64,

    // Server
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_region: "us-east-1".to_string(),
            comprehend_endpoint_url: None,
            swahili_keywords: DEFAULT_SWAHILI_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            swahili_confidence_cap: DEFAULT_SWAHILI_CONFIDENCE_CAP,
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let swahili_keywords = match std::env::var("SWAHILI_KEYWORDS") {
            Ok(raw) => parse_keyword_list(&raw),
            Err(_) => defaults.swahili_keywords,
        };

        let swahili_confidence_cap = match std::env::var("SWAHILI_CONFIDENCE_CAP") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .context("SWAHILI_CONFIDENCE_CAP must be a number")?,
            Err(_) => defaults.swahili_confidence_cap,
        };
        if !(0.0..=1.0).contains(&swahili_confidence_cap) {
            bail!(
                "SWAHILI_CONFIDENCE_CAP must be between 0 and 1, got {}",
                swahili_confidence_cap
            );
        }

        Ok(Self {
            // AWS - credentials come from the standard provider chain
            aws_region: std::env::var("AWS_REGION").unwrap_or(defaults.aws_region),
            comprehend_endpoint_url: std::env::var("COMPREHEND_ENDPOINT_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            swahili_keywords,
            swahili_confidence_cap,

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        })
    }
}

/// Split a comma-separated keyword list, lowercasing and dropping blanks
fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
