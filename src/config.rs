use std::env;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const VERTEX_AI_LOCATION: &str = "us-central1";
const VERTEX_AI_MODEL: &str = "gemini-1.5-pro";

/// Reads an environment variable, treating empty values as unset.
fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexAiConfig {
    pub project_id: String,
    pub location: String,
    pub model: String,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapsConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PaymentConfig {
    pub razorpay_key_id: Option<String>,
    pub razorpay_key_secret: Option<String>,
    pub stripe_publishable_key: Option<String>,
    pub stripe_secret_key: Option<String>,
}

impl PaymentConfig {
    pub fn razorpay_configured(&self) -> bool {
        self.razorpay_key_id.is_some() && self.razorpay_key_secret.is_some()
    }

    pub fn stripe_configured(&self) -> bool {
        self.stripe_publishable_key.is_some() && self.stripe_secret_key.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryConfig {
    pub api_url: String,
    pub api_key: String,
}

/// Process configuration. Every credential is optional; a missing one puts the
/// matching service on its mock path instead of failing start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub default_language: String,
    pub vertex_ai: Option<VertexAiConfig>,
    pub maps: Option<MapsConfig>,
    pub weather: Option<WeatherConfig>,
    pub payment: PaymentConfig,
    pub firebase: FirebaseConfig,
    pub inventory: Option<InventoryConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            environment: "development".to_string(),
            default_language: "en".to_string(),
            vertex_ai: None,
            maps: None,
            weather: None,
            payment: PaymentConfig::default(),
            firebase: FirebaseConfig::default(),
            inventory: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let vertex_ai = var("GOOGLE_CLOUD_PROJECT_ID").map(|project_id| VertexAiConfig {
            project_id,
            location: var("VERTEX_AI_LOCATION").unwrap_or_else(|| VERTEX_AI_LOCATION.to_string()),
            model: var("VERTEX_AI_MODEL").unwrap_or_else(|| VERTEX_AI_MODEL.to_string()),
            access_token: var("GOOGLE_CLOUD_ACCESS_TOKEN"),
        });

        let inventory = match (var("EMT_INVENTORY_API_URL"), var("EMT_INVENTORY_API_KEY")) {
            (Some(api_url), Some(api_key)) => Some(InventoryConfig { api_url, api_key }),
            _ => None,
        };

        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: var("RUST_ENV").unwrap_or(defaults.environment),
            default_language: var("DEFAULT_LANGUAGE").unwrap_or(defaults.default_language),
            vertex_ai,
            maps: var("GOOGLE_MAPS_API_KEY").map(|api_key| MapsConfig { api_key }),
            weather: var("OPENWEATHER_API_KEY").map(|api_key| WeatherConfig { api_key }),
            payment: PaymentConfig {
                razorpay_key_id: var("RAZORPAY_KEY_ID"),
                razorpay_key_secret: var("RAZORPAY_KEY_SECRET"),
                stripe_publishable_key: var("STRIPE_PUBLISHABLE_KEY"),
                stripe_secret_key: var("STRIPE_SECRET_KEY"),
            },
            firebase: FirebaseConfig {
                api_key: var("FIREBASE_API_KEY"),
                project_id: var("FIREBASE_PROJECT_ID"),
            },
            inventory,
        }
    }
}

/// Masks a credential for display, keeping the first and last four characters.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
