use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{config::mask_secret, AppState};

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: BTreeMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn missing(vars: &[&str], fallback: &str) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(format!(
                "Missing configuration: {} ({})",
                vars.join(", "),
                fallback
            )),
        }
    }
}

/*
    /health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let config = &state.config;
    let mut services = BTreeMap::new();

    services.insert(
        "vertex_ai".to_string(),
        match &config.vertex_ai {
            Some(vertex) => ServiceStatus::ok(format!(
                "Project {} in {}, model {}",
                vertex.project_id, vertex.location, vertex.model
            )),
            None => ServiceStatus::missing(&["GOOGLE_CLOUD_PROJECT_ID"], "mock itineraries"),
        },
    );

    services.insert(
        "google_maps".to_string(),
        match &config.maps {
            Some(maps) => ServiceStatus::ok(format!(
                "Maps API key configured ({})",
                mask_secret(&maps.api_key)
            )),
            None => ServiceStatus::missing(&["GOOGLE_MAPS_API_KEY"], "empty place results"),
        },
    );

    services.insert(
        "weather".to_string(),
        match &config.weather {
            Some(weather) => ServiceStatus::ok(format!(
                "OpenWeather API key configured ({})",
                mask_secret(&weather.api_key)
            )),
            None => ServiceStatus::missing(&["OPENWEATHER_API_KEY"], "mock weather"),
        },
    );

    services.insert(
        "razorpay".to_string(),
        match (&config.payment.razorpay_key_id, config.payment.razorpay_configured()) {
            (Some(key_id), true) => {
                ServiceStatus::ok(format!("Razorpay configured ({})", mask_secret(key_id)))
            }
            _ => ServiceStatus::missing(&["RAZORPAY_KEY_ID", "RAZORPAY_KEY_SECRET"], "payments disabled"),
        },
    );

    services.insert(
        "stripe".to_string(),
        match (&config.payment.stripe_secret_key, config.payment.stripe_configured()) {
            (Some(key), true) => {
                ServiceStatus::ok(format!("Stripe API key configured ({})", mask_secret(key)))
            }
            _ => ServiceStatus::missing(
                &["STRIPE_PUBLISHABLE_KEY", "STRIPE_SECRET_KEY"],
                "payments disabled",
            ),
        },
    );

    services.insert(
        "firebase".to_string(),
        match (&config.firebase.api_key, &config.firebase.project_id) {
            (Some(key), Some(project)) => ServiceStatus::ok(format!(
                "Firebase project {} ({})",
                project,
                mask_secret(key)
            )),
            _ => ServiceStatus::missing(&["FIREBASE_API_KEY", "FIREBASE_PROJECT_ID"], "auth disabled"),
        },
    );

    services.insert(
        "inventory".to_string(),
        match &config.inventory {
            Some(inventory) => ServiceStatus::ok(format!(
                "Inventory API at {} ({})",
                inventory.api_url,
                mask_secret(&inventory.api_key)
            )),
            None => ServiceStatus::missing(
                &["EMT_INVENTORY_API_URL", "EMT_INVENTORY_API_KEY"],
                "mock inventory",
            ),
        },
    );

    let status = if services.values().all(|s| s.status == "ok") {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: config.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
