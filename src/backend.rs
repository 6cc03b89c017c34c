//! In-memory agency backend
//!
//! Serves the landing page's canned statistics and validates contact form
//! submissions. Nothing is stored; the browser bindings only add the response
//! delays a real service would have.

use serde::{Deserialize, Serialize};

/// Delay before the stats request resolves
pub const STATS_DELAY_MS: u32 = 800;
/// Delay before an accepted contact submission resolves
pub const CONTACT_DELAY_MS: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyStats {
    pub clients: u32,
    pub projects: u32,
    /// Percentage, 0-100
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub year: u16,
    pub name: String,
}

/// Payload of the stats request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub agency_stats: AgencyStats,
    pub technologies: Vec<String>,
}

/// A contact form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Outcome of a contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    /// ISO-8601 acceptance time; absent on rejection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ContactResponse {
    fn rejected(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            timestamp: None,
        }
    }
}

/// Why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRejection {
    MissingField,
    InvalidEmail,
}

impl ContactRejection {
    pub fn message(&self) -> &'static str {
        match self {
            ContactRejection::MissingField => "All fields are required",
            ContactRejection::InvalidEmail => "Please enter a valid email address",
        }
    }
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Build from possibly-absent fields; absent counts as empty
    pub fn from_parts(name: Option<String>, email: Option<String>, message: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
        }
    }

    /// Presence and basic email format checks
    pub fn validate(&self) -> Result<(), ContactRejection> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ContactRejection::MissingField);
        }
        if !self.email.contains('@') {
            return Err(ContactRejection::InvalidEmail);
        }
        Ok(())
    }
}

/// Canned agency data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyBackend {
    stats: AgencyStats,
    technologies: Vec<String>,
    team_members: u32,
    founded_year: u16,
    awards: Vec<Award>,
}

impl Default for AgencyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AgencyBackend {
    pub fn new() -> Self {
        let award = |year, name: &str| Award {
            year,
            name: name.to_string(),
        };
        Self {
            stats: AgencyStats {
                clients: 126,
                projects: 348,
                satisfaction: 98.5,
            },
            technologies: ["AI", "Web3", "Cloud", "Mobile", "IoT"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            team_members: 24,
            founded_year: 2015,
            awards: vec![
                award(2022, "Webby Award for Design Excellence"),
                award(2021, "Awwwards Site of the Day"),
                award(2020, "CSS Design Awards - Best UI Design"),
            ],
        }
    }

    pub fn agency_stats(&self) -> StatsResponse {
        StatsResponse {
            agency_stats: self.stats.clone(),
            technologies: self.technologies.clone(),
        }
    }

    /// Validate a submission. `now` is the ISO-8601 acceptance time.
    pub fn process_contact_form(&self, form: &ContactForm, now: &str) -> ContactResponse {
        match form.validate() {
            Ok(()) => {
                log::info!("Contact form accepted from {}", form.name);
                ContactResponse {
                    success: true,
                    message: format!("Thank you {}! We'll contact you soon.", form.name),
                    timestamp: Some(now.to_string()),
                }
            }
            Err(rejection) => {
                log::debug!("Contact form rejected: {:?}", rejection);
                ContactResponse::rejected(rejection.message())
            }
        }
    }

    pub fn team_members(&self) -> u32 {
        self.team_members
    }

    pub fn founded_year(&self) -> u16 {
        self.founded_year
    }

    pub fn awards(&self) -> &[Award] {
        &self.awards
    }
}

/// Browser bindings that resolve after the simulated network delay
#[cfg(target_arch = "wasm32")]
pub mod web {
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::prelude::*;

    use super::{AgencyBackend, CONTACT_DELAY_MS, ContactForm, STATS_DELAY_MS};

    fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = getAgencyStats)]
    pub async fn get_agency_stats() -> Result<JsValue, JsValue> {
        TimeoutFuture::new(STATS_DELAY_MS).await;
        to_js(&AgencyBackend::new().agency_stats())
    }

    /// Missing arguments count as empty fields and are rejected
    #[wasm_bindgen(js_name = processContactForm)]
    pub async fn process_contact_form(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<JsValue, JsValue> {
        let form = ContactForm::from_parts(name, email, message);
        // Rejections come back immediately, like a client-side check would
        if form.validate().is_ok() {
            TimeoutFuture::new(CONTACT_DELAY_MS).await;
        }
        let now = String::from(js_sys::Date::new_0().to_iso_string());
        let response = AgencyBackend::new().process_contact_form(&form, &now);
        to_js(&response)
    }
}
