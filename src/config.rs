use log::Level;

pub const DRAFT_STORAGE_KEY: &str = "contact_form_draft";
pub const FALLBACK_EMAIL: &str = "hello@arjundigital.com";
pub const NOTICE_TIMEOUT_MS: u32 = 5_000;

pub fn get_submit_endpoint() -> &'static str {
    "https://api.web3forms.com/submit"
}

// Baked in at build time, e.g. `WEB3FORMS_ACCESS_KEY=... trunk build --release`
pub fn get_access_key() -> &'static str {
    option_env!("WEB3FORMS_ACCESS_KEY").unwrap_or("YOUR_ACCESS_KEY_HERE")
}

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info
}

/// Everything the contact form needs to know about its surroundings.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactConfig {
    pub endpoint: String,
    pub access_key: String,
    pub subject: Option<String>,
    pub draft_key: String,
    pub fallback_email: String,
    pub notice_timeout_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: get_submit_endpoint().to_string(),
            access_key: get_access_key().to_string(),
            subject: Some("New contact form submission".to_string()),
            draft_key: DRAFT_STORAGE_KEY.to_string(),
            fallback_email: FALLBACK_EMAIL.to_string(),
            notice_timeout_ms: NOTICE_TIMEOUT_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_fixed_draft_key() {
        let config = ContactConfig::default();
        assert_eq!(config.draft_key, "contact_form_draft");
        assert_eq!(config.endpoint, "https://api.web3forms.com/submit");
        assert_eq!(config.notice_timeout_ms, 5_000);
        assert!(!config.access_key.is_empty());
    }
}
