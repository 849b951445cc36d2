//! Configuration loading from the environment.

use std::env;

use crate::config::schema::Settings;

impl Settings {
    /// Load settings from environment variables, keeping the default for
    /// anything unset. Unparseable numeric values keep their default as
    /// well; startup never fails on configuration.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Ok(value) = env::var("API_TITLE") {
            settings.service.title = value;
        }
        if let Ok(value) = env::var("API_VERSION") {
            settings.service.version = value;
        }
        if let Ok(value) = env::var("API_DESCRIPTION") {
            settings.service.description = value;
        }

        if let Ok(value) = env::var("BIND_ADDRESS") {
            settings.server.bind_address = value;
        }
        if let Ok(value) = env::var("REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = value.parse() {
                settings.server.request_timeout_secs = secs;
            }
        }

        if let Ok(value) = env::var("OCI_TENANCY_OCID") {
            settings.provider.tenancy_ocid = value;
        }
        if let Ok(value) = env::var("OCI_REGION") {
            settings.provider.region = value;
        }
        if let Ok(value) = env::var("OCI_EMAIL_ENDPOINT") {
            settings.provider.endpoint = Some(value);
        }
        if let Ok(value) = env::var("OCI_SECURITY_TOKEN") {
            settings.provider.security_token = Some(value);
        }

        if let Ok(value) = env::var("LOG_LEVEL") {
            settings.logging.level = value;
        }
        if let Ok(value) = env::var("LOG_FORMAT") {
            settings.logging.format = value;
        }

        settings
    }
}
