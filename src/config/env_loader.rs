use crate::arlington::api::ARLINGTON_API_URL;
use crate::config::model::Config;
use crate::patc::api::PATC_BASE_URL;
use std::env;

pub fn load_config() -> Config {
    Config {
        arlington_api_url: load_url_config("ARLINGTON_API_URL", ARLINGTON_API_URL),
        patc_base_url: load_url_config("PATC_BASE_URL", PATC_BASE_URL),
    }
}

fn load_url_config(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
