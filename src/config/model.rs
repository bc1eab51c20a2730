#[derive(Debug)]
pub struct Config {
    pub arlington_api_url: String,
    pub patc_base_url: String,
}
