use capital_nature::arlington::api::ArlingtonAPI;
use capital_nature::config::env_loader::load_config;
use capital_nature::patc::api::PatcAPI;
use capital_nature::{arlington, patc};
use chrono::Local;
use tracing::info;

#[tokio::main]
async fn main() {
    capital_nature::tracing::init();

    let config = load_config();

    let arlington_api = ArlingtonAPI::new(config.arlington_api_url);
    let items = arlington_api
        .get_events(Local::now().date_naive())
        .await
        .expect("Error fetching Arlington events");
    let mut events = arlington::schema::schematize_events(&items, &arlington_api)
        .await
        .expect("Error schematizing Arlington events");

    info!("Got {} Arlington events", events.len());

    let patc_api = PatcAPI::new(config.patc_base_url);
    let pages = patc_api
        .get_events()
        .await
        .expect("Error crawling the PATC calendar");
    let patc_events = patc::schema::schematize_events(pages);

    info!("Got {} PATC events", patc_events.len());

    events.extend(patc_events);

    println!(
        "{}",
        serde_json::to_string_pretty(&events).expect("Error serializing events")
    );
}
