mod api;
mod app;
mod config;
mod models;
mod services;
mod ui;

use std::sync::Arc;

use gtk::prelude::*;
use relm4::prelude::*;
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use app::App;
use config::ApiConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_config = ApiConfig::from_env()?;
    tracing::info!("API base URL: {}", api_config.base_url());
    let api = Arc::new(ApiClient::new(&api_config));

    let app = adw::Application::builder()
        .application_id(config::APP_ID)
        .build();

    app.connect_startup(|_| {
        let provider = gtk::CssProvider::new();
        provider.load_from_string(include_str!("../data/style.css"));
        gtk::style_context_add_provider_for_display(
            &gtk::gdk::Display::default().expect("Could not get default display"),
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    });

    RelmApp::from_app(app).run_async::<App>(api);
    Ok(())
}
