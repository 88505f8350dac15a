// Agent Console - Main Entry Point
// Native Rust GUI client for the conversational assistant backend

use agent_console::api::ApiClient;
use agent_console::config::Config;
use agent_console::dispatch::Dispatcher;
use agent_console::state::AppState;
use agent_console::ui::render_app_layout;
use eframe::egui;
use std::sync::Arc;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let api = ApiClient::new(config.clone());
    info!(base_url = api.base_url(), "Backend client ready");
    let dispatcher = Dispatcher::new(api, &config)?;

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Agent Console")
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Agent Console",
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let dispatcher = dispatcher.with_notifier(Arc::new(move || ctx.request_repaint()));
            Box::new(AgentConsoleApp::new(dispatcher))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run the UI: {}", e))?;

    info!("Agent Console closed");
    Ok(())
}

/// Main application struct
/// Owns the state and runs the effects the views ask for
struct AgentConsoleApp {
    /// Application state (chat, knowledge, status, preferences)
    state: AppState,
    /// Runs network effects and returns their results
    dispatcher: Dispatcher<ApiClient>,
}

impl AgentConsoleApp {
    /// Create the application and start the initial health check and
    /// knowledge load
    fn new(dispatcher: Dispatcher<ApiClient>) -> Self {
        let mut state = AppState::new();
        dispatcher.run_all(state.init());
        Self { state, dispatcher }
    }

    /// Apply completed results, then the events from this frame
    fn apply(&mut self, msgs: Vec<agent_console::state::Msg>) {
        for msg in msgs {
            let effects = self.state.update(msg);
            self.dispatcher.run_all(effects);
        }
    }
}

impl eframe::App for AgentConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let completed = self.dispatcher.drain();
        self.apply(completed);

        if ctx.style().visuals.dark_mode != self.state.settings.dark_mode {
            ctx.set_visuals(if self.state.settings.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }

        let events = render_app_layout(ctx, &self.state);
        if !events.is_empty() {
            self.apply(events);
            ctx.request_repaint();
        }
    }
}
