use dioxus::logger::tracing::{self, Level};
use dioxus::prelude::*;

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {e}");
    }
    let config = ui::load_config();
    tracing::info!(demo = config.is_demo(), "starting desktop console");
    dioxus::LaunchBuilder::new()
        .with_context(ui::Console::from_config(&config))
        .launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
        document::Title { "Community Console" }
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::ConsoleView {}
    }
}
