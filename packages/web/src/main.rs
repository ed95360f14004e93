use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));
    // Record store URL and key are baked in at build time.
    use_context_provider(|| ui::Console::from_config(&ui::load_config()));

    rsx! {
        document::Title { "Community Console" }
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::ConsoleView {}
    }
}
