/// Install the tracing subscriber: browser console on web, stderr on desktop builds.
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("[diagnostics] logger was already initialized: {err}");
    }
}
