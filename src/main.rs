use dioxus::prelude::*;

mod components;
mod db;
mod diagnostics;
mod models;
mod playback;

use components::AppShell;

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

fn main() {
    diagnostics::init_logging();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#18181b" }
        document::Title { "SimplePlayer" }
        document::Stylesheet { href: PLAYER_CSS }

        AppShell {}
    }
}
