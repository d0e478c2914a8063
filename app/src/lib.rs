use sycamore::prelude::*;

mod bootstrap;
pub mod components;
pub mod consts;
mod error;
pub mod registry;
mod svg;

pub use self::bootstrap::{Bootstrap, Mounted};
pub use self::error::{Error, Result};
pub use self::registry::{Attrs, Components, Named};

/// Root of the application.
#[component]
pub fn App<G: Html>(cx: Scope) -> View<G> {
    let example = Attrs::new().with("line", "42").with("heading", "90");

    view! { cx,
        div(class="flex flex-col h-screen") {
            header(class="flex items-center justify-between px-4 py-2 shadow") {
                h1(class="text-xl font-bold") { "Bus Tracker" }
            }
            main(class="flex-1 relative") {
                div(id="map", class="absolute inset-0") {}
            }
            footer(class="flex items-center gap-2 px-4 py-1 text-sm") {
                Named(name=consts::BUS_ICON, attrs=example)
                span { "Live bus position, rotated by heading" }
            }
        }
    }
}
