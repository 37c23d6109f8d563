//! Awesome PTR for Yew
//!
//! Touch-driven pull-to-refresh for Yew apps. The interaction logic lives
//! in `awesome-ptr-core`; this crate feeds it browser touch events and
//! applies what it asks for to the DOM.

mod components;
mod demo;
mod host;
mod style;

pub use awesome_ptr_core::{PullState, PullToRefreshConfig};
pub use components::{CupertinoSpinner, DefaultSpinner, PullToRefresh, PullToRefreshProps};
pub use demo::App;

/// Entry point for WASM
#[cfg(target_arch = "wasm32")]
pub fn run_app() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
