//! Demo application: a list refreshed by pulling it down

use awesome_ptr_core::{PullState, PullToRefreshConfig};
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::components::{CupertinoSpinner, PullToRefresh};

/// Simulated network latency of a refresh
const FAKE_FETCH_MS: u32 = 1_500;

#[function_component(App)]
pub fn app() -> Html {
    let target = use_node_ref();
    let is_refreshing = use_state(|| false);
    let rows = use_state(|| 5u32);
    let state = use_state(PullState::default);
    let progress = use_state(|| 0.0);
    let cupertino = use_state(|| false);
    let bounce = use_state(|| false);

    let on_refresh = {
        let is_refreshing = is_refreshing.clone();
        let rows = rows.clone();
        Callback::from(move |_| {
            is_refreshing.set(true);
            let is_refreshing = is_refreshing.clone();
            let rows = rows.clone();
            Timeout::new(FAKE_FETCH_MS, move || {
                rows.set(*rows + 1);
                is_refreshing.set(false);
            })
            .forget();
        })
    };

    let on_pull = {
        let progress = progress.clone();
        Callback::from(move |value: f64| progress.set(value))
    };

    let on_change_state = {
        let state = state.clone();
        Callback::from(move |value: PullState| state.set(value))
    };

    let toggle_spinner = {
        let cupertino = cupertino.clone();
        Callback::from(move |_| cupertino.set(!*cupertino))
    };

    let toggle_bounce = {
        let bounce = bounce.clone();
        Callback::from(move |_| bounce.set(!*bounce))
    };

    let config = PullToRefreshConfig {
        is_bounce_supported: *bounce,
        complete_delay_ms: 300,
        ..Default::default()
    };

    let custom_spinner = cupertino.then(|| {
        html! {
            <CupertinoSpinner
                progress={*progress}
                is_refreshing={*state == PullState::Refreshing}
                is_trigger_ready={*state == PullState::TriggerReady}
            />
        }
    });

    html! {
        <div class="ptr-demo">
            <header class="ptr-demo-header">
                <span class="state">{format!("state: {}", *state)}</span>
                <button onclick={toggle_spinner}>
                    {if *cupertino { "Default spinner" } else { "Cupertino spinner" }}
                </button>
                <button onclick={toggle_bounce}>
                    {if *bounce { "Synthetic drag" } else { "Native bounce" }}
                </button>
            </header>

            <div class="ptr-demo-body" style="position: relative;">
                <PullToRefresh
                    target={target.clone()}
                    is_refreshing={*is_refreshing}
                    {on_refresh}
                    {on_pull}
                    {on_change_state}
                    {config}
                    {custom_spinner}
                />
                <ul ref={target} class="ptr-demo-list">
                    { for (1..=*rows).rev().map(|row| html! {
                        <li key={row}>{format!("Item {}", row)}</li>
                    }) }
                </ul>
            </div>
        </div>
    }
}
