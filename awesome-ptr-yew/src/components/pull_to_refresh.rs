//! Pull-to-refresh component
//!
//! Renders the indicator container above the tracked element and hands the
//! element's touch events to the core through [`crate::host`].

use awesome_ptr_core::{PullState, PullToRefreshConfig};
use yew::prelude::*;

use super::spinner::DefaultSpinner;
use crate::host::{self, Callbacks, DomHost, Nodes};
use crate::style::STYLESHEET;

#[derive(Properties, PartialEq)]
pub struct PullToRefreshProps {
    /// Element that is pulled, usually the scrollable content below
    pub target: NodeRef,
    pub is_refreshing: bool,
    pub on_refresh: Callback<()>,
    /// Progress in `[0, 1]`
    #[prop_or_default]
    pub on_pull: Option<Callback<f64>>,
    #[prop_or_default]
    pub on_release: Option<Callback<()>>,
    #[prop_or_default]
    pub on_change_state: Option<Callback<PullState>>,
    #[prop_or_default]
    pub config: PullToRefreshConfig,
    /// Replaces the default spinner. Rotation and bump are not applied to it.
    #[prop_or_default]
    pub custom_spinner: Option<Html>,
    #[prop_or_default]
    pub is_dark_mode: bool,
    #[prop_or_default]
    pub spinner_z_index: Option<i32>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(PullToRefresh)]
pub fn pull_to_refresh(props: &PullToRefreshProps) -> Html {
    let container = use_node_ref();
    let spinner = use_node_ref();

    let callbacks = Callbacks {
        on_refresh: props.on_refresh.clone(),
        on_pull: props.on_pull.clone(),
        on_release: props.on_release.clone(),
        on_change_state: props.on_change_state.clone(),
    };

    let host = {
        let nodes = Nodes {
            container: container.clone(),
            spinner: spinner.clone(),
            target: props.target.clone(),
        };
        let config = props.config.clone();
        let callbacks = callbacks.clone();
        use_mut_ref(move || DomHost::new(config, nodes, callbacks))
    };

    {
        let host = host.clone();
        use_effect_with(callbacks, move |callbacks| {
            host.borrow_mut().set_callbacks(callbacks.clone());
            || ()
        });
    }

    // Mount once; the effects below only see later prop changes
    {
        let host = host.clone();
        let is_refreshing = props.is_refreshing;
        use_effect_with((), move |_| {
            host::mount(&host, is_refreshing);
            move || host::teardown(&host)
        });
    }

    {
        let host = host.clone();
        use_effect_with(props.target.clone(), move |target| {
            host::retarget(&host, target.clone());
            || ()
        });
    }

    {
        let host = host.clone();
        use_effect_with(props.is_refreshing, move |is_refreshing| {
            host::set_refreshing(&host, *is_refreshing);
            || ()
        });
    }

    {
        let host = host.clone();
        use_effect_with(props.config.clone(), move |config| {
            host::reconfigure(&host, config.clone());
            || ()
        });
    }

    let config = &props.config;
    let container_style = format!("top: {}px; height: {}px;", config.origin_top, config.progress_height);

    html! {
        <div
            data-testid="spinner-container"
            class={classes!("react-awesome-ptr", config.drive_kind().css_class(), props.class.clone())}
            ref={container}
            style={container_style}
        >
            <style>{STYLESHEET}</style>
            {
                match &props.custom_spinner {
                    Some(custom) => custom.clone(),
                    None => html! {
                        <DefaultSpinner
                            node_ref={spinner}
                            size={config.spinner_size}
                            margin_top={config.spinner_margin_top()}
                            z_index={props.spinner_z_index}
                            is_dark_mode={props.is_dark_mode}
                        />
                    },
                }
            }
        </div>
    }
}
