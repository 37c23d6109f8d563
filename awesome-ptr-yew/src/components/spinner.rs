//! Spinner components

use awesome_ptr_core::config::DEFAULT_SPINNER_SIZE;
use awesome_ptr_core::spinner::{stroke_color, stroke_opacities, stroke_rotation, STEP_COUNT, STROKE_WIDTH};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DefaultSpinnerProps {
    /// Receives rotation, `spin` and `bump` from the host
    pub node_ref: NodeRef,
    #[prop_or(DEFAULT_SPINNER_SIZE)]
    pub size: f64,
    #[prop_or_default]
    pub margin_top: f64,
    #[prop_or_default]
    pub z_index: Option<i32>,
    #[prop_or_default]
    pub is_dark_mode: bool,
}

#[function_component(DefaultSpinner)]
pub fn default_spinner(props: &DefaultSpinnerProps) -> Html {
    let mut style = format!(
        "margin-top: {}px; width: {}px; height: {}px;",
        props.margin_top, props.size, props.size
    );
    if let Some(z_index) = props.z_index {
        style.push_str(&format!(" z-index: {};", z_index));
    }

    html! {
        <div class="react-awesome-ptr-spinner" {style}>
            <div class="spinner-image" ref={props.node_ref.clone()}>
                <svg viewBox="0 0 32 32" width="100%" height="100%" xmlns="http://www.w3.org/2000/svg">
                    <circle
                        cx="16"
                        cy="16"
                        r="12"
                        fill="none"
                        stroke={stroke_color(props.is_dark_mode)}
                        stroke-width="3"
                        stroke-linecap="round"
                        stroke-dasharray="56 20"
                    />
                </svg>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CupertinoSpinnerProps {
    /// Pull progress in `[0, 1]`, usually fed from `on_pull`
    pub progress: f64,
    pub is_refreshing: bool,
    pub is_trigger_ready: bool,
    #[prop_or_default]
    pub is_dark_mode: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub style: Option<AttrValue>,
}

/// Eight strokes that appear one by one as the pull progresses
#[function_component(CupertinoSpinner)]
pub fn cupertino_spinner(props: &CupertinoSpinnerProps) -> Html {
    let opacities = stroke_opacities(props.progress, props.is_refreshing);
    let color = stroke_color(props.is_dark_mode);

    html! {
        <div class="rap-cupertino-spinner" style={props.style.clone()}>
            <div class={classes!(
                props.class.clone(),
                props.is_refreshing.then_some("spin"),
                props.is_trigger_ready.then_some("bump"),
            )}>
                <svg version="1.1" viewBox="-54 -54 108 108" xmlns="http://www.w3.org/2000/svg">
                    <g stroke-linecap="round" stroke-width={STROKE_WIDTH.to_string()} opacity="0.8">
                        { for (0..STEP_COUNT).map(|index| html! {
                            <path
                                key={index}
                                d="m0 20 0,18"
                                transform={format!("rotate({})", stroke_rotation(index))}
                                stroke={color}
                                opacity={format!("{}%", opacities[index])}
                            />
                        }) }
                    </g>
                </svg>
            </div>
        </div>
    }
}
