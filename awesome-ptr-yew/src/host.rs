//! Browser host for the pull-to-refresh core
//!
//! Applies drained effects to the DOM, runs scheduled tasks on gloo timers
//! and feeds touch events to the core. After the first move of a gesture,
//! moves are applied at most once per animation frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use awesome_ptr_core::{
    Coalesced, Effect, FrameCoalescer, PullState, PullToRefresh, PullToRefreshConfig, Surface,
    TargetOffset, TaskId, TouchSample,
};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use tracing::{debug, trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, TouchEvent};
use yew::{Callback, NodeRef};

pub type SharedHost = Rc<RefCell<DomHost>>;

/// Caller callbacks, refreshed on every render
#[derive(Clone, PartialEq)]
pub struct Callbacks {
    pub on_refresh: Callback<()>,
    pub on_pull: Option<Callback<f64>>,
    pub on_release: Option<Callback<()>>,
    pub on_change_state: Option<Callback<PullState>>,
}

#[derive(Clone, PartialEq)]
pub struct Nodes {
    pub container: NodeRef,
    pub spinner: NodeRef,
    pub target: NodeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Container,
    Spinner,
    Target,
}

/// A single DOM mutation derived from a presentation effect
#[derive(Debug, Clone, PartialEq)]
pub enum DomOp {
    Style {
        node: Node,
        property: &'static str,
        value: String,
    },
    Class {
        node: Node,
        class: &'static str,
        enabled: bool,
    },
}

impl DomOp {
    /// Map a presentation effect; callbacks, timers and listener
    /// handshakes have no DOM counterpart.
    pub fn from_effect(effect: &Effect) -> Option<Self> {
        let op = match effect {
            Effect::ContainerOpacity { opacity } => style(Node::Container, "opacity", opacity.to_string()),
            Effect::ContainerTransition { enabled } => class(Node::Container, "transition-enabled", *enabled),
            Effect::ContainerHeight { px } => style(Node::Container, "height", format!("{}px", px)),
            Effect::SpinnerRotation { degrees } => {
                style(Node::Spinner, "transform", format!("rotate({}deg)", degrees))
            }
            Effect::SpinnerBump { enabled } => class(Node::Spinner, "bump", *enabled),
            Effect::SpinnerSpinning { enabled } => class(Node::Spinner, "spin", *enabled),
            Effect::TargetOffset { offset } => match offset {
                TargetOffset::MarginTop(px) => style(Node::Target, "margin-top", format!("{}px", px)),
                TargetOffset::TranslateY(px) => {
                    style(Node::Target, "transform", format!("translateY({}px)", px))
                }
            },
            Effect::TargetTransition { value } => style(Node::Target, "transition", value.clone()),
            _ => return None,
        };
        Some(op)
    }

    /// Missing nodes are skipped: a custom spinner has no spinner ref
    fn apply(&self, nodes: &Nodes) {
        let node = match self {
            Self::Style { node, .. } | Self::Class { node, .. } => *node,
        };
        let node_ref = match node {
            Node::Container => &nodes.container,
            Node::Spinner => &nodes.spinner,
            Node::Target => &nodes.target,
        };
        let Some(element) = node_ref.cast::<HtmlElement>() else {
            trace!(?node, "node not mounted, effect skipped");
            return;
        };

        let result = match self {
            Self::Style { property, value, .. } => element.style().set_property(property, value),
            Self::Class { class, enabled, .. } => {
                element.class_list().toggle_with_force(class, *enabled).map(|_| ())
            }
        };
        if result.is_err() {
            warn!(op = ?self, "failed to apply DOM effect");
        }
    }
}

fn style(node: Node, property: &'static str, value: String) -> DomOp {
    DomOp::Style {
        node,
        property,
        value,
    }
}

fn class(node: Node, class: &'static str, enabled: bool) -> DomOp {
    DomOp::Class {
        node,
        class,
        enabled,
    }
}

struct DomSurface<'a> {
    target: &'a NodeRef,
}

impl Surface for DomSurface<'_> {
    fn target_top(&self) -> Option<f64> {
        let element = self.target.cast::<Element>()?;
        element.get_client_rects().get(0).map(|rect| rect.top())
    }

    fn scroll_y(&self) -> f64 {
        web_sys::window()
            .and_then(|window| window.scroll_y().ok())
            .unwrap_or(0.0)
    }
}

pub struct DomHost {
    core: PullToRefresh,
    nodes: Nodes,
    callbacks: Callbacks,
    frames: FrameCoalescer,
    frame: Option<AnimationFrame>,
    timers: HashMap<TaskId, Timeout>,
    listeners: Vec<EventListener>,
}

impl DomHost {
    pub fn new(config: PullToRefreshConfig, nodes: Nodes, callbacks: Callbacks) -> Self {
        let core = PullToRefresh::new(config).unwrap_or_else(|err| {
            warn!(%err, "pull-to-refresh configuration rejected, using defaults");
            PullToRefresh::default()
        });
        Self {
            core,
            nodes,
            callbacks,
            frames: FrameCoalescer::new(),
            frame: None,
            timers: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn set_callbacks(&mut self, callbacks: Callbacks) {
        self.callbacks = callbacks;
    }

    fn stop_listening(&mut self) {
        self.listeners.clear();
        self.frames.clear();
        self.frame = None;
    }

    fn apply_move(&mut self, sample: TouchSample) {
        let surface = DomSurface {
            target: &self.nodes.target,
        };
        let outcome = self.core.touch_move(sample, &surface);
        trace!(accepted = outcome.accepted, y = sample.client_y, "move applied");
    }
}

pub fn mount(host: &SharedHost, is_refreshing: bool) {
    host.borrow_mut().core.mount(is_refreshing);
    attach_listeners(host);
    pump(host);
}

pub fn set_refreshing(host: &SharedHost, is_refreshing: bool) {
    host.borrow_mut().core.set_refreshing(is_refreshing);
    pump(host);
}

pub fn reconfigure(host: &SharedHost, config: PullToRefreshConfig) {
    if let Err(err) = host.borrow_mut().core.reconfigure(config) {
        warn!(%err, "pull-to-refresh configuration rejected, keeping the previous one");
    }
    pump(host);
}

/// The tracked element reference changed: move the listeners over
pub fn retarget(host: &SharedHost, target: NodeRef) {
    {
        let mut inner = host.borrow_mut();
        if inner.nodes.target == target {
            return;
        }
        inner.stop_listening();
        inner.core.detach();
    }
    // Effects of the reset still land on the element being left
    pump(host);
    host.borrow_mut().nodes.target = target;
    attach_listeners(host);
}

pub fn teardown(host: &SharedHost) {
    host.borrow_mut().core.teardown();
    pump(host);

    let mut inner = host.borrow_mut();
    inner.stop_listening();
    inner.timers.clear();
}

fn attach_listeners(host: &SharedHost) {
    let mut inner = host.borrow_mut();
    inner.stop_listening();

    let Some(target) = inner.nodes.target.cast::<HtmlElement>() else {
        debug!("target element not mounted, listeners not attached");
        return;
    };
    if !inner.core.attach() {
        return;
    }

    let weak = Rc::downgrade(host);
    let mut listeners = Vec::with_capacity(3);

    if inner.core.needs_touch_start() {
        let weak = weak.clone();
        listeners.push(EventListener::new(&target, "touchstart", move |event: &Event| {
            if let (Some(host), Some(sample)) = (weak.upgrade(), touch_sample(event)) {
                touch_start(&host, sample);
            }
        }));
    }

    // Non-passive so the page scroll can be suppressed while pulling
    let move_weak = weak.clone();
    listeners.push(EventListener::new_with_options(
        &target,
        "touchmove",
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        move |event: &Event| {
            if let (Some(host), Some(sample)) = (move_weak.upgrade(), touch_sample(event)) {
                if touch_move(&host, sample) {
                    event.prevent_default();
                }
            }
        },
    ));

    listeners.push(EventListener::new(&target, "touchend", move |_event: &Event| {
        if let Some(host) = weak.upgrade() {
            touch_end(&host);
        }
    }));

    inner.listeners = listeners;
    debug!(count = inner.listeners.len(), "touch listeners attached");
}

fn touch_sample(event: &Event) -> Option<TouchSample> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touch = event.touches().get(0)?;
    Some(TouchSample::new(f64::from(touch.client_y())))
}

fn touch_start(host: &SharedHost, sample: TouchSample) {
    {
        let mut inner = host.borrow_mut();
        let DomHost { core, nodes, .. } = &mut *inner;
        core.touch_start(sample, &DomSurface { target: &nodes.target });
    }
    pump(host);
}

/// Apply the first move of a gesture at once and queue later ones for the
/// next frame. Returns whether the event's default must be prevented,
/// which cannot wait for the frame.
fn touch_move(host: &SharedHost, sample: TouchSample) -> bool {
    let mut inner = host.borrow_mut();
    match inner.frames.push(sample) {
        Coalesced::Immediate(sample) => {
            inner.apply_move(sample);
            let prevent_default = inner.core.should_prevent_default();
            drop(inner);
            pump(host);
            return prevent_default;
        }
        Coalesced::RequestFrame => {
            let weak = Rc::downgrade(host);
            inner.frame = Some(request_animation_frame(move |_| {
                if let Some(host) = weak.upgrade() {
                    flush_frame(&host);
                }
            }));
        }
        Coalesced::Merged => {}
    }
    inner.core.should_prevent_default()
}

fn flush_frame(host: &SharedHost) {
    {
        let mut inner = host.borrow_mut();
        inner.frame = None;
        let Some(sample) = inner.frames.take() else {
            return;
        };
        inner.apply_move(sample);
    }
    pump(host);
}

/// A move still waiting for its frame is applied before the release
fn touch_end(host: &SharedHost) {
    {
        let mut inner = host.borrow_mut();
        inner.frame = None;
        if let Some(sample) = inner.frames.take() {
            inner.apply_move(sample);
        }
        inner.frames.clear();
        inner.core.touch_end();
    }
    pump(host);
}

fn schedule(host: &SharedHost, task: TaskId, delay_ms: u64) {
    let weak = Rc::downgrade(host);
    let millis = u32::try_from(delay_ms).unwrap_or(u32::MAX);
    let timeout = Timeout::new(millis, move || {
        if let Some(host) = weak.upgrade() {
            fire(&host, task);
        }
    });
    host.borrow_mut().timers.insert(task, timeout);
}

fn fire(host: &SharedHost, task: TaskId) {
    {
        let mut inner = host.borrow_mut();
        inner.timers.remove(&task);
        inner.core.fire(task);
    }
    pump(host);
}

/// Drain the core and apply every effect in order. No borrow is held while
/// caller callbacks run.
fn pump(host: &SharedHost) {
    let (effects, nodes, callbacks) = {
        let mut inner = host.borrow_mut();
        (
            inner.core.drain_effects(),
            inner.nodes.clone(),
            inner.callbacks.clone(),
        )
    };

    for effect in effects {
        trace!(%effect, "applying effect");
        match effect {
            Effect::StateChanged { state } => {
                if let Some(callback) = &callbacks.on_change_state {
                    callback.emit(state);
                }
            }
            Effect::Pull { progress } => {
                if let Some(callback) = &callbacks.on_pull {
                    callback.emit(progress);
                }
            }
            Effect::Release => {
                if let Some(callback) = &callbacks.on_release {
                    callback.emit(());
                }
            }
            Effect::Refresh => callbacks.on_refresh.emit(()),
            Effect::Schedule { task, delay_ms, .. } => schedule(host, task, delay_ms),
            Effect::Cancel { task } => {
                host.borrow_mut().timers.remove(&task);
            }
            Effect::AttachListeners { .. } => attach_listeners(host),
            Effect::DetachListeners => host.borrow_mut().stop_listening(),
            other => {
                if let Some(op) = DomOp::from_effect(&other) {
                    op.apply(&nodes);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_offsets() {
        assert_eq!(
            DomOp::from_effect(&Effect::TargetOffset {
                offset: TargetOffset::TranslateY(42.5)
            }),
            Some(style(Node::Target, "transform", "translateY(42.5px)".to_string()))
        );
        assert_eq!(
            DomOp::from_effect(&Effect::TargetOffset {
                offset: TargetOffset::MarginTop(150.0)
            }),
            Some(style(Node::Target, "margin-top", "150px".to_string()))
        );
    }

    #[test]
    fn test_spinner_classes() {
        assert_eq!(
            DomOp::from_effect(&Effect::SpinnerSpinning { enabled: true }),
            Some(class(Node::Spinner, "spin", true))
        );
        assert_eq!(
            DomOp::from_effect(&Effect::SpinnerBump { enabled: false }),
            Some(class(Node::Spinner, "bump", false))
        );
        assert_eq!(
            DomOp::from_effect(&Effect::SpinnerRotation { degrees: 180.0 }),
            Some(style(Node::Spinner, "transform", "rotate(180deg)".to_string()))
        );
    }

    #[test]
    fn test_container_ops() {
        assert_eq!(
            DomOp::from_effect(&Effect::ContainerOpacity { opacity: 0.5 }),
            Some(style(Node::Container, "opacity", "0.5".to_string()))
        );
        assert_eq!(
            DomOp::from_effect(&Effect::ContainerTransition { enabled: true }),
            Some(class(Node::Container, "transition-enabled", true))
        );
        assert_eq!(
            DomOp::from_effect(&Effect::ContainerHeight { px: 80.0 }),
            Some(style(Node::Container, "height", "80px".to_string()))
        );
    }

    #[test]
    fn test_non_dom_effects() {
        assert_eq!(DomOp::from_effect(&Effect::Refresh), None);
        assert_eq!(DomOp::from_effect(&Effect::DetachListeners), None);
        assert_eq!(DomOp::from_effect(&Effect::Cancel { task: TaskId(3) }), None);
    }
}
