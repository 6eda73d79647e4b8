// SPDX-License-Identifier: MPL-2.0
//! In-process host adapters.
//!
//! These implement every port without a DOM: the stage and widgets record
//! what they were told, the scripted backend settles loads only when asked,
//! and the timed backend settles after a fixed delay. They back the
//! `lens-lightbox` replay binary, the benchmarks and the test suites.

use crate::application::port::{
    LoadFuture, MediaBackend, Stage, TransitionCompleter, TransitionHandle, Transitions,
    TriggerElement, TriggerSurface, Widget,
};
use crate::domain::media::{
    ContainerId, Direction, ImageParams, ItemKey, MapParams, MediaDescriptor, NodeHandle,
    RenderedContent, TriggerId, VideoParams, YoutubeParams,
};
use crate::error::LoadError;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::oneshot;

type Settlement = Result<NodeHandle, LoadError>;

/// Label a backend uses to identify a map load.
#[must_use]
pub fn map_label(params: &MapParams) -> String {
    let (lat, lng) = params.center();
    format!("{lat},{lng}")
}

// =============================================================================
// Scripted backend
// =============================================================================

/// Backend whose loads stay pending until the test settles them.
///
/// Loads are identified by label: the `src` of images and videos, the video
/// id of YouTube items and `"lat,lng"` for maps.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    next_node: Cell<u64>,
    pending: RefCell<HashMap<String, VecDeque<oneshot::Sender<Settlement>>>>,
    loads: RefCell<Vec<String>>,
    paused: RefCell<Vec<NodeHandle>>,
}

impl ScriptedBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn request(&self, label: String) -> LoadFuture {
        let (sender, receiver) = oneshot::channel();
        self.pending
            .borrow_mut()
            .entry(label.clone())
            .or_default()
            .push_back(sender);
        self.loads.borrow_mut().push(label);
        Box::pin(async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(LoadError::new("load abandoned")))
        })
    }

    fn settle(&self, label: &str, result: impl FnOnce() -> Settlement) -> bool {
        let sender = self
            .pending
            .borrow_mut()
            .get_mut(label)
            .and_then(VecDeque::pop_front);
        match sender {
            Some(sender) => sender.send(result()).is_ok(),
            None => false,
        }
    }

    /// Settles the oldest pending load for `label` successfully.
    ///
    /// Returns the node handed out, or `None` if nothing was pending.
    pub fn resolve(&self, label: &str) -> Option<NodeHandle> {
        let node = NodeHandle(self.next_node.get() + 1);
        if self.settle(label, || Ok(node)) {
            self.next_node.set(node.0);
            Some(node)
        } else {
            None
        }
    }

    /// Fails the oldest pending load for `label`.
    pub fn fail(&self, label: &str, reason: &str) -> bool {
        self.settle(label, || Err(LoadError::new(reason)))
    }

    /// Whether a load for `label` is waiting to be settled.
    #[must_use]
    pub fn is_pending(&self, label: &str) -> bool {
        self.pending
            .borrow()
            .get(label)
            .is_some_and(|queue| !queue.is_empty())
    }

    /// Number of loads ever requested for `label`.
    #[must_use]
    pub fn load_count(&self, label: &str) -> usize {
        self.loads.borrow().iter().filter(|l| *l == label).count()
    }

    /// Every load request, in order.
    #[must_use]
    pub fn loads(&self) -> Vec<String> {
        self.loads.borrow().clone()
    }

    /// Nodes paused so far, in order.
    #[must_use]
    pub fn paused(&self) -> Vec<NodeHandle> {
        self.paused.borrow().clone()
    }
}

impl MediaBackend for ScriptedBackend {
    fn load_image(&self, params: &ImageParams) -> LoadFuture {
        self.request(params.src.clone())
    }

    fn load_video(&self, params: &VideoParams) -> LoadFuture {
        self.request(params.src.clone())
    }

    fn load_youtube(&self, params: &YoutubeParams) -> LoadFuture {
        self.request(params.video_id().to_string())
    }

    fn load_map(&self, params: &MapParams) -> LoadFuture {
        self.request(map_label(params))
    }

    fn pause(&self, node: NodeHandle) {
        self.paused.borrow_mut().push(node);
    }
}

// =============================================================================
// Timed backend
// =============================================================================

/// Backend that settles every load after a fixed delay.
///
/// Sources listed with [`TimedBackend::failing`] fail with a 404-like reason.
#[derive(Debug)]
pub struct TimedBackend {
    delay: Duration,
    failing: HashSet<String>,
    next_node: Rc<Cell<u64>>,
}

impl TimedBackend {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failing: HashSet::new(),
            next_node: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn failing(mut self, label: impl Into<String>) -> Self {
        self.failing.insert(label.into());
        self
    }

    fn request(&self, label: String) -> LoadFuture {
        let delay = self.delay;
        let fails = self.failing.contains(&label);
        let next_node = Rc::clone(&self.next_node);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if fails {
                return Err(LoadError::new(format!("{label}: not found")));
            }
            let node = next_node.get() + 1;
            next_node.set(node);
            Ok(NodeHandle(node))
        })
    }
}

impl MediaBackend for TimedBackend {
    fn load_image(&self, params: &ImageParams) -> LoadFuture {
        self.request(params.src.clone())
    }

    fn load_video(&self, params: &VideoParams) -> LoadFuture {
        self.request(params.src.clone())
    }

    fn load_youtube(&self, params: &YoutubeParams) -> LoadFuture {
        self.request(params.video_id().to_string())
    }

    fn load_map(&self, params: &MapParams) -> LoadFuture {
        self.request(map_label(params))
    }

    fn pause(&self, node: NodeHandle) {
        tracing::debug!(node = node.0, "pause");
    }
}

// =============================================================================
// Stage
// =============================================================================

/// Stage that records mounts, activation and overlay state.
#[derive(Debug, Default)]
pub struct HeadlessStage {
    next_container: Cell<u64>,
    mounted: RefCell<Vec<(ItemKey, ContainerId, RenderedContent)>>,
    active: RefCell<Vec<ContainerId>>,
    open: Cell<bool>,
    loading: RefCell<Option<String>>,
}

impl HeadlessStage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Containers currently active, in activation order.
    #[must_use]
    pub fn active_containers(&self) -> Vec<ContainerId> {
        self.active.borrow().clone()
    }

    /// Key of the item whose container is active, if exactly one is.
    #[must_use]
    pub fn active_key(&self) -> Option<ItemKey> {
        let active = self.active.borrow();
        match active.as_slice() {
            [container] => self
                .mounted
                .borrow()
                .iter()
                .find(|(_, c, _)| c == container)
                .map(|(key, _, _)| key.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn container_of(&self, key: &str) -> Option<ContainerId> {
        self.mounted
            .borrow()
            .iter()
            .find(|(k, _, _)| k.as_str() == key)
            .map(|(_, container, _)| *container)
    }

    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.mounted.borrow().len()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    #[must_use]
    pub fn loading_message(&self) -> Option<String> {
        self.loading.borrow().clone()
    }
}

impl Stage for HeadlessStage {
    fn mount(&self, key: &ItemKey, content: &RenderedContent) -> ContainerId {
        let container = ContainerId(self.next_container.get() + 1);
        self.next_container.set(container.0);
        tracing::debug!(%key, container = container.0, error = content.is_error(), "mount");
        self.mounted
            .borrow_mut()
            .push((key.clone(), container, content.clone()));
        container
    }

    fn set_active(&self, container: ContainerId, active: bool) {
        let mut containers = self.active.borrow_mut();
        containers.retain(|c| *c != container);
        if active {
            containers.push(container);
        }
    }

    fn set_open(&self, open: bool) {
        self.open.set(open);
    }

    fn set_loading(&self, message: Option<&str>) {
        *self.loading.borrow_mut() = message.map(str::to_string);
    }
}

// =============================================================================
// Widgets
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    pub visible: bool,
    pub enabled: bool,
    /// Last `(current, total)` readout.
    pub readout: Option<(usize, usize)>,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            visible: false,
            enabled: true,
            readout: None,
        }
    }
}

/// Widget that records its presentational state.
///
/// Clones share state, so a test keeps one clone and hands the other over.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWidget {
    state: Rc<RefCell<WidgetState>>,
}

impl HeadlessWidget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> WidgetState {
        *self.state.borrow()
    }
}

impl Widget for HeadlessWidget {
    fn show(&self) {
        self.state.borrow_mut().visible = true;
    }

    fn hide(&self) {
        self.state.borrow_mut().visible = false;
    }

    fn enable(&self) {
        self.state.borrow_mut().enabled = true;
    }

    fn disable(&self) {
        self.state.borrow_mut().enabled = false;
    }

    fn update(&self, current: usize, total: usize) {
        self.state.borrow_mut().readout = Some((current, total));
    }
}

// =============================================================================
// Triggers
// =============================================================================

/// Trigger surface backed by a list of descriptor strings.
#[derive(Debug, Default)]
pub struct StaticTriggers {
    elements: RefCell<Vec<TriggerElement>>,
    bound: RefCell<Vec<(TriggerId, ItemKey)>>,
}

impl StaticTriggers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trigger element and returns its id.
    pub fn add(&self, descriptor: impl Into<String>) -> TriggerId {
        let mut elements = self.elements.borrow_mut();
        let id = TriggerId(elements.len() as u64 + 1);
        elements.push(TriggerElement {
            id,
            descriptor: descriptor.into(),
        });
        id
    }

    /// Bindings made so far.
    #[must_use]
    pub fn bound(&self) -> Vec<(TriggerId, ItemKey)> {
        self.bound.borrow().clone()
    }
}

impl TriggerSurface for StaticTriggers {
    fn scan(&self, group: &str) -> Vec<TriggerElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|element| {
                MediaDescriptor::parse(&element.descriptor)
                    .map(|d| d.group.as_deref() == Some(group))
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    fn bind(&self, trigger: TriggerId, key: &ItemKey) {
        self.bound.borrow_mut().push((trigger, key.clone()));
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// A transition started on [`ManualTransitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Open,
    Close,
    ShowElement(ContainerId, Direction),
}

/// Transitions that only finish when the test completes them.
#[derive(Debug, Default)]
pub struct ManualTransitions {
    started: RefCell<Vec<TransitionKind>>,
    pending: RefCell<VecDeque<TransitionCompleter>>,
}

impl ManualTransitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&self, kind: TransitionKind) -> TransitionHandle {
        let (completer, handle) = TransitionHandle::pending();
        self.started.borrow_mut().push(kind);
        self.pending.borrow_mut().push_back(completer);
        handle
    }

    /// Completes the oldest running transition.
    pub fn complete_next(&self) -> bool {
        let completer = self.pending.borrow_mut().pop_front();
        completer.map(TransitionCompleter::complete).is_some()
    }

    /// Completes every running transition.
    pub fn complete_all(&self) {
        while self.complete_next() {}
    }

    /// Every transition started so far.
    #[must_use]
    pub fn started(&self) -> Vec<TransitionKind> {
        self.started.borrow().clone()
    }
}

impl Transitions for ManualTransitions {
    fn open(&self) -> TransitionHandle {
        self.start(TransitionKind::Open)
    }

    fn close(&self) -> TransitionHandle {
        self.start(TransitionKind::Close)
    }

    fn show_element(&self, container: ContainerId, direction: Direction) -> TransitionHandle {
        self.start(TransitionKind::ShowElement(container, direction))
    }
}
