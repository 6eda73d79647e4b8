// SPDX-License-Identifier: MPL-2.0
//! The lightbox orchestrator.
//!
//! [`Lightbox`] owns the open/close state machine and wires the registry, the
//! load coordinator, navigation and the UI together. It is a cheap `Clone`
//! handle for a single-threaded host loop.
//!
//! Every operation runs its synchronous part immediately (events, container
//! reset, load admission) and returns a future for the asynchronous rest. The
//! host drives those futures like it drives any other task; they never hold a
//! borrow of the gallery state across an `.await` or a user callback, so a
//! callback may call back into the lightbox.

use crate::application::port::{
    InstantTransitions, MediaBackend, Stage, TransitionHandle, Transitions, TriggerSurface,
    Widget, WidgetSlot,
};
use crate::config::LightboxConfig;
use crate::domain::media::{
    Direction, ItemKey, LoadState, MediaDescriptor, NodeHandle, RenderedContent, TriggerId,
};
use crate::error::{LoadError, Result};
use crate::gallery::coordinator::{Admission, LoadCoordinator};
use crate::gallery::deep_link::{ArmedDeepLink, DeepLink, DeepLinkTarget};
use crate::gallery::events::{EventHooks, EventPayload, ItemRef};
use crate::gallery::input::{self, Command, InputEvent};
use crate::gallery::navigation::{self, NavigationInfo};
use crate::gallery::registry::ElementRegistry;
use crate::gallery::state::{GalleryState, OverlayState};
use crate::gallery::ui::UiControls;
use crate::i18n::I18n;
use crate::media::{CustomType, TypeRegistry};
use futures_util::future::{self, FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// How a navigation request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The item at this index is now displayed.
    Shown(usize),
    /// The target already was the displayed item; nothing happened.
    Unchanged,
    /// A newer request or a close took over before this one could show.
    Superseded,
    /// The target was already loading for an earlier request; that request
    /// settled the shared load first and displayed it.
    Joined,
    /// Nothing to navigate to (empty gallery or unknown key).
    Ignored,
}

// =============================================================================
// State
// =============================================================================

/// Mutable gallery state, only touched through [`Lightbox`] methods.
struct Inner {
    config: LightboxConfig,
    types: TypeRegistry,
    registry: ElementRegistry,
    coordinator: LoadCoordinator,
    overlay: OverlayState,
    current_index: Option<usize>,
    direction: Direction,
    /// Bumped by every navigation and every close; a show whose serial is
    /// outdated when its transition completes does not fire `change.after`.
    serial: u64,
    hooks: EventHooks,
    ui: UiControls,
    i18n: I18n,
}

impl Inner {
    fn item_ref(&self, index: usize) -> Option<ItemRef> {
        self.registry.by_index(index).map(|item| ItemRef {
            key: item.key().clone(),
            index,
            kind: item.kind().clone(),
        })
    }

    fn navigation_info(&self) -> NavigationInfo {
        NavigationInfo::new(self.current_index, self.registry.len())
    }
}

/// Host collaborators. Kept outside the `RefCell` so calling them never
/// needs a borrow.
struct Host {
    stage: Rc<dyn Stage>,
    transitions: Rc<dyn Transitions>,
    triggers: Option<Rc<dyn TriggerSurface>>,
}

// =============================================================================
// Builder
// =============================================================================

/// Collects configuration and collaborators, then initializes a [`Lightbox`].
pub struct LightboxBuilder {
    config: LightboxConfig,
    backend: Rc<dyn MediaBackend>,
    stage: Rc<dyn Stage>,
    transitions: Option<Rc<dyn Transitions>>,
    triggers: Option<Rc<dyn TriggerSurface>>,
    widgets: Vec<(WidgetSlot, Rc<dyn Widget>)>,
    i18n: Option<I18n>,
    custom_types: Vec<CustomType>,
}

impl LightboxBuilder {
    /// Replaces the default open / close / show-element animations.
    ///
    /// Ignored when `[interface] animations` is off.
    #[must_use]
    pub fn transitions(mut self, transitions: Rc<dyn Transitions>) -> Self {
        self.transitions = Some(transitions);
        self
    }

    #[must_use]
    pub fn triggers(mut self, triggers: Rc<dyn TriggerSurface>) -> Self {
        self.triggers = Some(triggers);
        self
    }

    #[must_use]
    pub fn widget(mut self, slot: WidgetSlot, widget: Rc<dyn Widget>) -> Self {
        self.widgets.push((slot, widget));
        self
    }

    #[must_use]
    pub fn i18n(mut self, i18n: I18n) -> Self {
        self.i18n = Some(i18n);
        self
    }

    #[must_use]
    pub fn custom_type(mut self, custom: CustomType) -> Self {
        self.custom_types.push(custom);
        self
    }

    /// Registers the custom types and the triggers of the configured group.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::DuplicateType`](crate::error::ConfigError::DuplicateType)
    ///   when two custom types share a tag or one reuses a built-in tag
    /// - any registration error of a scanned trigger
    pub fn build(self) -> Result<Lightbox> {
        let mut types = TypeRegistry::with_builtins(self.backend);
        for custom in self.custom_types {
            types.register(custom)?;
        }

        let transitions: Rc<dyn Transitions> = match self.transitions {
            Some(transitions) if self.config.interface.animations => transitions,
            _ => Rc::new(InstantTransitions),
        };
        let i18n = self
            .i18n
            .unwrap_or_else(|| I18n::new(None, &self.config));
        let ui = UiControls::new(&self.config.interface, self.widgets);

        let lightbox = Lightbox {
            inner: Rc::new(RefCell::new(Inner {
                config: self.config,
                types,
                registry: ElementRegistry::new(),
                coordinator: LoadCoordinator::new(),
                overlay: OverlayState::Closed,
                current_index: None,
                direction: Direction::None,
                serial: 0,
                hooks: EventHooks::new(),
                ui,
                i18n,
            })),
            host: Rc::new(Host {
                stage: self.stage,
                transitions,
                triggers: self.triggers,
            }),
        };
        let found = lightbox.scan()?;
        tracing::info!(
            uid = %lightbox.inner.borrow().config.general.uid,
            triggers = found,
            "lightbox initialized"
        );
        Ok(lightbox)
    }
}

// =============================================================================
// Lightbox
// =============================================================================

#[derive(Clone)]
pub struct Lightbox {
    inner: Rc<RefCell<Inner>>,
    host: Rc<Host>,
}

impl Lightbox {
    /// Starts building a lightbox for the given host collaborators.
    pub fn builder(
        config: LightboxConfig,
        backend: Rc<dyn MediaBackend>,
        stage: Rc<dyn Stage>,
    ) -> LightboxBuilder {
        LightboxBuilder {
            config,
            backend,
            stage,
            transitions: None,
            triggers: None,
            widgets: Vec::new(),
            i18n: None,
            custom_types: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Registers triggers of this gallery's group that are not bound yet.
    ///
    /// Returns how many were added. The batch is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns the first descriptor or registration error.
    pub fn scan(&self) -> Result<usize> {
        let Some(triggers) = self.host.triggers.clone() else {
            return Ok(0);
        };
        let uid = self.inner.borrow().config.general.uid.clone();
        let elements = triggers.scan(&uid);

        let entries = {
            let inner = self.inner.borrow();
            elements
                .into_iter()
                .filter(|element| inner.registry.find_by_trigger(element.id).is_none())
                .map(|element| -> Result<(MediaDescriptor, TriggerId)> {
                    Ok((MediaDescriptor::parse(&element.descriptor)?, element.id))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let bindings: Vec<(TriggerId, ItemKey)> = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            let indices = inner.registry.feed_triggers(&inner.types, &entries)?;
            inner.ui.refresh(&inner.navigation_info());
            indices
                .into_iter()
                .zip(&entries)
                .filter_map(|(index, (_, trigger))| {
                    inner
                        .registry
                        .by_index(index)
                        .map(|item| (*trigger, item.key().clone()))
                })
                .collect()
        };
        for (trigger, key) in &bindings {
            triggers.bind(*trigger, key);
        }
        Ok(bindings.len())
    }

    /// Appends items at runtime. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns the first registration error; nothing is added in that case.
    pub fn feed(&self, descriptors: &[MediaDescriptor]) -> Result<Vec<usize>> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let indices = inner.registry.feed(&inner.types, descriptors)?;
        inner.ui.refresh(&inner.navigation_info());
        Ok(indices)
    }

    /// Registers a callback for `open`, `close`, `change.before` or
    /// `change.after`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEvent`](crate::error::ConfigError::UnknownEvent)
    /// for any other name.
    pub fn on<F>(&self, name: &str, callback: F) -> Result<()>
    where
        F: Fn(&EventPayload) + 'static,
    {
        self.inner.borrow_mut().hooks.on(name, callback)
    }

    fn emit(&self, payload: EventPayload) {
        let callback = self.inner.borrow().hooks.callback(payload.event());
        if let Some(callback) = callback {
            callback(&payload);
        }
    }

    // -------------------------------------------------------------------------
    // Open / close
    // -------------------------------------------------------------------------

    /// Opens the overlay.
    ///
    /// Resolves to `false` without effect when already open or opening.
    /// Opening while a close transition runs finishes that close first.
    pub fn open(&self) -> LocalBoxFuture<'static, bool> {
        if self.overlay_state() == OverlayState::Closing {
            self.finish_close();
        }
        let loading_message = {
            let mut inner = self.inner.borrow_mut();
            if inner.overlay.is_open() {
                return future::ready(false).boxed_local();
            }
            inner.overlay = OverlayState::Opening;
            inner.ui.show();
            inner.ui.refresh(&inner.navigation_info());
            inner
                .coordinator
                .is_loading()
                .then(|| inner.i18n.tr("lightbox-loading"))
        };
        tracing::debug!("opening");
        self.host.stage.set_open(true);
        if let Some(message) = &loading_message {
            self.host.stage.set_loading(Some(message));
        }

        let mut handle = self.host.transitions.open();
        if handle.try_complete() {
            return future::ready(self.finish_open()).boxed_local();
        }
        let this = self.clone();
        async move {
            handle.await;
            this.finish_open()
        }
        .boxed_local()
    }

    fn finish_open(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.overlay != OverlayState::Opening {
                return false;
            }
            inner.overlay = OverlayState::Open;
        }
        self.emit(EventPayload::Open);
        true
    }

    /// Closes the overlay.
    ///
    /// Resolves to `false` without effect when already closed or closing.
    /// A pending load is superseded: it still settles into its item's cache.
    pub fn close(&self) -> LocalBoxFuture<'static, bool> {
        {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            if !inner.overlay.is_open() {
                return future::ready(false).boxed_local();
            }
            if let Some(item) = inner.current_index.and_then(|i| inner.registry.by_index(i)) {
                item.before_close();
                if let Some(container) = item.container() {
                    self.host.stage.set_active(container, false);
                }
            }
            inner.coordinator.supersede();
            inner.serial += 1;
            inner.overlay = OverlayState::Closing;
        }
        tracing::debug!("closing");

        let mut handle = self.host.transitions.close();
        if handle.try_complete() {
            return future::ready(self.finish_close()).boxed_local();
        }
        let this = self.clone();
        async move {
            handle.await;
            this.finish_close()
        }
        .boxed_local()
    }

    fn finish_close(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.overlay != OverlayState::Closing {
                return false;
            }
            inner.overlay = OverlayState::Closed;
            inner.current_index = None;
            inner.direction = Direction::None;
            inner.ui.hide();
        }
        self.host.stage.set_loading(None);
        self.host.stage.set_open(false);
        self.emit(EventPayload::Close);
        true
    }

    /// Closes when open, opens otherwise.
    pub fn toggle(&self) -> LocalBoxFuture<'static, bool> {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Shows the next item, staying on the last one at the end.
    pub fn next(&self) -> LocalBoxFuture<'static, NavigationOutcome> {
        let target = {
            let inner = self.inner.borrow();
            navigation::next_index(inner.current_index, inner.registry.len())
        };
        self.navigate(target, Direction::Right)
    }

    /// Shows the previous item, staying on the first one at the start.
    pub fn prev(&self) -> LocalBoxFuture<'static, NavigationOutcome> {
        let target = {
            let inner = self.inner.borrow();
            navigation::prev_index(inner.current_index, inner.registry.len())
        };
        self.navigate(target, Direction::Left)
    }

    /// Shows the item at `index`, clamped into the registry's bounds.
    pub fn jump_to_index(&self, index: i64) -> LocalBoxFuture<'static, NavigationOutcome> {
        let target = navigation::clamp_index(index, self.count());
        self.navigate(target, Direction::None)
    }

    /// Shows the item registered under `key`.
    pub fn jump_to_key(&self, key: &str) -> LocalBoxFuture<'static, NavigationOutcome> {
        let target = self.inner.borrow().registry.find_index(key);
        if target.is_none() {
            tracing::debug!(%key, "jump to unknown key ignored");
        }
        self.navigate(target, Direction::None)
    }

    /// Shows the item registered under `key` and opens the overlay.
    pub fn open_trigger(&self, key: &str) -> LocalBoxFuture<'static, NavigationOutcome> {
        let navigation = self.jump_to_key(key);
        let open = self.open();
        future::join(navigation, open)
            .map(|(outcome, _)| outcome)
            .boxed_local()
    }

    fn navigate(
        &self,
        target: Option<usize>,
        direction: Direction,
    ) -> LocalBoxFuture<'static, NavigationOutcome> {
        match target {
            Some(target) => self.load_and_display(target, direction),
            None => future::ready(NavigationOutcome::Ignored).boxed_local(),
        }
    }

    /// Loads `target` if needed and shows it, unless a newer request
    /// supersedes it first.
    ///
    /// Refused while the overlay is closing: the close owns the display.
    fn load_and_display(
        &self,
        target: usize,
        direction: Direction,
    ) -> LocalBoxFuture<'static, NavigationOutcome> {
        let change = {
            let inner = self.inner.borrow();
            if inner.overlay == OverlayState::Closing {
                tracing::debug!(index = target, "navigation during close refused");
                return future::ready(NavigationOutcome::Superseded).boxed_local();
            }
            if inner.current_index == Some(target) && !inner.coordinator.is_loading() {
                return future::ready(NavigationOutcome::Unchanged).boxed_local();
            }
            let Some(to) = inner.item_ref(target) else {
                return future::ready(NavigationOutcome::Ignored).boxed_local();
            };
            EventPayload::ChangeBefore {
                from: inner.current_index.and_then(|i| inner.item_ref(i)),
                to,
            }
        };
        self.emit(change);

        let (admission, serial, loading_message) = {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            inner.direction = direction;
            inner.serial += 1;
            if let Some(previous) = inner.current_index.and_then(|i| inner.registry.by_index(i)) {
                previous.before_change();
                if let Some(container) = previous.container() {
                    self.host.stage.set_active(container, false);
                }
            }
            let Some(item) = inner.registry.by_index_mut(target) else {
                return future::ready(NavigationOutcome::Ignored).boxed_local();
            };
            let admission = inner.coordinator.admit(item);
            let loading_message = inner
                .overlay
                .is_open()
                .then(|| inner.i18n.tr("lightbox-loading"));
            (admission, inner.serial, loading_message)
        };

        let load = match admission {
            Admission::Cached => return self.show(target),
            Admission::Load(load) | Admission::Joined(load) => load,
        };
        if let Some(message) = &loading_message {
            self.host.stage.set_loading(Some(message));
        }
        let this = self.clone();
        async move {
            let result = load.await;
            if this.settle(target, result) {
                this.show(target).await
            } else if this.shown_for(target, serial) {
                NavigationOutcome::Joined
            } else {
                NavigationOutcome::Superseded
            }
        }
        .boxed_local()
    }

    /// Whether `target` is displayed and no navigation or close happened
    /// since the request tagged `serial`.
    fn shown_for(&self, target: usize, serial: u64) -> bool {
        let inner = self.inner.borrow();
        inner.serial == serial && inner.current_index == Some(target)
    }

    fn settle(&self, target: usize, result: std::result::Result<NodeHandle, LoadError>) -> bool {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let Some(item) = inner.registry.by_index_mut(target) else {
            return false;
        };
        let i18n = &inner.i18n;
        inner.coordinator.settle(item, result, self.host.stage.as_ref(), |err| {
            i18n.tr_with_args("lightbox-load-error", &[("reason", err.reason())])
        })
    }

    /// Displays a settled item and fires `change.after` once its transition
    /// completes, if no newer navigation happened meanwhile.
    fn show(&self, target: usize) -> LocalBoxFuture<'static, NavigationOutcome> {
        let (container, direction, serial, item) = {
            let mut inner = self.inner.borrow_mut();
            inner.current_index = Some(target);
            inner.ui.refresh(&inner.navigation_info());
            let direction = std::mem::take(&mut inner.direction);
            let container = inner.registry.by_index(target).and_then(|i| i.container());
            (container, direction, inner.serial, inner.item_ref(target))
        };
        self.host.stage.set_loading(None);

        let mut handle = match container {
            Some(container) => {
                self.host.stage.set_active(container, true);
                self.host.transitions.show_element(container, direction)
            }
            None => TransitionHandle::completed(),
        };
        tracing::debug!(index = target, ?direction, "showing item");

        if handle.try_complete() {
            return future::ready(self.finish_show(target, serial, item)).boxed_local();
        }
        let this = self.clone();
        async move {
            handle.await;
            this.finish_show(target, serial, item)
        }
        .boxed_local()
    }

    fn finish_show(&self, target: usize, serial: u64, item: Option<ItemRef>) -> NavigationOutcome {
        if self.inner.borrow().serial != serial {
            return NavigationOutcome::Superseded;
        }
        if let Some(item) = item {
            self.emit(EventPayload::ChangeAfter { item });
        }
        NavigationOutcome::Shown(target)
    }

    // -------------------------------------------------------------------------
    // Input and deep links
    // -------------------------------------------------------------------------

    /// Applies a host input event.
    pub fn handle_input(&self, event: InputEvent) -> LocalBoxFuture<'static, ()> {
        let command = {
            let inner = self.inner.borrow();
            input::resolve(event, &inner.config.behavior, inner.overlay.is_open())
        };
        match command {
            Some(Command::Close) => self.close().map(drop).boxed_local(),
            Some(Command::Next) => self.next().map(drop).boxed_local(),
            Some(Command::Prev) => self.prev().map(drop).boxed_local(),
            Some(Command::JumpTo(index)) => self
                .jump_to_index(i64::try_from(index).unwrap_or(i64::MAX))
                .map(drop)
                .boxed_local(),
            Some(Command::OpenTrigger(trigger)) => {
                let key = {
                    let inner = self.inner.borrow();
                    inner
                        .registry
                        .find_by_trigger(trigger)
                        .and_then(|index| inner.registry.by_index(index))
                        .map(|item| item.key().clone())
                };
                match key {
                    Some(key) => self.open_trigger(key.as_str()).map(drop).boxed_local(),
                    None => future::ready(()).boxed_local(),
                }
            }
            None => future::ready(()).boxed_local(),
        }
    }

    /// Replays a deep link: waits for its delay, then opens on its target.
    ///
    /// Resolves to `None` when the link is for another group, the gallery is
    /// empty, or the gallery is already open and the link does not force a
    /// switch. A link with a scroll threshold is not replayed here: arm it and
    /// report scroll positions through [`Self::scroll`].
    pub fn replay(&self, link: &DeepLink) -> LocalBoxFuture<'static, Option<NavigationOutcome>> {
        if link.scroll_threshold.is_some_and(|threshold| threshold > 0) {
            tracing::debug!(threshold = ?link.scroll_threshold, "deep link waits for scroll");
            return future::ready(None).boxed_local();
        }
        self.replay_now(link)
    }

    /// Reports a page scroll position to an armed deep link.
    ///
    /// The link is replayed the first time the position reaches its
    /// threshold; every other call resolves to `None`.
    pub fn scroll(
        &self,
        armed: &mut ArmedDeepLink,
        scroll_y: u32,
    ) -> LocalBoxFuture<'static, Option<NavigationOutcome>> {
        match armed.on_scroll(scroll_y) {
            Some(link) => self.replay_now(link),
            None => future::ready(None).boxed_local(),
        }
    }

    fn replay_now(&self, link: &DeepLink) -> LocalBoxFuture<'static, Option<NavigationOutcome>> {
        let uid = self.inner.borrow().config.general.uid.clone();
        if !link.applies_to(&uid) {
            tracing::debug!(group = ?link.group, %uid, "deep link for another gallery");
            return future::ready(None).boxed_local();
        }
        let this = self.clone();
        let link = link.clone();
        async move {
            if !link.delay.is_zero() {
                tokio::time::sleep(link.delay).await;
            }
            if this.is_open() && !link.force {
                return None;
            }
            tracing::info!(link_target = ?link.target, "replaying deep link");
            let navigation = match &link.target {
                DeepLinkTarget::Key(key) => this.jump_to_key(key),
                DeepLinkTarget::Index(requested) => {
                    let Some(index) = requested.resolve(this.count()) else {
                        return None;
                    };
                    this.jump_to_index(index)
                }
                DeepLinkTarget::Default => this.jump_to_index(0),
            };
            let (outcome, _) = future::join(navigation, this.open()).await;
            Some(outcome)
        }
        .boxed_local()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.borrow().overlay.is_open()
    }

    #[must_use]
    pub fn overlay_state(&self) -> OverlayState {
        self.inner.borrow().overlay
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.borrow().registry.len()
    }

    #[must_use]
    pub fn key_exists(&self, key: &str) -> bool {
        self.inner.borrow().registry.contains_key(key)
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.inner.borrow().current_index
    }

    #[must_use]
    pub fn state(&self) -> GalleryState {
        let inner = self.inner.borrow();
        GalleryState {
            overlay: inner.overlay,
            current_index: inner.current_index,
            loading_key: inner.coordinator.loading_key().cloned(),
            direction: inner.direction,
        }
    }

    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        self.inner.borrow().navigation_info()
    }

    #[must_use]
    pub fn load_state(&self, key: &str) -> Option<LoadState> {
        self.inner
            .borrow()
            .registry
            .find_by_key(key)
            .map(|item| item.load_state())
    }

    #[must_use]
    pub fn content(&self, key: &str) -> Option<RenderedContent> {
        self.inner
            .borrow()
            .registry
            .find_by_key(key)
            .and_then(|item| item.content().cloned())
    }

    #[must_use]
    pub fn config(&self) -> LightboxConfig {
        self.inner.borrow().config.clone()
    }
}

impl fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Lightbox")
            .field("uid", &inner.config.general.uid)
            .field("overlay", &inner.overlay)
            .field("current_index", &inner.current_index)
            .field("count", &inner.registry.len())
            .field("hooks", &inner.hooks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::gallery::input::Key;
    use crate::infrastructure::headless::{
        HeadlessStage, HeadlessWidget, ManualTransitions, ScriptedBackend, StaticTriggers,
        TransitionKind,
    };
    use crate::media::MediaSource;

    struct Fixture {
        lightbox: Lightbox,
        backend: Rc<ScriptedBackend>,
        stage: Rc<HeadlessStage>,
        events: Rc<RefCell<Vec<String>>>,
    }

    impl Fixture {
        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }

        fn clear_events(&self) {
            self.events.borrow_mut().clear();
        }
    }

    fn describe(payload: &EventPayload) -> String {
        match payload {
            EventPayload::Open => "open".to_string(),
            EventPayload::Close => "close".to_string(),
            EventPayload::ChangeBefore { from, to } => format!(
                "before:{}:{}",
                from.as_ref().map_or("-", |item| item.key.as_str()),
                to.key
            ),
            EventPayload::ChangeAfter { item } => format!("after:{}", item.key),
        }
    }

    fn image(key: &str) -> MediaDescriptor {
        MediaDescriptor::new("image")
            .with_key(key)
            .with_param("src", format!("{key}.jpg"))
    }

    fn fixture_with(
        keys: &[&str],
        configure: impl FnOnce(LightboxBuilder) -> LightboxBuilder,
    ) -> Fixture {
        let backend = Rc::new(ScriptedBackend::new());
        let stage = Rc::new(HeadlessStage::new());
        let builder = Lightbox::builder(LightboxConfig::default(), backend.clone(), stage.clone())
            .i18n(I18n::new(Some("en-US"), &LightboxConfig::default()));
        let lightbox = configure(builder).build().expect("valid setup");

        let descriptors: Vec<_> = keys.iter().map(|key| image(key)).collect();
        lightbox.feed(&descriptors).expect("valid descriptors");

        let events = Rc::new(RefCell::new(Vec::new()));
        for name in ["open", "close", "change.before", "change.after"] {
            let events = Rc::clone(&events);
            lightbox
                .on(name, move |payload| events.borrow_mut().push(describe(payload)))
                .expect("known event");
        }
        Fixture {
            lightbox,
            backend,
            stage,
            events,
        }
    }

    fn fixture(keys: &[&str]) -> Fixture {
        fixture_with(keys, |builder| builder)
    }

    #[tokio::test]
    async fn jump_to_key_loads_once_and_fires_change_events() {
        let f = fixture(&["a", "b", "c"]);

        let navigation = f.lightbox.jump_to_key("b");
        assert_eq!(f.events(), vec!["before:-:b"]);

        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(navigation.await, NavigationOutcome::Shown(1));

        assert_eq!(f.events(), vec!["before:-:b", "after:b"]);
        assert_eq!(f.lightbox.current_index(), Some(1));
        assert_eq!(f.backend.load_count("b.jpg"), 1);
        assert_eq!(f.stage.active_key(), Some(ItemKey::from("b")));
        assert_eq!(f.stage.loading_message(), None);
    }

    #[tokio::test]
    async fn superseded_load_never_reverts_index() {
        let f = fixture(&["a", "b", "c"]);

        let to_a = f.lightbox.jump_to_key("a");
        let to_c = f.lightbox.jump_to_key("c");

        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(to_a.await, NavigationOutcome::Superseded);
        assert_eq!(f.lightbox.current_index(), None);
        assert_eq!(f.lightbox.state().loading_key, Some(ItemKey::from("c")));
        assert_eq!(f.lightbox.load_state("a"), Some(LoadState::Loaded));
        assert!(f.stage.active_containers().is_empty());

        f.backend.resolve("c.jpg").expect("load pending");
        assert_eq!(to_c.await, NavigationOutcome::Shown(2));
        assert_eq!(f.stage.active_key(), Some(ItemKey::from("c")));

        // The superseded result was cached.
        assert_eq!(f.lightbox.jump_to_key("a").await, NavigationOutcome::Shown(0));
        assert_eq!(f.backend.load_count("a.jpg"), 1);
        assert_eq!(f.stage.active_key(), Some(ItemKey::from("a")));
    }

    #[tokio::test]
    async fn late_settle_after_newer_show_does_not_clobber() {
        let f = fixture(&["a", "b"]);

        let to_a = f.lightbox.jump_to_key("a");
        let to_b = f.lightbox.jump_to_key("b");
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(to_b.await, NavigationOutcome::Shown(1));

        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(to_a.await, NavigationOutcome::Superseded);
        assert_eq!(f.lightbox.current_index(), Some(1));
        assert_eq!(f.stage.active_key(), Some(ItemKey::from("b")));
    }

    #[tokio::test]
    async fn prev_at_first_item_is_a_noop() {
        let prev = HeadlessWidget::new();
        let widget = prev.clone();
        let f = fixture_with(&["a", "b", "c"], move |builder| {
            builder.widget(WidgetSlot::Prev, Rc::new(widget))
        });

        let first = f.lightbox.jump_to_index(0);
        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(first.await, NavigationOutcome::Shown(0));
        assert!(!prev.state().enabled);
        f.clear_events();

        assert_eq!(f.lightbox.prev().await, NavigationOutcome::Unchanged);
        assert_eq!(f.lightbox.current_index(), Some(0));
        assert!(!prev.state().enabled);
        assert!(f.events().is_empty());
        assert_eq!(f.lightbox.state().direction, Direction::None);
    }

    #[tokio::test]
    async fn next_walks_and_clamps_at_last() {
        let f = fixture(&["a", "b"]);

        let step = f.lightbox.next();
        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(step.await, NavigationOutcome::Shown(0));

        let step = f.lightbox.next();
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(step.await, NavigationOutcome::Shown(1));

        assert_eq!(f.lightbox.next().await, NavigationOutcome::Unchanged);
        assert_eq!(f.lightbox.jump_to_index(99).await, NavigationOutcome::Unchanged);
        assert_eq!(f.lightbox.jump_to_index(-5).await, NavigationOutcome::Shown(0));
    }

    #[tokio::test]
    async fn failed_item_shows_placeholder_and_is_not_reloaded() {
        let f = fixture(&["a", "b"]);

        let to_a = f.lightbox.jump_to_key("a");
        assert!(f.backend.fail("a.jpg", "404"));
        assert_eq!(to_a.await, NavigationOutcome::Shown(0));
        assert_eq!(f.lightbox.load_state("a"), Some(LoadState::Failed));
        assert_eq!(
            f.lightbox.content("a"),
            Some(RenderedContent::Error {
                message: "Unable to load content (404)".to_string(),
                reason: "404".to_string(),
            })
        );

        let to_b = f.lightbox.next();
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(to_b.await, NavigationOutcome::Shown(1));

        assert_eq!(f.lightbox.prev().await, NavigationOutcome::Shown(0));
        assert_eq!(f.backend.load_count("a.jpg"), 1);
    }

    #[tokio::test]
    async fn open_and_close_are_idempotent() {
        let f = fixture(&["a"]);

        assert!(f.lightbox.open().await);
        assert!(!f.lightbox.open().await);
        assert!(f.stage.is_open());
        assert_eq!(f.events(), vec!["open"]);

        assert!(f.lightbox.close().await);
        assert!(!f.lightbox.close().await);
        assert!(!f.stage.is_open());
        assert_eq!(f.events(), vec!["open", "close"]);

        assert!(f.lightbox.toggle().await);
        assert!(f.lightbox.is_open());
    }

    #[tokio::test]
    async fn close_resets_state_and_supersedes_pending_load() {
        let f = fixture(&["a", "b"]);
        assert!(f.lightbox.open().await);

        let to_a = f.lightbox.jump_to_key("a");
        assert!(f.lightbox.close().await);
        assert_eq!(f.lightbox.state(), GalleryState::default());

        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(to_a.await, NavigationOutcome::Superseded);
        assert_eq!(f.lightbox.current_index(), None);
        assert_eq!(f.lightbox.load_state("a"), Some(LoadState::Loaded));
        assert!(f.stage.active_containers().is_empty());
    }

    #[tokio::test]
    async fn rejoining_a_running_load_shares_its_settlement() {
        let f = fixture(&["a", "b"]);

        let first = f.lightbox.jump_to_key("a");
        let other = f.lightbox.jump_to_key("b");
        let rejoin = f.lightbox.jump_to_key("a");
        assert_eq!(f.lightbox.state().loading_key, Some(ItemKey::from("a")));

        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(first.await, NavigationOutcome::Shown(0));
        assert_eq!(rejoin.await, NavigationOutcome::Joined);
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(other.await, NavigationOutcome::Superseded);

        assert_eq!(f.lightbox.current_index(), Some(0));
        assert_eq!(f.backend.load_count("a.jpg"), 1);
        assert_eq!(f.events().iter().filter(|e| *e == "after:a").count(), 1);
    }

    #[tokio::test]
    async fn dropped_navigation_leaves_its_load_to_the_next_request() {
        let f = fixture(&["a", "b"]);

        drop(f.lightbox.jump_to_key("a"));
        let to_b = f.lightbox.jump_to_key("b");
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(to_b.await, NavigationOutcome::Shown(1));

        f.backend.resolve("a.jpg").expect("load kept alive by its item");
        assert_eq!(f.lightbox.jump_to_key("a").await, NavigationOutcome::Shown(0));
        assert_eq!(f.lightbox.load_state("a"), Some(LoadState::Loaded));
        assert_eq!(f.backend.load_count("a.jpg"), 1);
        assert_eq!(f.stage.active_key(), Some(ItemKey::from("a")));
        assert_eq!(f.stage.loading_message(), None);
    }

    #[tokio::test]
    async fn loading_indicator_shows_only_while_open() {
        let f = fixture(&["a"]);

        let to_a = f.lightbox.jump_to_key("a");
        assert_eq!(f.stage.loading_message(), None);

        assert!(f.lightbox.open().await);
        assert_eq!(f.stage.loading_message().as_deref(), Some("Loading…"));

        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(to_a.await, NavigationOutcome::Shown(0));
        assert_eq!(f.stage.loading_message(), None);
    }

    #[tokio::test]
    async fn animated_open_passes_through_opening() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let f = fixture_with(&["a"], move |builder| builder.transitions(provider));

        let opening = f.lightbox.open();
        assert_eq!(f.lightbox.overlay_state(), OverlayState::Opening);
        assert!(f.lightbox.is_open());
        assert!(!f.lightbox.open().await);
        assert!(f.events().is_empty());

        assert!(transitions.complete_next());
        assert!(opening.await);
        assert_eq!(f.lightbox.overlay_state(), OverlayState::Open);
        assert_eq!(f.events(), vec!["open"]);
    }

    #[tokio::test]
    async fn close_during_opening_wins() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let f = fixture_with(&["a"], move |builder| builder.transitions(provider));

        let opening = f.lightbox.open();
        let closing = f.lightbox.close();
        assert_eq!(f.lightbox.overlay_state(), OverlayState::Closing);

        transitions.complete_all();
        assert!(!opening.await);
        assert!(closing.await);
        assert_eq!(f.lightbox.overlay_state(), OverlayState::Closed);
        assert_eq!(f.events(), vec!["close"]);
    }

    /// Opens through `transitions` and shows each key in turn.
    async fn open_and_show(f: &Fixture, transitions: &ManualTransitions, keys: &[&str]) {
        let opening = f.lightbox.open();
        transitions.complete_all();
        assert!(opening.await);
        for key in keys {
            let mut step = f.lightbox.jump_to_key(key);
            f.backend
                .resolve(&format!("{key}.jpg"))
                .expect("load pending");
            assert_eq!((&mut step).now_or_never(), None);
            transitions.complete_all();
            assert!(matches!(step.await, NavigationOutcome::Shown(_)));
        }
    }

    #[tokio::test]
    async fn navigation_during_close_transition_is_refused() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let f = fixture_with(&["a", "b"], move |builder| builder.transitions(provider));
        open_and_show(&f, &transitions, &["a", "b"]).await;
        f.clear_events();

        let closing = f.lightbox.close();
        assert_eq!(f.lightbox.jump_to_key("a").await, NavigationOutcome::Superseded);
        transitions.complete_all();
        assert!(closing.await);

        assert_eq!(f.lightbox.current_index(), None);
        assert!(f.stage.active_containers().is_empty());
        assert_eq!(f.events(), vec!["close"]);

        let reopening = f.lightbox.open();
        transitions.complete_all();
        assert!(reopening.await);
        let mut to_b = f.lightbox.jump_to_key("b");
        assert_eq!((&mut to_b).now_or_never(), None);
        transitions.complete_all();
        assert_eq!(to_b.await, NavigationOutcome::Shown(1));
        assert_eq!(
            f.stage.active_containers(),
            vec![f.stage.container_of("b").expect("b is mounted")]
        );
    }

    #[tokio::test]
    async fn opening_during_close_transition_finishes_the_close() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let f = fixture_with(&["a"], move |builder| builder.transitions(provider));
        open_and_show(&f, &transitions, &["a"]).await;
        f.clear_events();

        let closing = f.lightbox.close();
        let reopening = f.lightbox.open();
        assert_eq!(f.lightbox.current_index(), None);
        assert_eq!(f.lightbox.overlay_state(), OverlayState::Opening);

        transitions.complete_all();
        assert!(!closing.await);
        assert!(reopening.await);
        assert_eq!(f.events(), vec!["close", "open"]);
        assert!(f.stage.active_containers().is_empty());
        assert!(f.stage.is_open());
    }

    #[tokio::test]
    async fn disabled_animations_ignore_custom_transitions() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let backend = Rc::new(ScriptedBackend::new());
        let mut config = LightboxConfig::default();
        config.interface.animations = false;
        let lightbox = Lightbox::builder(config, backend, Rc::new(HeadlessStage::new()))
            .transitions(provider)
            .build()
            .expect("valid setup");

        assert!(lightbox.open().await);
        assert!(transitions.started().is_empty());
    }

    #[tokio::test]
    async fn navigation_during_show_transition_suppresses_change_after() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let f = fixture_with(&["a", "b"], move |builder| builder.transitions(provider));

        let mut to_a = f.lightbox.jump_to_key("a");
        f.backend.resolve("a.jpg").expect("load pending");
        // Runs a's settle and show; its transition is still running.
        assert_eq!((&mut to_a).now_or_never(), None);
        assert_eq!(f.lightbox.current_index(), Some(0));

        let mut to_b = f.lightbox.jump_to_key("b");
        f.backend.resolve("b.jpg").expect("load pending");
        transitions.complete_all();
        assert_eq!(to_a.await, NavigationOutcome::Superseded);

        assert_eq!((&mut to_b).now_or_never(), None);
        transitions.complete_all();
        assert_eq!(to_b.await, NavigationOutcome::Shown(1));

        assert_eq!(f.events(), vec!["before:-:a", "before:a:b", "after:b"]);
    }

    #[tokio::test]
    async fn show_transition_receives_navigation_direction() {
        let transitions = Rc::new(ManualTransitions::new());
        let provider = transitions.clone();
        let f = fixture_with(&["a", "b"], move |builder| builder.transitions(provider));

        let mut to_a = f.lightbox.jump_to_index(0);
        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!((&mut to_a).now_or_never(), None);
        transitions.complete_all();
        assert_eq!(to_a.await, NavigationOutcome::Shown(0));

        let mut to_b = f.lightbox.next();
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!((&mut to_b).now_or_never(), None);
        transitions.complete_all();
        assert_eq!(to_b.await, NavigationOutcome::Shown(1));

        let container_a = f.stage.container_of("a").expect("a is mounted");
        let container_b = f.stage.container_of("b").expect("b is mounted");
        assert_eq!(
            transitions.started(),
            vec![
                TransitionKind::ShowElement(container_a, Direction::None),
                TransitionKind::ShowElement(container_b, Direction::Right),
            ]
        );
        assert_eq!(f.lightbox.state().direction, Direction::None);
    }

    #[tokio::test]
    async fn callbacks_may_reenter_the_lightbox() {
        let f = fixture(&["a"]);
        let handle = f.lightbox.clone();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        f.lightbox
            .on("change.after", move |_| {
                *sink.borrow_mut() = handle.current_index();
            })
            .expect("known event");

        let to_a = f.lightbox.jump_to_key("a");
        f.backend.resolve("a.jpg").expect("load pending");
        assert_eq!(to_a.await, NavigationOutcome::Shown(0));
        assert_eq!(*seen.borrow(), Some(0));
    }

    #[tokio::test]
    async fn input_respects_behavior_switches() {
        let f = fixture(&["a", "b"]);

        f.lightbox.handle_input(InputEvent::KeyPressed(Key::Escape)).await;
        assert!(f.events().is_empty());

        assert!(f.lightbox.open().await);
        let step = f.lightbox.handle_input(InputEvent::KeyPressed(Key::ArrowRight));
        f.backend.resolve("a.jpg").expect("load pending");
        step.await;
        assert_eq!(f.lightbox.current_index(), Some(0));

        f.lightbox.handle_input(InputEvent::BackdropClicked).await;
        assert!(!f.lightbox.is_open());
    }

    #[tokio::test]
    async fn trigger_click_opens_on_its_item() {
        let triggers = Rc::new(StaticTriggers::new());
        triggers.add(r#"{"type":"image","group":1,"src":"a.jpg","key":"a"}"#);
        let second = triggers.add(r#"{"type":"image","group":"1","src":"b.jpg"}"#);
        triggers.add(r#"{"type":"image","group":2,"src":"other.jpg"}"#);
        let surface = triggers.clone();
        let f = fixture_with(&[], move |builder| builder.triggers(surface));

        assert_eq!(f.lightbox.count(), 2);
        assert!(f.lightbox.key_exists("a"));
        assert_eq!(triggers.bound().len(), 2);
        assert_eq!(f.lightbox.scan(), Ok(0));

        let click = f.lightbox.handle_input(InputEvent::TriggerClicked(second));
        f.backend.resolve("b.jpg").expect("load pending");
        click.await;
        assert!(f.lightbox.is_open());
        assert_eq!(f.lightbox.current_index(), Some(1));
    }

    #[tokio::test]
    async fn invalid_trigger_descriptor_fails_init() {
        let triggers = Rc::new(StaticTriggers::new());
        triggers.add(r#"{"type":"audio","group":1,"src":"a.mp3"}"#);
        let result = Lightbox::builder(
            LightboxConfig::default(),
            Rc::new(ScriptedBackend::new()),
            Rc::new(HeadlessStage::new()),
        )
        .triggers(triggers)
        .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnknownType(tag))) if tag == "audio"
        ));
    }

    struct Panorama;

    impl MediaSource for Panorama {
        fn kind(&self) -> crate::domain::media::MediaKind {
            crate::domain::media::MediaKind::Custom("panorama".to_string())
        }

        fn load(&self) -> crate::application::port::LoadFuture {
            Box::pin(future::ready(Ok(NodeHandle(42))))
        }
    }

    #[tokio::test]
    async fn custom_types_load_through_their_factory() {
        let f = fixture_with(&[], |builder| {
            builder.custom_type(CustomType::new("panorama", |_| Ok(Box::new(Panorama))))
        });
        f.lightbox
            .feed(&[MediaDescriptor::new("panorama").with_key("p")])
            .expect("panorama is registered");

        assert_eq!(f.lightbox.jump_to_key("p").await, NavigationOutcome::Shown(0));
        assert_eq!(
            f.lightbox.content("p"),
            Some(RenderedContent::Media(NodeHandle(42)))
        );
    }

    #[test]
    fn duplicate_custom_type_fails_init() {
        let result = Lightbox::builder(
            LightboxConfig::default(),
            Rc::new(ScriptedBackend::new()),
            Rc::new(HeadlessStage::new()),
        )
        .custom_type(CustomType::new("panorama", |_| Ok(Box::new(Panorama))))
        .custom_type(CustomType::new("panorama", |_| Ok(Box::new(Panorama))))
        .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::DuplicateType(tag))) if tag == "panorama"
        ));
    }

    #[test]
    fn unknown_event_name_is_rejected() {
        let f = fixture(&[]);
        assert_eq!(
            f.lightbox.on("changed", |_| {}),
            Err(Error::Config(ConfigError::UnknownEvent("changed".into())))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deep_link_opens_last_item_after_delay() {
        let f = fixture(&["a", "b", "c"]);
        let link = DeepLink::parse("#g=1&i=last&d=300").expect("recognized keys");

        let replay = f.lightbox.replay(&link);
        let backend = f.backend.clone();
        let settle = async move {
            while !backend.is_pending("c.jpg") {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
            backend.resolve("c.jpg");
        };
        let (outcome, ()) = tokio::join!(replay, settle);

        assert_eq!(outcome, Some(NavigationOutcome::Shown(2)));
        assert!(f.lightbox.is_open());
    }

    #[tokio::test]
    async fn deep_link_for_other_group_or_without_force_is_skipped() {
        let f = fixture(&["a", "b"]);
        let other = DeepLink::parse("g=9&i=1").expect("recognized keys");
        assert_eq!(f.lightbox.replay(&other).await, None);

        assert!(f.lightbox.open().await);
        let polite = DeepLink::parse("k=b&f=0").expect("recognized keys");
        assert_eq!(f.lightbox.replay(&polite).await, None);
        assert_eq!(f.lightbox.current_index(), None);
    }

    #[tokio::test]
    async fn scroll_threshold_holds_deep_link_until_reached() {
        let f = fixture(&["a", "b"]);
        let link = DeepLink::parse("#k=b&s=400").expect("recognized keys");
        assert_eq!(f.lightbox.replay(&link).await, None);
        assert!(!f.lightbox.is_open());

        let mut armed = link.arm();
        assert_eq!(f.lightbox.scroll(&mut armed, 120).await, None);
        assert!(!f.lightbox.is_open());
        assert_eq!(f.backend.load_count("b.jpg"), 0);

        let mut replay = f.lightbox.scroll(&mut armed, 400);
        assert_eq!((&mut replay).now_or_never(), None);
        f.backend.resolve("b.jpg").expect("load pending");
        assert_eq!(replay.await, Some(NavigationOutcome::Shown(1)));
        assert!(f.lightbox.is_open());

        assert_eq!(f.lightbox.scroll(&mut armed, 900).await, None);
    }
}
