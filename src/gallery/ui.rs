// SPDX-License-Identifier: MPL-2.0
//! Overlay chrome: close, prev/next, pagination and bullet-list widgets.
//!
//! Only widgets enabled in `[interface]` are kept; the rest are dropped at
//! construction and never driven.

use crate::application::port::{Widget, WidgetSlot};
use crate::config::InterfaceConfig;
use crate::gallery::navigation::NavigationInfo;
use std::fmt;
use std::rc::Rc;

pub struct UiControls {
    widgets: Vec<(WidgetSlot, Rc<dyn Widget>)>,
}

impl UiControls {
    pub fn new(config: &InterfaceConfig, widgets: Vec<(WidgetSlot, Rc<dyn Widget>)>) -> Self {
        let widgets = widgets
            .into_iter()
            .filter(|(slot, _)| match slot {
                WidgetSlot::Close => config.close_button,
                WidgetSlot::Prev | WidgetSlot::Next => config.navigation,
                WidgetSlot::Pagination => config.pagination,
                WidgetSlot::Bulletlist => config.bulletlist,
            })
            .collect();
        Self { widgets }
    }

    pub fn show(&self) {
        self.widgets.iter().for_each(|(_, widget)| widget.show());
    }

    pub fn hide(&self) {
        self.widgets.iter().for_each(|(_, widget)| widget.hide());
    }

    /// Syncs boundary buttons and readouts with the current position.
    pub fn refresh(&self, info: &NavigationInfo) {
        for (slot, widget) in &self.widgets {
            match slot {
                WidgetSlot::Prev => toggle(widget.as_ref(), info.has_previous),
                WidgetSlot::Next => toggle(widget.as_ref(), info.has_next),
                WidgetSlot::Pagination | WidgetSlot::Bulletlist => {
                    if let Some(position) = info.position() {
                        widget.update(position, info.total_count);
                    }
                }
                WidgetSlot::Close => {}
            }
        }
    }
}

fn toggle(widget: &dyn Widget, enabled: bool) {
    if enabled {
        widget.enable();
    } else {
        widget.disable();
    }
}

impl fmt::Debug for UiControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<_> = self.widgets.iter().map(|(slot, _)| slot).collect();
        f.debug_struct("UiControls").field("slots", &slots).finish()
    }
}
