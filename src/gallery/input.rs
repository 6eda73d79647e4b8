// SPDX-License-Identifier: MPL-2.0
//! Host input translated into gallery commands.
//!
//! Keyboard and backdrop input only act while the overlay is open and only
//! when the matching `[behavior]` switch is on. Widget and trigger clicks
//! always act.

use crate::config::BehaviorConfig;
use crate::domain::media::TriggerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyPressed(Key),
    /// Click on the overlay outside the content bounds.
    BackdropClicked,
    CloseClicked,
    PrevClicked,
    NextClicked,
    /// Click on a bullet, 0-indexed.
    BulletClicked(usize),
    TriggerClicked(TriggerId),
}

/// What an input asks the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Close,
    Next,
    Prev,
    JumpTo(usize),
    OpenTrigger(TriggerId),
}

/// Maps an input to a command, or `None` when it should be ignored.
#[must_use]
pub fn resolve(event: InputEvent, behavior: &BehaviorConfig, is_open: bool) -> Option<Command> {
    match event {
        InputEvent::KeyPressed(Key::Escape) if is_open && behavior.close_on_escape => {
            Some(Command::Close)
        }
        InputEvent::KeyPressed(Key::ArrowLeft) if is_open && behavior.arrow_keys => {
            Some(Command::Prev)
        }
        InputEvent::KeyPressed(Key::ArrowRight) if is_open && behavior.arrow_keys => {
            Some(Command::Next)
        }
        InputEvent::KeyPressed(_) => None,
        InputEvent::BackdropClicked if is_open && behavior.close_on_blur => Some(Command::Close),
        InputEvent::BackdropClicked => None,
        InputEvent::CloseClicked => Some(Command::Close),
        InputEvent::PrevClicked => Some(Command::Prev),
        InputEvent::NextClicked => Some(Command::Next),
        InputEvent::BulletClicked(index) => Some(Command::JumpTo(index)),
        InputEvent::TriggerClicked(trigger) => Some(Command::OpenTrigger(trigger)),
    }
}
