// SPDX-License-Identifier: MPL-2.0
//! Transition (animation) provider port.
//!
//! Each transition returns a [`TransitionHandle`]. The provider keeps the
//! paired [`TransitionCompleter`] and calls [`TransitionCompleter::complete`]
//! when its animation ends; the gallery awaits the handle.
//!
//! Dropping the completer also completes the handle, so a provider that
//! loses track of an animation can never wedge the gallery.

use crate::domain::media::{ContainerId, Direction};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Observable completion of one transition.
#[derive(Debug)]
#[must_use = "a transition handle does nothing unless awaited"]
pub struct TransitionHandle {
    receiver: Option<oneshot::Receiver<()>>,
}

/// Completion side of a [`TransitionHandle`].
#[derive(Debug)]
pub struct TransitionCompleter {
    sender: oneshot::Sender<()>,
}

impl TransitionHandle {
    /// A handle that is already complete.
    pub fn completed() -> Self {
        Self { receiver: None }
    }

    /// A handle completed later through the returned completer.
    pub fn pending() -> (TransitionCompleter, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            TransitionCompleter { sender },
            Self {
                receiver: Some(receiver),
            },
        )
    }

    /// Checks for completion without waiting.
    ///
    /// Lets the gallery finish synchronously when no animation is running.
    pub fn try_complete(&mut self) -> bool {
        match self.receiver.as_mut() {
            None => true,
            Some(receiver) => match receiver.try_recv() {
                Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                    self.receiver = None;
                    true
                }
                Err(oneshot::error::TryRecvError::Empty) => false,
            },
        }
    }
}

impl Future for TransitionHandle {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match self.receiver.as_mut() {
            None => Poll::Ready(()),
            Some(receiver) => match Pin::new(receiver).poll(cx) {
                Poll::Ready(_) => {
                    self.receiver = None;
                    Poll::Ready(())
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl TransitionCompleter {
    /// Marks the transition as finished.
    pub fn complete(self) {
        let _ = self.sender.send(());
    }
}

/// Pluggable animation functions.
pub trait Transitions {
    /// Animates the overlay in.
    fn open(&self) -> TransitionHandle;

    /// Animates the overlay out.
    fn close(&self) -> TransitionHandle;

    /// Animates an item container in, from `direction`.
    fn show_element(&self, container: ContainerId, direction: Direction) -> TransitionHandle;
}

/// Default provider: every transition completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantTransitions;

impl Transitions for InstantTransitions {
    fn open(&self) -> TransitionHandle {
        TransitionHandle::completed()
    }

    fn close(&self) -> TransitionHandle {
        TransitionHandle::completed()
    }

    fn show_element(&self, _container: ContainerId, _direction: Direction) -> TransitionHandle {
        TransitionHandle::completed()
    }
}
