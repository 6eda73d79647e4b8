// SPDX-License-Identifier: MPL-2.0
//! Randomized navigation sequences against a reference model.
//!
//! Loads settle out of order through the scripted backend. After every step
//! the displayed index must stay in bounds and equal the last item whose
//! load settled while it was still the most recent request.

use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use lens_lightbox::config::LightboxConfig;
use lens_lightbox::domain::media::{LoadState, MediaDescriptor};
use lens_lightbox::gallery::{Lightbox, NavigationOutcome};
use lens_lightbox::infrastructure::{HeadlessStage, ScriptedBackend};
use proptest::prelude::*;
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
enum Op {
    Next,
    Prev,
    Jump(i64),
    Open,
    Close,
    Resolve(usize),
    Fail(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Next),
        2 => Just(Op::Prev),
        2 => (-2i64..8).prop_map(Op::Jump),
        1 => Just(Op::Open),
        1 => Just(Op::Close),
        3 => (0usize..6).prop_map(Op::Resolve),
        1 => (0usize..6).prop_map(Op::Fail),
    ]
}

/// Expected gallery state under the single-token protocol.
struct Model {
    count: usize,
    open: bool,
    current: Option<usize>,
    token: Option<usize>,
    loading: Vec<bool>,
    settled: Vec<bool>,
}

impl Model {
    fn new(count: usize) -> Self {
        Self {
            count,
            open: false,
            current: None,
            token: None,
            loading: vec![false; count],
            settled: vec![false; count],
        }
    }

    fn last(&self) -> usize {
        self.count - 1
    }

    fn navigate(&mut self, target: usize) {
        if self.current == Some(target) && self.token.is_none() {
            return;
        }
        if self.settled[target] {
            self.token = None;
            self.current = Some(target);
        } else {
            self.loading[target] = true;
            self.token = Some(target);
        }
    }

    fn settle(&mut self, index: usize) {
        self.loading[index] = false;
        self.settled[index] = true;
        if self.token == Some(index) {
            self.token = None;
            self.current = Some(index);
        }
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.token = None;
            self.current = None;
        }
    }
}

fn label(index: usize) -> String {
    format!("{index}.jpg")
}

fn gallery(count: usize) -> (Lightbox, Rc<ScriptedBackend>, Rc<HeadlessStage>) {
    let backend = Rc::new(ScriptedBackend::new());
    let stage = Rc::new(HeadlessStage::new());
    let lightbox = Lightbox::builder(LightboxConfig::default(), backend.clone(), stage.clone())
        .build()
        .expect("valid setup");
    let descriptors: Vec<_> = (0..count)
        .map(|i| {
            MediaDescriptor::new("image")
                .with_key(i.to_string())
                .with_param("src", label(i))
        })
        .collect();
    lightbox.feed(&descriptors).expect("valid descriptors");
    (lightbox, backend, stage)
}

/// Polls every pending navigation once, keeping the unfinished ones.
fn drive(pending: &mut Vec<LocalBoxFuture<'static, NavigationOutcome>>) {
    pending.retain_mut(|navigation| navigation.now_or_never().is_none());
}

proptest! {
    #[test]
    fn last_authoritative_request_wins(
        count in 1usize..6,
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let (lightbox, backend, stage) = gallery(count);
        let mut model = Model::new(count);
        let mut pending = Vec::new();

        for op in ops {
            match op {
                Op::Next => {
                    let target = model.current.map_or(0, |i| (i + 1).min(model.last()));
                    model.navigate(target);
                    pending.push(lightbox.next());
                }
                Op::Prev => {
                    let target = model.current.map_or(0, |i| i.saturating_sub(1));
                    model.navigate(target);
                    pending.push(lightbox.prev());
                }
                Op::Jump(index) => {
                    let target = usize::try_from(index.max(0)).unwrap_or(0).min(model.last());
                    model.navigate(target);
                    pending.push(lightbox.jump_to_index(index));
                }
                Op::Open => {
                    model.open = true;
                    let _ = lightbox.open().now_or_never();
                }
                Op::Close => {
                    model.close();
                    let _ = lightbox.close().now_or_never();
                }
                Op::Resolve(index) | Op::Fail(index) => {
                    let index = index % count;
                    if backend.is_pending(&label(index)) {
                        if matches!(op, Op::Fail(_)) {
                            let _ = backend.fail(&label(index), "404");
                        } else {
                            let _ = backend.resolve(&label(index));
                        }
                        model.settle(index);
                    }
                }
            }
            drive(&mut pending);

            let current = lightbox.current_index();
            prop_assert!(current.is_none_or(|i| i < count));
            prop_assert_eq!(current, model.current);
            prop_assert_eq!(lightbox.is_open(), model.open);

            let state = lightbox.state();
            prop_assert_eq!(
                state.loading_key.as_ref().map(|key| key.to_string()),
                model.token.map(|i| i.to_string())
            );
            for i in 0..count {
                let expected = if model.settled[i] {
                    None
                } else if model.loading[i] {
                    Some(LoadState::Loading)
                } else {
                    Some(LoadState::NotLoaded)
                };
                let actual = lightbox.load_state(&i.to_string());
                match expected {
                    Some(loading) => prop_assert_eq!(actual, Some(loading)),
                    None => prop_assert!(matches!(
                        actual,
                        Some(LoadState::Loaded | LoadState::Failed)
                    )),
                }
                prop_assert!(backend.load_count(&label(i)) <= 1);
            }

            let active = stage.active_containers();
            prop_assert!(active.len() <= 1);
            if let Some(key) = stage.active_key() {
                prop_assert_eq!(Some(key.to_string()), current.map(|i| i.to_string()));
            }
        }
    }
}
