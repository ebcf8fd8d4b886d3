// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer iteration.

use super::id::LayerId;
use super::store::ParallaxStore;

/// An iterator over the live layers of a store, in slot order.
///
/// Created by [`ParallaxStore::layers`].
#[derive(Debug)]
pub struct Layers<'a> {
    store: &'a ParallaxStore,
    next: u32,
}

impl<'a> Layers<'a> {
    pub(crate) fn new(store: &'a ParallaxStore) -> Self {
        Self { store, next: 0 }
    }
}

impl Iterator for Layers<'_> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        while self.next < self.store.len {
            let idx = self.next;
            self.next += 1;
            if !self.store.free_list.contains(&idx) {
                return Some(LayerId {
                    idx,
                    generation: self.store.generation[idx as usize],
                });
            }
        }
        None
    }
}
