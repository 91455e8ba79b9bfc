//! Test doubles for the host collaborators.
//!
//! Available to this crate's tests and, with the `test-utils` feature,
//! to downstream crates.

use crate::{Messenger, WorldView};
use parking_lot::Mutex;
use plotward_types::{Actor, BlockPos};
use std::collections::HashSet;

/// An in-memory world.
///
/// Every block is plain terrain unless marked otherwise. Anvil resets
/// are recorded in call order.
#[derive(Debug, Default)]
pub struct MockWorld {
    inventories: HashSet<BlockPos>,
    interactables: HashSet<BlockPos>,
    anvils: HashSet<BlockPos>,
    anvil_resets: Mutex<Vec<BlockPos>>,
}

impl MockWorld {
    /// Creates a world of plain terrain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `block` as holding an inventory.
    #[must_use]
    pub fn with_inventory(mut self, block: BlockPos) -> Self {
        self.inventories.insert(block);
        self
    }

    /// Marks `block` as interactable.
    #[must_use]
    pub fn with_interactable(mut self, block: BlockPos) -> Self {
        self.interactables.insert(block);
        self
    }

    /// Marks `block` as an anvil.
    #[must_use]
    pub fn with_anvil(mut self, block: BlockPos) -> Self {
        self.anvils.insert(block);
        self
    }

    /// Returns every anvil reset so far.
    #[must_use]
    pub fn anvil_resets(&self) -> Vec<BlockPos> {
        self.anvil_resets.lock().clone()
    }
}

impl WorldView for MockWorld {
    fn has_inventory(&self, block: &BlockPos) -> bool {
        self.inventories.contains(block)
    }

    fn is_interactable(&self, block: &BlockPos) -> bool {
        self.interactables.contains(block)
    }

    fn is_anvil(&self, block: &BlockPos) -> bool {
        self.anvils.contains(block)
    }

    fn reset_anvil_damage(&self, block: &BlockPos) {
        self.anvil_resets.lock().push(block.clone());
    }
}

/// A messenger that records every delivery.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(Actor, String)>>,
}

impl RecordingMessenger {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every `(recipient, message)` pair in delivery order.
    #[must_use]
    pub fn sent(&self) -> Vec<(Actor, String)> {
        self.sent.lock().clone()
    }

    /// Returns the messages delivered to the player named `name`.
    #[must_use]
    pub fn messages_for(&self, name: &str) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(actor, _)| actor.is_named(name))
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Returns the number of deliveries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    /// Returns `true` if nothing was delivered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every delivery.
    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Messenger for RecordingMessenger {
    fn send_message(&self, actor: &Actor, message: &str) {
        self.sent.lock().push((actor.clone(), message.to_string()));
    }
}
