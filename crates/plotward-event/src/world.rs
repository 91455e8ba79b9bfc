//! Host collaborators.
//!
//! The hosting server owns the real world and the chat transport. The
//! adapter only needs a handful of read-only block queries plus a way to
//! tell a player why they were stopped.

use plotward_types::{Actor, BlockPos};

/// Read-only block queries the adapter needs from the host.
///
/// Implementations must be cheap; they are called on the event thread
/// while the host waits for a verdict.
pub trait WorldView {
    /// Returns `true` if the block's state holds an inventory (chest,
    /// furnace, hopper, ...).
    fn has_inventory(&self, block: &BlockPos) -> bool;

    /// Returns `true` if right-clicking the block does something (doors,
    /// levers, buttons, ...). Plain terrain returns `false`.
    fn is_interactable(&self, block: &BlockPos) -> bool;

    /// Returns `true` if the block is any anvil variant.
    fn is_anvil(&self, _block: &BlockPos) -> bool {
        false
    }

    /// Restores an anvil to its undamaged state.
    ///
    /// Best-effort and cosmetic. Hosts whose block model cannot express
    /// this keep the default no-op.
    fn reset_anvil_damage(&self, _block: &BlockPos) {}
}

/// Delivers chat text to a single player.
pub trait Messenger {
    /// Sends `message` to `actor`.
    fn send_message(&self, actor: &Actor, message: &str);
}

/// A messenger that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMessenger;

impl Messenger for NullMessenger {
    fn send_message(&self, _actor: &Actor, _message: &str) {}
}
