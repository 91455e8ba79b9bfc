//! Deny messages.
//!
//! Maps protection types to the text shown to a player whose action was
//! denied. A missing entry means the denial is silent.

use crate::{ProtectionSet, ProtectionType};
use std::collections::HashMap;

/// Protection type → user-facing deny message.
///
/// # Example
///
/// ```
/// use plotward_policy::{MessageTable, ProtectionSet, ProtectionType};
///
/// let mut messages = MessageTable::new();
/// messages.set_for(ProtectionSet::DIRECT_PLAYERS, "This area is protected.");
/// messages.set(ProtectionType::ContainerAccess, "That chest is locked.");
///
/// assert_eq!(messages.get(ProtectionType::BreakBlock), Some("This area is protected."));
/// assert_eq!(messages.get(ProtectionType::ContainerAccess), Some("That chest is locked."));
/// assert_eq!(messages.get(ProtectionType::Flow), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: HashMap<ProtectionType, String>,
}

impl MessageTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for one protection type, replacing any previous one.
    pub fn set(&mut self, protection: ProtectionType, message: impl Into<String>) {
        self.messages.insert(protection, message.into());
    }

    /// Sets the same message for every protection type matching `filter`.
    pub fn set_matching<F>(&mut self, filter: F, message: impl Into<String>)
    where
        F: Fn(ProtectionType) -> bool,
    {
        let message = message.into();
        for protection in ProtectionType::ALL.into_iter().filter(|t| filter(*t)) {
            self.messages.insert(protection, message.clone());
        }
    }

    /// Sets the same message for every member of `set`.
    pub fn set_for(&mut self, set: ProtectionSet, message: impl Into<String>) {
        self.set_matching(|t| set.contains_type(t), message);
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Looks up the message for a protection type.
    #[must_use]
    pub fn get(&self, protection: ProtectionType) -> Option<&str> {
        self.messages.get(&protection).map(String::as_str)
    }

    /// Returns the number of protection types with a message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no messages are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_silent() {
        let table = MessageTable::new();
        assert!(table.is_empty());
        for t in ProtectionType::ALL {
            assert_eq!(table.get(t), None);
        }
    }

    #[test]
    fn set_replaces_existing() {
        let mut table = MessageTable::new();
        table.set(ProtectionType::BreakBlock, "first");
        table.set(ProtectionType::BreakBlock, "second");
        assert_eq!(table.get(ProtectionType::BreakBlock), Some("second"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn set_matching_uses_filter() {
        let mut table = MessageTable::new();
        table.set_matching(|t| t.is_direct(), "hands off");
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(ProtectionType::Interact), Some("hands off"));
        assert_eq!(table.get(ProtectionType::Pistons), None);
    }

    #[test]
    fn set_matching_nothing_is_noop() {
        let mut table = MessageTable::new();
        table.set_matching(|_| false, "never");
        assert!(table.is_empty());
    }

    #[test]
    fn set_for_all() {
        let mut table = MessageTable::new();
        table.set_for(ProtectionSet::ALL, "no");
        assert_eq!(table.len(), ProtectionType::ALL.len());
    }

    #[test]
    fn clear_silences_everything() {
        let mut table = MessageTable::new();
        table.set_for(ProtectionSet::ALL, "no");
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(ProtectionType::BreakBlock), None);
    }
}
