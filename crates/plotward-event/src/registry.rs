//! Policy registry: one subscription point for all policies.
//!
//! The host forwards every world event to [`PolicyRegistry::dispatch`]
//! once, instead of wiring a listener per policy per event kind.
//! Removing a policy from the registry removes its only subscription.
//!
//! Thread-safe when wrapped as [`SharedPolicyRegistry`]:
//! - `dispatch()` takes `&self` (read lock)
//! - `register()` / `unregister()` / `set_enabled()` take `&mut self`
//!   (write lock)

use crate::{EventAdapter, Messenger, Outcome, WorldEvent, WorldView};
use parking_lot::RwLock;
use plotward_policy::ProtectionPolicy;
use plotward_types::PolicyId;
use std::sync::Arc;

/// A registry shared between the event thread and command handlers.
pub type SharedPolicyRegistry = Arc<RwLock<PolicyRegistry>>;

/// A registered policy with metadata.
struct RegisteredPolicy {
    id: PolicyId,
    policy: ProtectionPolicy,
    /// The plugin that owns this policy (for bulk removal on unload).
    /// Config-derived policies have `owner: None`.
    owner: Option<String>,
}

/// Ordered collection of policies.
///
/// Policies see events in registration order. Every policy sees every
/// event, including ones an earlier policy already cancelled.
///
/// # Example
///
/// ```
/// use plotward_event::testing::{MockWorld, RecordingMessenger};
/// use plotward_event::{Outcome, PolicyRegistry, WorldEvent};
/// use plotward_policy::{ProtectionPolicy, ProtectionSet};
/// use plotward_types::{BlockPos, Cuboid};
///
/// let mut registry = PolicyRegistry::new();
/// let id = registry.register(ProtectionPolicy::new(
///     Cuboid::new("world", [0, 0, 0], [15, 255, 15]),
///     ProtectionSet::FLOW,
/// ));
///
/// let world = MockWorld::new();
/// let messenger = RecordingMessenger::new();
/// let mut event = WorldEvent::liquid_flow(
///     BlockPos::new("world", 16, 64, 0),
///     BlockPos::new("world", 15, 64, 0),
/// );
/// let outcomes = registry.dispatch(&world, &messenger, &mut event);
/// assert_eq!(outcomes, vec![(id, Outcome::Cancelled)]);
/// ```
pub struct PolicyRegistry {
    policies: Vec<RegisteredPolicy>,
}

impl PolicyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Creates an empty registry behind a shared lock.
    #[must_use]
    pub fn shared() -> SharedPolicyRegistry {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Registers a policy. Returns its ID.
    pub fn register(&mut self, policy: ProtectionPolicy) -> PolicyId {
        self.register_inner(policy, None)
    }

    /// Registers a policy owned by a plugin.
    ///
    /// Owned policies are removed together by
    /// [`unregister_by_owner`](Self::unregister_by_owner).
    pub fn register_owned(
        &mut self,
        policy: ProtectionPolicy,
        owner: impl Into<String>,
    ) -> PolicyId {
        self.register_inner(policy, Some(owner.into()))
    }

    fn register_inner(&mut self, policy: ProtectionPolicy, owner: Option<String>) -> PolicyId {
        let id = PolicyId::new();
        tracing::info!(
            policy_id = %id,
            owner = owner.as_deref(),
            protections = %policy.protections(),
            "policy registered"
        );
        self.policies.push(RegisteredPolicy { id, policy, owner });
        id
    }

    /// Unregisters a policy by ID. Returns the policy if found.
    pub fn unregister(&mut self, id: PolicyId) -> Option<ProtectionPolicy> {
        let pos = self.policies.iter().position(|rp| rp.id == id)?;
        tracing::info!(policy_id = %id, "policy unregistered");
        Some(self.policies.remove(pos).policy)
    }

    /// Unregisters all policies owned by `owner`.
    ///
    /// Returns the number of policies removed.
    pub fn unregister_by_owner(&mut self, owner: &str) -> usize {
        let before = self.policies.len();
        self.policies.retain(|rp| rp.owner.as_deref() != Some(owner));
        let removed = before - self.policies.len();
        if removed > 0 {
            tracing::info!(owner, removed, "owner policies unregistered");
        }
        removed
    }

    /// Returns the policy with `id`.
    #[must_use]
    pub fn get(&self, id: PolicyId) -> Option<&ProtectionPolicy> {
        self.policies
            .iter()
            .find(|rp| rp.id == id)
            .map(|rp| &rp.policy)
    }

    /// Returns the policy with `id` for reconfiguration.
    pub fn get_mut(&mut self, id: PolicyId) -> Option<&mut ProtectionPolicy> {
        self.policies
            .iter_mut()
            .find(|rp| rp.id == id)
            .map(|rp| &mut rp.policy)
    }

    /// Enables or disables a policy by ID. Returns `true` if found.
    pub fn set_enabled(&mut self, id: PolicyId, enabled: bool) -> bool {
        let Some(policy) = self.get_mut(id) else {
            return false;
        };
        if enabled {
            policy.enable();
        } else {
            policy.disable();
        }
        tracing::info!(policy_id = %id, enabled, "policy toggled");
        true
    }

    /// Returns the registered IDs in dispatch order.
    #[must_use]
    pub fn ids(&self) -> Vec<PolicyId> {
        self.policies.iter().map(|rp| rp.id).collect()
    }

    /// Returns the number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns `true` if no policies are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Delivers `event` to every policy in registration order.
    ///
    /// Returns each policy's outcome. Disabled policies report
    /// [`Outcome::Ignored`].
    pub fn dispatch(
        &self,
        world: &dyn WorldView,
        messenger: &dyn Messenger,
        event: &mut WorldEvent,
    ) -> Vec<(PolicyId, Outcome)> {
        let adapter = EventAdapter::new(world, messenger);
        self.policies
            .iter()
            .map(|rp| (rp.id, adapter.handle(&rp.policy, event)))
            .collect()
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
