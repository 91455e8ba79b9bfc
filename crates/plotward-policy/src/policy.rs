//! The protection policy engine.
//!
//! A [`ProtectionPolicy`] combines four things:
//!
//! ```text
//! Deny = protections ∋ type  ∧  membership(block)  ∧  ¬bypass(actor, type, block)
//! ```
//!
//! | Part | Type | Controls |
//! |------|------|----------|
//! | Protections | [`ProtectionSet`] | which kinds of action are guarded |
//! | Membership | [`Membership`] | which blocks are guarded |
//! | Bypasses | [`BypassChain`] | who/what is exempt |
//! | Messages | [`MessageTable`] | what a denied actor is told |
//!
//! Evaluation is a pure function of its inputs. The enabled flag is not
//! consulted here; it gates whether events are handed to the policy at
//! all (see the event adapter).

use crate::{BypassChain, MessageTable, ProtectionSet, ProtectionType, Verdict};
use plotward_types::{Actor, BlockPos, Cuboid};
use std::fmt;

/// Decides whether a block falls under a policy's protection.
///
/// Implemented for closures `Fn(&BlockPos) -> bool` and for [`Cuboid`].
/// Implementations are called read-only, possibly once per block of an
/// explosion, and must not panic for blocks outside their world.
pub trait Membership: Send + Sync {
    /// Returns `true` if `block` is protected by this policy.
    fn contains(&self, block: &BlockPos) -> bool;
}

impl<F> Membership for F
where
    F: Fn(&BlockPos) -> bool + Send + Sync,
{
    fn contains(&self, block: &BlockPos) -> bool {
        self(block)
    }
}

impl Membership for Cuboid {
    fn contains(&self, block: &BlockPos) -> bool {
        Cuboid::contains(self, block)
    }
}

/// A set of protection rules over a set of blocks.
///
/// # Example
///
/// ```
/// use plotward_policy::{bypass, ProtectionPolicy, ProtectionSet, ProtectionType, Verdict};
/// use plotward_types::{Actor, BlockPos, Cuboid};
///
/// let mut policy = ProtectionPolicy::new(
///     Cuboid::new("world", [-16, 0, -16], [16, 255, 16]),
///     ProtectionSet::DIRECT_PLAYERS,
/// );
/// policy.set_deny_message(ProtectionType::BreakBlock, "Spawn is protected.");
/// policy.add_bypass(bypass::actor_names(["admin"], ProtectionSet::ALL));
///
/// let spawn = BlockPos::new("world", 0, 64, 0);
/// let guest = Actor::offline("guest");
///
/// assert_eq!(
///     policy.evaluate(ProtectionType::BreakBlock, &spawn, Some(&guest)),
///     Verdict::Deny { message: Some("Spawn is protected.".into()) },
/// );
/// assert!(policy
///     .evaluate(ProtectionType::BreakBlock, &spawn, Some(&Actor::offline("admin")))
///     .is_allowed());
/// assert!(policy
///     .evaluate(ProtectionType::Flow, &spawn, None)
///     .is_allowed());
/// ```
pub struct ProtectionPolicy {
    membership: Box<dyn Membership>,
    protections: ProtectionSet,
    bypasses: BypassChain,
    messages: MessageTable,
    enabled: bool,
}

impl ProtectionPolicy {
    /// Creates an enabled policy guarding `protections` on the blocks
    /// accepted by `membership`.
    #[must_use]
    pub fn new<M>(membership: M, protections: ProtectionSet) -> Self
    where
        M: Membership + 'static,
    {
        Self {
            membership: Box::new(membership),
            protections,
            bypasses: BypassChain::new(),
            messages: MessageTable::new(),
            enabled: true,
        }
    }

    /// Adds a bypass rule (builder form of [`add_bypass`](Self::add_bypass)).
    #[must_use]
    pub fn with_bypass<F>(mut self, rule: F) -> Self
    where
        F: Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync + 'static,
    {
        self.add_bypass(rule);
        self
    }

    /// Sets a deny message (builder form of
    /// [`set_deny_message`](Self::set_deny_message)).
    #[must_use]
    pub fn with_deny_message(
        mut self,
        protection: ProtectionType,
        message: impl Into<String>,
    ) -> Self {
        self.set_deny_message(protection, message);
        self
    }

    // ── Protections ──────────────────────────────────────────

    /// Returns the active protection set.
    #[must_use]
    pub fn protections(&self) -> ProtectionSet {
        self.protections
    }

    /// Replaces the active protection set entirely.
    pub fn set_protections(&mut self, protections: ProtectionSet) {
        self.protections = protections;
    }

    // ── Enable / disable ─────────────────────────────────────

    /// Resumes handling events. Enabling an enabled policy is a no-op.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stops handling events until [`enable`](Self::enable) is called.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Returns `true` if the policy is handling events.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ── Bypasses ─────────────────────────────────────────────

    /// Appends a bypass rule.
    pub fn add_bypass<F>(&mut self, rule: F)
    where
        F: Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync + 'static,
    {
        self.bypasses.push(rule);
    }

    /// Removes all bypass rules.
    pub fn clear_bypasses(&mut self) {
        self.bypasses.clear();
    }

    /// Returns the bypass chain.
    #[must_use]
    pub fn bypasses(&self) -> &BypassChain {
        &self.bypasses
    }

    // ── Messages ─────────────────────────────────────────────

    /// Sets the message shown when `protection` is denied.
    pub fn set_deny_message(&mut self, protection: ProtectionType, message: impl Into<String>) {
        self.messages.set(protection, message);
    }

    /// Sets the same message for every protection type matching `filter`.
    pub fn set_deny_message_matching<F>(&mut self, filter: F, message: impl Into<String>)
    where
        F: Fn(ProtectionType) -> bool,
    {
        self.messages.set_matching(filter, message);
    }

    /// Removes all deny messages; denials become silent.
    pub fn clear_deny_messages(&mut self) {
        self.messages.clear();
    }

    /// Returns the message for `protection`, if any.
    #[must_use]
    pub fn deny_message(&self, protection: ProtectionType) -> Option<&str> {
        self.messages.get(protection)
    }

    /// Returns the message table.
    #[must_use]
    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    // ── Evaluation ───────────────────────────────────────────

    /// Returns `true` if `block` lies in this policy's area.
    #[must_use]
    pub fn covers(&self, block: &BlockPos) -> bool {
        self.membership.contains(block)
    }

    /// Returns `true` if `protection` is active and `block` is covered.
    ///
    /// Ignores bypasses. Used for side effects that are not attributable
    /// to an actor's permission, such as the anvil reset.
    #[must_use]
    pub fn is_protected(&self, protection: ProtectionType, block: &BlockPos) -> bool {
        self.protections.contains_type(protection) && self.covers(block)
    }

    /// Evaluates one request.
    ///
    /// Denies iff the protection is active, the block is covered, and no
    /// bypass rule exempts `(actor, protection, block)`. A denial carries
    /// the configured message for `protection`.
    #[must_use]
    pub fn evaluate(
        &self,
        protection: ProtectionType,
        block: &BlockPos,
        actor: Option<&Actor>,
    ) -> Verdict {
        if !self.is_protected(protection, block) {
            return Verdict::Allow;
        }
        if self.bypasses.can_bypass(actor, protection, block) {
            tracing::trace!(
                protection = %protection,
                block = %block,
                actor = actor.map(|a| a.name.as_str()),
                "bypass rule exempted request"
            );
            return Verdict::Allow;
        }
        Verdict::Deny {
            message: self.messages.get(protection).map(str::to_string),
        }
    }
}

impl fmt::Debug for ProtectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectionPolicy")
            .field("protections", &self.protections)
            .field("bypasses", &self.bypasses)
            .field("messages", &self.messages.len())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
