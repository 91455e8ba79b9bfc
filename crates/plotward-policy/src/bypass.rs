//! Bypass rules.
//!
//! A bypass rule exempts an `(actor, protection, block)` combination
//! from denial. Rules are plain functions; a [`BypassChain`] holds them
//! in insertion order and ORs them together, stopping at the first rule
//! that says yes.
//!
//! Actorless events (explosions, growth, flow) are evaluated with
//! `actor = None`. Rules built with [`by_actor`] and [`actor_names`]
//! never exempt those; a raw rule may.
//!
//! # Example
//!
//! ```
//! use plotward_policy::bypass::{self, BypassChain};
//! use plotward_policy::{ProtectionSet, ProtectionType};
//! use plotward_types::{Actor, BlockPos};
//!
//! let mut chain = BypassChain::new();
//! chain.push(bypass::actor_names(["admin"], ProtectionSet::ALL));
//! chain.push(|_actor: Option<&Actor>, protection: ProtectionType, block: &BlockPos| {
//!     protection == ProtectionType::Pistons && block.y < 0
//! });
//!
//! let pos = BlockPos::new("world", 0, 64, 0);
//! assert!(chain.can_bypass(Some(&Actor::offline("admin")), ProtectionType::BreakBlock, &pos));
//! assert!(!chain.can_bypass(Some(&Actor::offline("guest")), ProtectionType::BreakBlock, &pos));
//! assert!(chain.can_bypass(None, ProtectionType::Pistons, &pos.offset(0, -70, 0).unwrap()));
//! ```

use crate::{ProtectionSet, ProtectionType};
use plotward_types::{Actor, BlockPos};
use std::collections::HashSet;
use std::fmt;

/// The single shape every bypass rule takes.
///
/// Rules are expected to be fast and side-effect free: one may run for
/// every block of an explosion.
pub type BypassRule = dyn Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync;

/// Ordered list of bypass rules with OR semantics.
#[derive(Default)]
pub struct BypassChain {
    rules: Vec<Box<BypassRule>>,
}

impl BypassChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule to the end of the chain.
    pub fn push<F>(&mut self, rule: F)
    where
        F: Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
    }

    /// Removes every rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns `true` if any rule exempts the combination.
    ///
    /// Rules run in insertion order and evaluation stops at the first
    /// `true`. An empty chain exempts nothing.
    #[must_use]
    pub fn can_bypass(
        &self,
        actor: Option<&Actor>,
        protection: ProtectionType,
        block: &BlockPos,
    ) -> bool {
        self.rules.iter().any(|rule| rule(actor, protection, block))
    }
}

impl fmt::Debug for BypassChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BypassChain")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Adapts a rule that only cares about the actor and protection type.
///
/// Requests without an actor are never exempted.
pub fn by_actor<F>(
    rule: F,
) -> impl Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync + 'static
where
    F: Fn(&Actor, ProtectionType) -> bool + Send + Sync + 'static,
{
    move |actor, protection, _block| actor.is_some_and(|a| rule(a, protection))
}

/// Exempts the named actors (case-insensitive) for the given protections.
pub fn actor_names<I, S>(
    names: I,
    protections: ProtectionSet,
) -> impl Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync + 'static
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let names: HashSet<String> = names
        .into_iter()
        .map(|n| n.as_ref().to_ascii_lowercase())
        .collect();
    by_actor(move |actor, protection| {
        protections.contains_type(protection)
            && names.contains(&actor.name.to_ascii_lowercase())
    })
}

/// Exempts every request for the given protections, with or without an
/// actor.
///
/// Useful for switching a protection off in part of a policy's area
/// when combined with a block test.
pub fn protections(
    set: ProtectionSet,
) -> impl Fn(Option<&Actor>, ProtectionType, &BlockPos) -> bool + Send + Sync + 'static {
    move |_actor, protection, _block| set.contains_type(protection)
}
