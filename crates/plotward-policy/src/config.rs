//! Policy configuration: declarative policy definitions.
//!
//! Lets a host describe its protected areas in TOML instead of code.
//! Each definition becomes one [`ProtectionPolicy`].
//!
//! # Example TOML
//!
//! ```toml
//! [[policies]]
//! id = "spawn"
//! protections = ["all"]
//! exclude = ["mob_spawn"]
//! region = { world = "world", min = [-64, 0, -64], max = [64, 255, 64] }
//!
//! [policies.messages]
//! direct_players = "Spawn is protected."
//! container_access = "Spawn chests are read-only."
//!
//! [[policies.bypass]]
//! actors = ["admin", "moderator"]
//!
//! [[policies.bypass]]
//! actors = ["gardener"]
//! protections = ["growth", "fade"]
//! ```

use crate::{bypass, Membership, PolicyError, ProtectionPolicy, ProtectionSet};
use plotward_types::{Cuboid, ErrorCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Top-level policies configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoliciesConfig {
    /// Declarative policy definitions.
    pub policies: Vec<PolicyDef>,
}

/// A single declarative policy definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyDef {
    /// Unique policy name within a config.
    pub id: String,

    /// Protection or group names to enable. Default: `["all"]`.
    #[serde(default = "default_protections")]
    pub protections: Vec<String>,

    /// Protection or group names removed after the union.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Protected area. Required by [`build_with_region`](Self::build_with_region).
    #[serde(default)]
    pub region: Option<Cuboid>,

    /// Whether the policy starts enabled. Default: true.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Deny messages keyed by protection or group name.
    #[serde(default)]
    pub messages: BTreeMap<String, String>,

    /// Actor allow-lists.
    #[serde(default)]
    pub bypass: Vec<BypassDef>,
}

/// A name-based bypass entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BypassDef {
    /// Player names exempted (case-insensitive).
    pub actors: Vec<String>,

    /// Protection or group names the exemption covers. Empty = all.
    pub protections: Vec<String>,
}

fn default_protections() -> Vec<String> {
    vec!["all".to_string()]
}

fn default_enabled() -> bool {
    true
}

/// Errors from validating or building a [`PolicyDef`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyDefError {
    /// `id` is blank.
    #[error("policy definition with empty id")]
    EmptyId,

    /// A `protections` or `exclude` entry is not a known name.
    #[error("policy '{label}': {source}")]
    InvalidProtection { label: String, source: PolicyError },

    /// A `messages` key is not a known name.
    #[error("policy '{label}': message key: {source}")]
    InvalidMessageKey { label: String, source: PolicyError },

    /// A bypass entry names an unknown protection.
    #[error("policy '{label}': bypass: {source}")]
    InvalidBypass { label: String, source: PolicyError },

    /// A bypass entry lists no actors.
    #[error("policy '{label}': bypass entry without actors")]
    EmptyBypass { label: String },

    /// Region has an empty world name.
    #[error("policy '{label}': region has no world")]
    InvalidRegion { label: String },

    /// [`PolicyDef::build_with_region`] was called without a region.
    #[error("policy '{label}': no region configured")]
    MissingRegion { label: String },
}

impl ErrorCode for PolicyDefError {
    fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "CONFIG_EMPTY_ID",
            Self::InvalidProtection { .. } => "CONFIG_INVALID_PROTECTION",
            Self::InvalidMessageKey { .. } => "CONFIG_INVALID_MESSAGE_KEY",
            Self::InvalidBypass { .. } => "CONFIG_INVALID_BYPASS",
            Self::EmptyBypass { .. } => "CONFIG_EMPTY_BYPASS",
            Self::InvalidRegion { .. } => "CONFIG_INVALID_REGION",
            Self::MissingRegion { .. } => "CONFIG_MISSING_REGION",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Errors from loading a [`PoliciesConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input is not valid TOML or does not match the schema.
    #[error("failed to parse policies config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "CONFIG_PARSE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

fn resolve(names: &[String]) -> Result<ProtectionSet, PolicyError> {
    let (set, unknown) = ProtectionSet::parse_list(names);
    match unknown.first() {
        Some(name) => Err(PolicyError::UnknownProtection((*name).to_string())),
        None => Ok(set),
    }
}

impl PolicyDef {
    /// Creates a definition guarding everything, with no region.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            protections: default_protections(),
            exclude: Vec::new(),
            region: None,
            enabled: default_enabled(),
            messages: BTreeMap::new(),
            bypass: Vec::new(),
        }
    }

    /// Resolves `protections` minus `exclude`.
    pub fn protection_set(&self) -> Result<ProtectionSet, PolicyDefError> {
        let invalid = |source| PolicyDefError::InvalidProtection {
            label: self.id.clone(),
            source,
        };
        let included = resolve(&self.protections).map_err(invalid)?;
        let excluded = resolve(&self.exclude).map_err(invalid)?;
        Ok(included - excluded)
    }

    /// Validates this definition.
    ///
    /// Checks:
    /// - `id` is not blank
    /// - every protection, exclude, message and bypass name resolves
    /// - every bypass entry names at least one actor
    /// - the region, if present, names a world
    pub fn validate(&self) -> Result<(), PolicyDefError> {
        self.resolved().map(|_| ())
    }

    /// Builds a policy over an arbitrary membership test.
    ///
    /// The configured region is ignored.
    pub fn build<M>(&self, membership: M) -> Result<ProtectionPolicy, PolicyDefError>
    where
        M: Membership + 'static,
    {
        let resolved = self.resolved()?;
        let mut policy = ProtectionPolicy::new(membership, resolved.protections);

        for (set, text) in resolved.messages {
            policy.set_deny_message_matching(|t| set.contains_type(t), text);
        }
        for (actors, set) in resolved.bypasses {
            policy.add_bypass(bypass::actor_names(actors, set));
        }
        if !self.enabled {
            policy.disable();
        }
        Ok(policy)
    }

    /// Builds a policy over the configured region.
    pub fn build_with_region(&self) -> Result<ProtectionPolicy, PolicyDefError> {
        let region = self
            .region
            .clone()
            .ok_or_else(|| PolicyDefError::MissingRegion {
                label: self.id.clone(),
            })?;
        self.build(region)
    }

    fn resolved(&self) -> Result<Resolved, PolicyDefError> {
        if self.id.trim().is_empty() {
            return Err(PolicyDefError::EmptyId);
        }
        let label = || self.id.clone();

        let protections = self.protection_set()?;

        let mut messages = Vec::with_capacity(self.messages.len());
        for (key, text) in &self.messages {
            let set = ProtectionSet::parse(key).ok_or_else(|| {
                PolicyDefError::InvalidMessageKey {
                    label: label(),
                    source: PolicyError::UnknownProtection(key.clone()),
                }
            })?;
            messages.push((set, text.clone()));
        }
        // Wider keys first so a single-type key overrides its group.
        messages.sort_by_key(|(set, _)| std::cmp::Reverse(set.bits().count_ones()));

        let mut bypasses = Vec::with_capacity(self.bypass.len());
        for entry in &self.bypass {
            if entry.actors.is_empty() {
                return Err(PolicyDefError::EmptyBypass { label: label() });
            }
            let set = if entry.protections.is_empty() {
                ProtectionSet::ALL
            } else {
                resolve(&entry.protections).map_err(|source| PolicyDefError::InvalidBypass {
                    label: label(),
                    source,
                })?
            };
            bypasses.push((entry.actors.clone(), set));
        }

        if let Some(region) = &self.region {
            if region.world.trim().is_empty() {
                return Err(PolicyDefError::InvalidRegion { label: label() });
            }
        }

        Ok(Resolved {
            protections,
            messages,
            bypasses,
        })
    }
}

struct Resolved {
    protections: ProtectionSet,
    messages: Vec<(ProtectionSet, String)>,
    bypasses: Vec<(Vec<String>, ProtectionSet)>,
}

impl PoliciesConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Merges another config into this one.
    ///
    /// A definition in `other` replaces any existing definition with the
    /// same `id`; new ids are appended.
    pub fn merge(&mut self, other: &Self) {
        for def in &other.policies {
            self.policies.retain(|p| p.id != def.id);
            self.policies.push(def.clone());
        }
    }

    /// Validates all definitions, returning every error found.
    pub fn validate_all(&self) -> Vec<PolicyDefError> {
        self.policies
            .iter()
            .filter_map(|p| p.validate().err())
            .collect()
    }

    /// Builds every definition over its configured region.
    ///
    /// Definitions that fail to build are logged and skipped.
    pub fn build_all(&self) -> Vec<(String, ProtectionPolicy)> {
        self.policies
            .iter()
            .filter_map(|def| match def.build_with_region() {
                Ok(policy) => Some((def.id.clone(), policy)),
                Err(e) => {
                    tracing::warn!(
                        policy = %def.id,
                        code = e.code(),
                        error = %e,
                        "skipping policy definition"
                    );
                    None
                }
            })
            .collect()
    }
}
