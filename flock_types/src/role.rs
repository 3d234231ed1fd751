//! Role tags and role sets
//!
//! A member carries exactly one [`RoleSet`]: a set of unique tags drawn from the
//! closed [`Role`] enumeration. Order is irrelevant; iteration follows the
//! declaration order of [`Role`] so serialized output is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A member's function inside the church hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pastor,
    Copastor,
    Supervisor,
    Preacher,
    Treasurer,
    Disciple,
}

impl Role {
    /// Every role tag, in hierarchy order
    pub const ALL: [Role; 6] = [
        Role::Pastor,
        Role::Copastor,
        Role::Supervisor,
        Role::Preacher,
        Role::Treasurer,
        Role::Disciple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pastor => "pastor",
            Role::Copastor => "copastor",
            Role::Supervisor => "supervisor",
            Role::Preacher => "preacher",
            Role::Treasurer => "treasurer",
            Role::Disciple => "disciple",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{tag}' (expected one of: pastor, copastor, supervisor, preacher, treasurer, disciple)")]
pub struct ParseRoleError {
    pub tag: String,
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ParseRoleError {
                tag: tag.to_string(),
            })
    }
}

/// Set of role tags held by one member record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns `true` if the role was not already present
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Returns `true` if the role was present
    pub fn remove(&mut self, role: Role) -> bool {
        self.0.remove(&role)
    }

    /// Copy of this set without `role`
    pub fn without(&self, role: Role) -> Self {
        let mut next = self.clone();
        next.remove(role);
        next
    }

    /// True when any of `roles` is held
    pub fn intersects(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.contains(*role))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Role> {
        self.iter().collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.iter().map(|role| role.as_str()).collect();
        write!(f, "{}", tags.join(","))
    }
}

/// Comma-separated tags, e.g. `"disciple, treasurer"`. Blank input is the empty set.
impl FromStr for RoleSet {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(Role::from_str)
            .collect()
    }
}
