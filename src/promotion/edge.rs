//! Promotion edges
//!
//! An edge is a fixed `source -> target` role transition plus the roles that
//! disqualify a member from taking it.

use flock_types::Role;
use serde::Serialize;

/// A fixed role transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromotionEdge {
    /// Role being vacated
    pub source: Role,
    /// Role granted when the member is eligible
    pub target: Role,
    /// Any of these in the role set blocks the promotion
    pub guards: &'static [Role],
    /// Extra tags dropped together with `source` when the promotion happens
    pub also_vacated: &'static [Role],
}

impl PromotionEdge {
    pub fn blocks(&self, role: Role) -> bool {
        self.guards.contains(&role)
    }
}

pub const DISCIPLE_TO_PREACHER: PromotionEdge = PromotionEdge {
    source: Role::Disciple,
    target: Role::Preacher,
    guards: &[Role::Copastor, Role::Supervisor, Role::Pastor, Role::Treasurer],
    also_vacated: &[],
};

pub const COPASTOR_TO_PASTOR: PromotionEdge = PromotionEdge {
    source: Role::Copastor,
    target: Role::Pastor,
    guards: &[
        Role::Supervisor,
        Role::Preacher,
        Role::Treasurer,
        Role::Pastor,
        Role::Disciple,
    ],
    also_vacated: &[],
};

// Treasurer does not block this edge; a supervising treasurer gives up the
// treasury on promotion. Pending product confirmation, see DESIGN.md.
pub const SUPERVISOR_TO_COPASTOR: PromotionEdge = PromotionEdge {
    source: Role::Supervisor,
    target: Role::Copastor,
    guards: &[Role::Disciple, Role::Copastor, Role::Preacher, Role::Pastor],
    also_vacated: &[Role::Treasurer],
};

pub const ALL_EDGES: [PromotionEdge; 3] =
    [DISCIPLE_TO_PREACHER, COPASTOR_TO_PASTOR, SUPERVISOR_TO_COPASTOR];
