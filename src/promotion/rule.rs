//! The role promotion rule
//!
//! Evaluating a rule never fails and never touches form state. It returns a
//! [`PromotionOutcome`] command that the caller applies: the rewritten role
//! set, the hierarchy fields to blank out and the UI lock.

use flock_types::{HierarchyField, MemberKind, RoleSet};
use serde::Serialize;
use tracing::debug;

use super::edge::PromotionEdge;

/// One promotion call site: the edge taken from a member tier's update form
/// and the hierarchy fields that form must re-assign afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromotionRule {
    pub site: MemberKind,
    pub edge: PromotionEdge,
    pub fields_to_clear: &'static [HierarchyField],
}

/// Result of evaluating a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromotionOutcome {
    /// Role set to write back. `None` leaves the form's roles untouched.
    pub new_roles: Option<RoleSet>,
    pub fields_to_clear: Vec<HierarchyField>,
    /// True only when the target role was granted
    pub promoted: bool,
    /// Always true: the form stays read-only until the session resets
    pub lock_ui: bool,
}

impl PromotionOutcome {
    fn locked(
        new_roles: Option<RoleSet>,
        fields_to_clear: &[HierarchyField],
        promoted: bool,
    ) -> Self {
        Self {
            new_roles,
            fields_to_clear: fields_to_clear.to_vec(),
            promoted,
            lock_ui: true,
        }
    }
}

impl PromotionRule {
    /// Is a member holding `roles` eligible to take this edge?
    pub fn is_eligible(&self, roles: &RoleSet) -> bool {
        roles.contains(self.edge.source) && !roles.intersects(self.edge.guards)
    }

    pub fn evaluate(&self, roles: &RoleSet) -> PromotionOutcome {
        let edge = &self.edge;
        let has_source = roles.contains(edge.source);
        let is_eligible = !roles.intersects(edge.guards);

        let mut new_roles = roles.without(edge.source);
        let promoted = has_source && is_eligible;
        if promoted {
            for vacated in edge.also_vacated {
                new_roles.remove(*vacated);
            }
            new_roles.insert(edge.target);
        }

        debug!(
            site = %self.site,
            source = %edge.source,
            target = %edge.target,
            roles = %roles,
            has_source,
            is_eligible,
            promoted,
            "evaluated promotion rule"
        );

        PromotionOutcome::locked(Some(new_roles), self.fields_to_clear, promoted)
    }

    /// Like [`evaluate`](Self::evaluate) for a form whose roles were never
    /// loaded: roles stay absent, fields are still cleared, the UI still locks.
    pub fn evaluate_opt(&self, roles: Option<&RoleSet>) -> PromotionOutcome {
        match roles {
            Some(roles) => self.evaluate(roles),
            None => {
                debug!(site = %self.site, "no role set loaded; promotion is a no-op");
                PromotionOutcome::locked(None, self.fields_to_clear, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promotion::edge::{COPASTOR_TO_PASTOR, DISCIPLE_TO_PREACHER, SUPERVISOR_TO_COPASTOR};
    use flock_types::Role;

    fn rule(edge: PromotionEdge) -> PromotionRule {
        PromotionRule {
            site: MemberKind::Disciple,
            edge,
            fields_to_clear: &[HierarchyField::TheirFamilyGroup],
        }
    }

    fn roles<const N: usize>(tags: [Role; N]) -> RoleSet {
        RoleSet::from(tags)
    }

    fn new_roles(outcome: &PromotionOutcome) -> RoleSet {
        outcome.new_roles.clone().expect("roles loaded")
    }

    #[test]
    fn test_disciple_alone_is_promoted() {
        let outcome = rule(DISCIPLE_TO_PREACHER).evaluate(&roles([Role::Disciple]));
        assert_eq!(new_roles(&outcome), roles([Role::Preacher]));
        assert!(outcome.promoted);
        assert!(outcome.lock_ui);
    }

    #[test]
    fn test_guard_role_blocks_but_source_is_still_removed() {
        let rule = rule(DISCIPLE_TO_PREACHER);

        let outcome = rule.evaluate(&roles([Role::Disciple, Role::Supervisor]));
        assert_eq!(new_roles(&outcome), roles([Role::Supervisor]));
        assert!(!outcome.promoted);

        let outcome = rule.evaluate(&roles([Role::Disciple, Role::Treasurer]));
        assert_eq!(new_roles(&outcome), roles([Role::Treasurer]));
        assert!(!outcome.promoted);
    }

    #[test]
    fn test_missing_source_leaves_roles_unchanged() {
        let outcome = rule(DISCIPLE_TO_PREACHER).evaluate(&roles([Role::Preacher]));
        assert_eq!(new_roles(&outcome), roles([Role::Preacher]));
        assert!(!outcome.promoted);
        assert!(outcome.lock_ui);
        assert_eq!(outcome.fields_to_clear, vec![HierarchyField::TheirFamilyGroup]);
    }

    #[test]
    fn test_second_application_is_a_no_op() {
        let rule = rule(DISCIPLE_TO_PREACHER);
        let once = new_roles(&rule.evaluate(&roles([Role::Disciple])));
        let twice = rule.evaluate(&once);
        assert_eq!(new_roles(&twice), once);
        assert!(!twice.promoted);
    }

    #[test]
    fn test_copastor_with_any_other_tag_is_not_promoted() {
        let rule = rule(COPASTOR_TO_PASTOR);
        assert!(rule.evaluate(&roles([Role::Copastor])).promoted);
        for other in [
            Role::Supervisor,
            Role::Preacher,
            Role::Treasurer,
            Role::Pastor,
            Role::Disciple,
        ] {
            let outcome = rule.evaluate(&roles([Role::Copastor, other]));
            assert!(!outcome.promoted, "{other} should block");
            assert_eq!(new_roles(&outcome), roles([other]));
        }
    }

    #[test]
    fn test_supervising_treasurer_is_promoted_and_leaves_treasury() {
        let outcome =
            rule(SUPERVISOR_TO_COPASTOR).evaluate(&roles([Role::Supervisor, Role::Treasurer]));
        assert!(outcome.promoted);
        assert_eq!(new_roles(&outcome), roles([Role::Copastor]));
    }

    #[test]
    fn test_blocked_supervisor_keeps_treasurer_tag() {
        let outcome = rule(SUPERVISOR_TO_COPASTOR).evaluate(&roles([
            Role::Supervisor,
            Role::Treasurer,
            Role::Preacher,
        ]));
        assert!(!outcome.promoted);
        assert_eq!(new_roles(&outcome), roles([Role::Preacher, Role::Treasurer]));
    }

    #[test]
    fn test_unloaded_roles_yield_locked_no_op() {
        let outcome = rule(DISCIPLE_TO_PREACHER).evaluate_opt(None);
        assert_eq!(outcome.new_roles, None);
        assert!(!outcome.promoted);
        assert!(outcome.lock_ui);
        assert_eq!(outcome.fields_to_clear, vec![HierarchyField::TheirFamilyGroup]);
    }

    #[test]
    fn test_is_eligible_matches_promoted() {
        let rule = rule(DISCIPLE_TO_PREACHER);
        for set in [
            roles([Role::Disciple]),
            roles([Role::Disciple, Role::Pastor]),
            roles([Role::Treasurer]),
            RoleSet::new(),
        ] {
            assert_eq!(rule.is_eligible(&set), rule.evaluate(&set).promoted);
        }
    }
}
