//! Role promotion
//!
//! Three member tiers can promote a member one step up the hierarchy from
//! their update form:
//!
//! ```text
//! disciple  ──► preacher
//! supervisor ─► copastor
//! copastor  ──► pastor
//! ```
//!
//! Each call site is a row in [`PROMOTION_RULES`]; the decision itself lives
//! in [`PromotionRule::evaluate`].

pub mod edge;
pub mod rule;

use flock_types::{HierarchyField, MemberKind};

pub use edge::{
    PromotionEdge, ALL_EDGES, COPASTOR_TO_PASTOR, DISCIPLE_TO_PREACHER, SUPERVISOR_TO_COPASTOR,
};
pub use rule::{PromotionOutcome, PromotionRule};

/// Promotion call sites, one per member tier that offers a promote action
pub static PROMOTION_RULES: [PromotionRule; 3] = [
    PromotionRule {
        site: MemberKind::Disciple,
        edge: DISCIPLE_TO_PREACHER,
        fields_to_clear: &[HierarchyField::TheirFamilyGroup, HierarchyField::TheirPreacher],
    },
    PromotionRule {
        site: MemberKind::Supervisor,
        edge: SUPERVISOR_TO_COPASTOR,
        fields_to_clear: &[HierarchyField::TheirCopastor],
    },
    PromotionRule {
        site: MemberKind::Copastor,
        edge: COPASTOR_TO_PASTOR,
        fields_to_clear: &[HierarchyField::TheirPastor],
    },
];

/// The promote action offered by `kind`'s update form, if any
pub fn promotion_rule_for(kind: MemberKind) -> Option<&'static PromotionRule> {
    PROMOTION_RULES.iter().find(|rule| rule.site == kind)
}
