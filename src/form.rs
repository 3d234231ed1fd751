//! Member update form session
//!
//! Holds the editable copy of one member record between load and save. The
//! promote action runs the tier's [`PromotionRule`](crate::promotion::PromotionRule)
//! and applies the returned command; afterwards the form is read-only until
//! [`MemberUpdateForm::reset`] reloads the record.

use flock_types::{HierarchyField, MemberKind, MemberRecord, Role, RoleSet, UpdateMemberRequest};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{FormError, FormResult};
use crate::promotion::{promotion_rule_for, PromotionOutcome};

#[derive(Debug, Clone)]
pub struct MemberUpdateForm {
    kind: MemberKind,
    /// Snapshot the form was loaded from
    record: Option<MemberRecord>,
    draft: Option<UpdateMemberRequest>,
    input_disabled: bool,
    promote_button_disabled: bool,
}

impl MemberUpdateForm {
    /// An empty form for `kind`, still waiting for its record
    pub fn new(kind: MemberKind) -> Self {
        Self {
            kind,
            record: None,
            draft: None,
            input_disabled: false,
            promote_button_disabled: false,
        }
    }

    pub fn from_record(record: MemberRecord) -> Self {
        let mut form = Self::new(record.kind);
        form.install(record);
        form
    }

    /// Load (or reload) the record into the form, unlocking it
    pub fn load(&mut self, record: MemberRecord) -> FormResult<()> {
        if record.kind != self.kind {
            return Err(FormError::KindMismatch {
                kind: self.kind,
                found: record.kind,
            });
        }
        self.install(record);
        Ok(())
    }

    fn install(&mut self, record: MemberRecord) {
        debug!(member_id = %record.id, kind = %record.kind, "loading member into update form");
        self.draft = Some(update_request_from(&record));
        self.record = Some(record);
        self.input_disabled = false;
        self.promote_button_disabled = false;
    }

    /// Discard edits and the promotion lock
    pub fn reset(&mut self) {
        if let Some(record) = self.record.take() {
            self.install(record);
        } else {
            self.input_disabled = false;
            self.promote_button_disabled = false;
        }
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn member_id(&self) -> Option<Uuid> {
        self.record.as_ref().map(|r| r.id)
    }

    pub fn roles(&self) -> Option<&RoleSet> {
        self.draft.as_ref().map(|d| &d.roles)
    }

    pub fn hierarchy_value(&self, field: HierarchyField) -> Option<Uuid> {
        self.draft.as_ref().and_then(|d| d.hierarchy.get(field))
    }

    pub fn is_input_disabled(&self) -> bool {
        self.input_disabled
    }

    pub fn is_promote_button_disabled(&self) -> bool {
        self.promote_button_disabled
    }

    /// Whether the promote button should be offered at all
    pub fn can_promote(&self) -> bool {
        promotion_rule_for(self.kind).is_some() && !self.promote_button_disabled
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.record, &self.draft) {
            (Some(record), Some(draft)) => update_request_from(record) != *draft,
            _ => false,
        }
    }

    fn editable_draft(&mut self) -> FormResult<&mut UpdateMemberRequest> {
        if self.input_disabled {
            return Err(FormError::Locked);
        }
        self.draft.as_mut().ok_or(FormError::NotLoaded)
    }

    pub fn set_roles(&mut self, roles: RoleSet) -> FormResult<()> {
        self.editable_draft()?.roles = roles;
        Ok(())
    }

    /// Flip one role tag; returns whether the role is now held
    pub fn toggle_role(&mut self, role: Role) -> FormResult<bool> {
        let roles = &mut self.editable_draft()?.roles;
        if roles.remove(role) {
            Ok(false)
        } else {
            roles.insert(role);
            Ok(true)
        }
    }

    pub fn assign(&mut self, field: HierarchyField, id: Option<Uuid>) -> FormResult<()> {
        if !self.kind.hierarchy_fields().contains(&field) {
            return Err(FormError::UnknownField {
                kind: self.kind,
                field,
            });
        }
        self.editable_draft()?.hierarchy.set(field, id);
        Ok(())
    }

    /// The promote button handler
    pub fn promote(&mut self) -> FormResult<PromotionOutcome> {
        let rule =
            promotion_rule_for(self.kind).ok_or(FormError::NoPromotion { kind: self.kind })?;
        let outcome = rule.evaluate_opt(self.roles());
        self.apply(&outcome);

        info!(
            kind = %self.kind,
            member_id = ?self.member_id(),
            target = %rule.edge.target,
            promoted = outcome.promoted,
            "promote action applied"
        );
        Ok(outcome)
    }

    /// Apply a promotion command to the form state
    pub fn apply(&mut self, outcome: &PromotionOutcome) {
        if let Some(draft) = self.draft.as_mut() {
            if let Some(roles) = &outcome.new_roles {
                draft.roles = roles.clone();
            }
            for field in &outcome.fields_to_clear {
                draft.hierarchy.clear(*field);
            }
        }
        if outcome.lock_ui {
            self.input_disabled = true;
            self.promote_button_disabled = true;
        }
    }

    /// Save payload; available while locked so a promotion can be submitted
    pub fn to_update_request(&self) -> FormResult<UpdateMemberRequest> {
        self.draft.clone().ok_or(FormError::NotLoaded)
    }
}

fn update_request_from(record: &MemberRecord) -> UpdateMemberRequest {
    UpdateMemberRequest {
        first_names: record.first_names.clone(),
        last_names: record.last_names.clone(),
        gender: record.gender,
        birth_date: record.birth_date,
        marital_status: record.marital_status,
        number_of_children: record.number_of_children,
        conversion_date: record.conversion_date,
        email: record.email.clone(),
        phone_number: record.phone_number.clone(),
        residence: record.residence.clone(),
        roles: record.roles.clone(),
        hierarchy: record.hierarchy.clone(),
        record_status: record.record_status,
    }
}
