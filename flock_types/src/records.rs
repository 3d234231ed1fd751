//! Domain records exchanged with the membership REST backend
//!
//! Field names follow the backend's camelCase JSON. Hierarchy assignments
//! ("their pastor", "their family group", ...) are plain ids; `None` means the
//! member still has to be (re)assigned.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::{Role, RoleSet};

// ============================================================================
// MEMBER HIERARCHY
// ============================================================================

/// The tier a member record lives in. Each tier has its own REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Pastor,
    Copastor,
    Supervisor,
    Preacher,
    Disciple,
}

impl MemberKind {
    pub const ALL: [MemberKind; 5] = [
        MemberKind::Pastor,
        MemberKind::Copastor,
        MemberKind::Supervisor,
        MemberKind::Preacher,
        MemberKind::Disciple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Pastor => "pastor",
            MemberKind::Copastor => "copastor",
            MemberKind::Supervisor => "supervisor",
            MemberKind::Preacher => "preacher",
            MemberKind::Disciple => "disciple",
        }
    }

    /// Role tag that identifies this tier inside a role set
    pub fn defining_role(&self) -> Role {
        match self {
            MemberKind::Pastor => Role::Pastor,
            MemberKind::Copastor => Role::Copastor,
            MemberKind::Supervisor => Role::Supervisor,
            MemberKind::Preacher => Role::Preacher,
            MemberKind::Disciple => Role::Disciple,
        }
    }

    /// REST collection segment, e.g. `/disciples`
    pub fn resource_path(&self) -> &'static str {
        match self {
            MemberKind::Pastor => "pastors",
            MemberKind::Copastor => "copastors",
            MemberKind::Supervisor => "supervisors",
            MemberKind::Preacher => "preachers",
            MemberKind::Disciple => "disciples",
        }
    }

    /// Hierarchy-assignment fields carried by this tier's update form
    pub fn hierarchy_fields(&self) -> &'static [HierarchyField] {
        use HierarchyField::*;
        match self {
            MemberKind::Pastor => &[TheirChurch],
            MemberKind::Copastor => &[TheirChurch, TheirPastor],
            MemberKind::Supervisor => &[TheirChurch, TheirPastor, TheirCopastor],
            MemberKind::Preacher => &[TheirChurch, TheirCopastor, TheirSupervisor, TheirZone],
            MemberKind::Disciple => &[
                TheirChurch,
                TheirSupervisor,
                TheirZone,
                TheirPreacher,
                TheirFamilyGroup,
            ],
        }
    }
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MemberKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        MemberKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| format!("unknown member kind '{}'", tag))
    }
}

/// Form field naming the entity that supervises a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HierarchyField {
    TheirChurch,
    TheirPastor,
    TheirCopastor,
    TheirSupervisor,
    TheirZone,
    TheirPreacher,
    TheirFamilyGroup,
}

impl HierarchyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyField::TheirChurch => "theirChurch",
            HierarchyField::TheirPastor => "theirPastor",
            HierarchyField::TheirCopastor => "theirCopastor",
            HierarchyField::TheirSupervisor => "theirSupervisor",
            HierarchyField::TheirZone => "theirZone",
            HierarchyField::TheirPreacher => "theirPreacher",
            HierarchyField::TheirFamilyGroup => "theirFamilyGroup",
        }
    }
}

/// The supervising entities a member is attached to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyAssignments {
    #[serde(default)]
    pub their_church: Option<Uuid>,
    #[serde(default)]
    pub their_pastor: Option<Uuid>,
    #[serde(default)]
    pub their_copastor: Option<Uuid>,
    #[serde(default)]
    pub their_supervisor: Option<Uuid>,
    #[serde(default)]
    pub their_zone: Option<Uuid>,
    #[serde(default)]
    pub their_preacher: Option<Uuid>,
    #[serde(default)]
    pub their_family_group: Option<Uuid>,
}

impl HierarchyAssignments {
    pub fn get(&self, field: HierarchyField) -> Option<Uuid> {
        match field {
            HierarchyField::TheirChurch => self.their_church,
            HierarchyField::TheirPastor => self.their_pastor,
            HierarchyField::TheirCopastor => self.their_copastor,
            HierarchyField::TheirSupervisor => self.their_supervisor,
            HierarchyField::TheirZone => self.their_zone,
            HierarchyField::TheirPreacher => self.their_preacher,
            HierarchyField::TheirFamilyGroup => self.their_family_group,
        }
    }

    pub fn set(&mut self, field: HierarchyField, value: Option<Uuid>) {
        let slot = match field {
            HierarchyField::TheirChurch => &mut self.their_church,
            HierarchyField::TheirPastor => &mut self.their_pastor,
            HierarchyField::TheirCopastor => &mut self.their_copastor,
            HierarchyField::TheirSupervisor => &mut self.their_supervisor,
            HierarchyField::TheirZone => &mut self.their_zone,
            HierarchyField::TheirPreacher => &mut self.their_preacher,
            HierarchyField::TheirFamilyGroup => &mut self.their_family_group,
        };
        *slot = value;
    }

    pub fn clear(&mut self, field: HierarchyField) {
        self.set(field, None);
    }
}

// ============================================================================
// PERSONAL DATA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
    Other,
}

/// Soft-delete state shared by every record type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Residence {
    pub country: String,
    pub department: String,
    pub province: String,
    pub district: String,
    pub urban_sector: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// One member of any tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: Uuid,
    pub kind: MemberKind,
    pub first_names: String,
    pub last_names: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub marital_status: MaritalStatus,
    #[serde(default)]
    pub number_of_children: u32,
    #[serde(default)]
    pub conversion_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub residence: Residence,
    pub roles: RoleSet,
    #[serde(flatten)]
    pub hierarchy: HierarchyAssignments,
    #[serde(default)]
    pub record_status: RecordStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MemberRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names.trim(), self.last_names.trim())
    }
}

/// Save payload of a member update form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub first_names: String,
    pub last_names: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub marital_status: MaritalStatus,
    pub number_of_children: u32,
    pub conversion_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub residence: Residence,
    pub roles: RoleSet,
    #[serde(flatten)]
    pub hierarchy: HierarchyAssignments,
    pub record_status: RecordStatus,
}

// ============================================================================
// ORGANIZATIONAL ENTITIES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Church {
    pub id: Uuid,
    pub church_name: String,
    #[serde(default)]
    pub abbreviated_church_name: Option<String>,
    pub founding_date: NaiveDate,
    #[serde(default)]
    pub is_anexe: bool,
    /// Set on annexes only
    #[serde(default)]
    pub their_main_church: Option<Uuid>,
    #[serde(default)]
    pub residence: Residence,
    #[serde(default)]
    pub record_status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinistryType {
    KidsMinistry,
    YouthMinistry,
    DiscipleshipMinistry,
    WorshipMinistry,
    EvangelismMinistry,
    IntercessionMinistry,
    CounselingMinistry,
    TechnologyMinistry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ministry {
    pub id: Uuid,
    pub ministry_type: MinistryType,
    pub custom_ministry_name: String,
    pub founding_date: NaiveDate,
    #[serde(default)]
    pub their_church: Option<Uuid>,
    #[serde(default)]
    pub their_pastor: Option<Uuid>,
    #[serde(default)]
    pub record_status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: Uuid,
    pub zone_name: String,
    pub department: String,
    pub province: String,
    pub district: String,
    #[serde(default)]
    pub their_copastor: Option<Uuid>,
    #[serde(default)]
    pub their_supervisor: Option<Uuid>,
    #[serde(default)]
    pub record_status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyGroup {
    pub id: Uuid,
    pub family_group_name: String,
    pub family_group_code: String,
    /// Weekly service time, e.g. "19:30"
    pub service_time: String,
    #[serde(default)]
    pub residence: Residence,
    #[serde(default)]
    pub their_zone: Option<Uuid>,
    #[serde(default)]
    pub their_preacher: Option<Uuid>,
    #[serde(default)]
    pub record_status: RecordStatus,
}

// ============================================================================
// OFFERINGS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Pen,
    Usd,
    Eur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingIncomeType {
    Offering,
    IncomeAdjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingIncomeSubType {
    SundayService,
    FamilyGroup,
    GeneralFasting,
    GeneralVigil,
    ZonalFasting,
    ZonalVigil,
    SundaySchool,
    YouthService,
    UnitedService,
    Activities,
    ChurchGround,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Day,
    Afternoon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingIncome {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub income_type: OfferingIncomeType,
    #[serde(default)]
    pub sub_type: Option<OfferingIncomeSubType>,
    pub amount: Decimal,
    pub currency: Currency,
    pub date: NaiveDate,
    #[serde(default)]
    pub shift: Option<Shift>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub their_church: Option<Uuid>,
    #[serde(default)]
    pub their_family_group: Option<Uuid>,
    #[serde(default)]
    pub their_zone: Option<Uuid>,
    /// Contributor for offerings given by a single member
    #[serde(default)]
    pub member_id: Option<Uuid>,
    #[serde(default)]
    pub member_type: Option<MemberKind>,
    #[serde(default)]
    pub record_status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferingExpenseType {
    OperationalExpenses,
    MaintenanceAndRepairExpenses,
    DecorationExpenses,
    EquipmentAndTechnologyExpenses,
    SuppliesExpenses,
    PlaningEventsExpenses,
    OtherExpenses,
    ExpensesAdjustment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingExpense {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub expense_type: OfferingExpenseType,
    #[serde(default)]
    pub sub_type: Option<String>,
    pub amount: Decimal,
    pub currency: Currency,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub their_church: Option<Uuid>,
    #[serde(default)]
    pub record_status: RecordStatus,
}
