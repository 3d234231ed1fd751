//! Flock Types - foundation types for the membership system
//!
//! Pure data structures shared by every flock surface (update forms, search
//! pages, the REST client and the CLI). This crate depends on no other
//! workspace crate.
//!
//! ## Contents
//!
//! - [`role`] - role tags and role sets
//! - [`records`] - member, organizational and offering records as the REST
//!   backend serves them
//! - [`search`] - search types and the search query builder

pub mod records;
pub mod role;
pub mod search;

pub use records::{
    Church, Currency, FamilyGroup, Gender, HierarchyAssignments, HierarchyField, MaritalStatus,
    MemberKind, MemberRecord, Ministry, MinistryType, OfferingExpense, OfferingExpenseType,
    OfferingIncome, OfferingIncomeSubType, OfferingIncomeType, RecordStatus, Residence, Shift,
    UpdateMemberRequest, Zone,
};
pub use role::{ParseRoleError, Role, RoleSet};
pub use search::{
    build_search_query, DateRange, Paging, SearchEntity, SearchFormInput, SearchQuery,
    SearchQueryError, SearchType, SortOrder, TermField,
};
