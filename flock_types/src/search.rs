//! Search types and the search query builder
//!
//! Every search form offers the same handful of inputs (a free-text input, a
//! first-names box, a last-names box, a date range and a select). The chosen
//! [`SearchType`] decides which ONE of them becomes the `term` sent to the
//! backend; the others are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::records::MemberKind;

/// Searchable record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchEntity {
    Pastor,
    Copastor,
    Supervisor,
    Preacher,
    Disciple,
    Church,
    Ministry,
    Zone,
    FamilyGroup,
    OfferingIncome,
    OfferingExpense,
}

/// The form input a search type reads its term from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermField {
    Input,
    FirstNames,
    LastNames,
    FullName,
    DateRange,
    Select,
}

/// What the user searches by. Serialized as the backend's `searchType` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    FirstNames,
    LastNames,
    FullName,
    BirthDate,
    BirthMonth,
    Gender,
    MaritalStatus,
    RecordStatus,
    Country,
    Department,
    Province,
    District,
    UrbanSector,
    Address,
    ChurchName,
    FoundingDate,
    MinistryType,
    MinistryName,
    ZoneName,
    FamilyGroupName,
    FamilyGroupCode,
    Date,
    OfferingSubType,
    ExpenseType,
}

/// Search types every member tier supports
const MEMBER_SEARCH_TYPES: &[SearchType] = &[
    SearchType::FirstNames,
    SearchType::LastNames,
    SearchType::FullName,
    SearchType::BirthDate,
    SearchType::BirthMonth,
    SearchType::Gender,
    SearchType::MaritalStatus,
    SearchType::RecordStatus,
    SearchType::Country,
    SearchType::Department,
    SearchType::Province,
    SearchType::District,
    SearchType::UrbanSector,
    SearchType::Address,
    SearchType::ChurchName,
];

const CHURCH_SEARCH_TYPES: &[SearchType] = &[
    SearchType::ChurchName,
    SearchType::FoundingDate,
    SearchType::Department,
    SearchType::Province,
    SearchType::District,
    SearchType::UrbanSector,
    SearchType::Address,
    SearchType::RecordStatus,
];

const MINISTRY_SEARCH_TYPES: &[SearchType] = &[
    SearchType::MinistryType,
    SearchType::MinistryName,
    SearchType::FoundingDate,
    SearchType::ChurchName,
    SearchType::Department,
    SearchType::Province,
    SearchType::District,
    SearchType::RecordStatus,
];

const ZONE_SEARCH_TYPES: &[SearchType] = &[
    SearchType::ZoneName,
    SearchType::Country,
    SearchType::Department,
    SearchType::Province,
    SearchType::District,
    SearchType::RecordStatus,
];

const FAMILY_GROUP_SEARCH_TYPES: &[SearchType] = &[
    SearchType::FamilyGroupName,
    SearchType::FamilyGroupCode,
    SearchType::ZoneName,
    SearchType::Department,
    SearchType::Province,
    SearchType::District,
    SearchType::UrbanSector,
    SearchType::Address,
    SearchType::RecordStatus,
];

const OFFERING_INCOME_SEARCH_TYPES: &[SearchType] = &[
    SearchType::OfferingSubType,
    SearchType::Date,
    SearchType::ChurchName,
    SearchType::ZoneName,
    SearchType::FamilyGroupCode,
    SearchType::RecordStatus,
];

const OFFERING_EXPENSE_SEARCH_TYPES: &[SearchType] = &[
    SearchType::ExpenseType,
    SearchType::Date,
    SearchType::ChurchName,
    SearchType::RecordStatus,
];

impl SearchEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEntity::Pastor => "pastor",
            SearchEntity::Copastor => "copastor",
            SearchEntity::Supervisor => "supervisor",
            SearchEntity::Preacher => "preacher",
            SearchEntity::Disciple => "disciple",
            SearchEntity::Church => "church",
            SearchEntity::Ministry => "ministry",
            SearchEntity::Zone => "zone",
            SearchEntity::FamilyGroup => "family_group",
            SearchEntity::OfferingIncome => "offering_income",
            SearchEntity::OfferingExpense => "offering_expense",
        }
    }

    /// REST collection segment the search is issued against
    pub fn resource_path(&self) -> &'static str {
        match self {
            SearchEntity::Pastor => "pastors",
            SearchEntity::Copastor => "copastors",
            SearchEntity::Supervisor => "supervisors",
            SearchEntity::Preacher => "preachers",
            SearchEntity::Disciple => "disciples",
            SearchEntity::Church => "churches",
            SearchEntity::Ministry => "ministries",
            SearchEntity::Zone => "zones",
            SearchEntity::FamilyGroup => "family-groups",
            SearchEntity::OfferingIncome => "offering-income",
            SearchEntity::OfferingExpense => "offering-expenses",
        }
    }

    pub fn member_kind(&self) -> Option<MemberKind> {
        match self {
            SearchEntity::Pastor => Some(MemberKind::Pastor),
            SearchEntity::Copastor => Some(MemberKind::Copastor),
            SearchEntity::Supervisor => Some(MemberKind::Supervisor),
            SearchEntity::Preacher => Some(MemberKind::Preacher),
            SearchEntity::Disciple => Some(MemberKind::Disciple),
            _ => None,
        }
    }

    /// Search types offered by this entity's search form
    pub fn supported_search_types(&self) -> Vec<SearchType> {
        let mut types = match self {
            SearchEntity::Pastor
            | SearchEntity::Copastor
            | SearchEntity::Supervisor
            | SearchEntity::Preacher
            | SearchEntity::Disciple => MEMBER_SEARCH_TYPES.to_vec(),
            SearchEntity::Church => CHURCH_SEARCH_TYPES.to_vec(),
            SearchEntity::Ministry => MINISTRY_SEARCH_TYPES.to_vec(),
            SearchEntity::Zone => ZONE_SEARCH_TYPES.to_vec(),
            SearchEntity::FamilyGroup => FAMILY_GROUP_SEARCH_TYPES.to_vec(),
            SearchEntity::OfferingIncome => OFFERING_INCOME_SEARCH_TYPES.to_vec(),
            SearchEntity::OfferingExpense => OFFERING_EXPENSE_SEARCH_TYPES.to_vec(),
        };
        // Preachers and disciples also belong to a zone; disciples to a family group.
        match self {
            SearchEntity::Preacher => types.push(SearchType::ZoneName),
            SearchEntity::Disciple => {
                types.push(SearchType::ZoneName);
                types.push(SearchType::FamilyGroupCode);
            }
            _ => {}
        }
        types
    }

    pub fn supports(&self, search_type: SearchType) -> bool {
        self.supported_search_types().contains(&search_type)
    }
}

impl From<MemberKind> for SearchEntity {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Pastor => SearchEntity::Pastor,
            MemberKind::Copastor => SearchEntity::Copastor,
            MemberKind::Supervisor => SearchEntity::Supervisor,
            MemberKind::Preacher => SearchEntity::Preacher,
            MemberKind::Disciple => SearchEntity::Disciple,
        }
    }
}

impl std::str::FromStr for SearchEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().replace('-', "_")))
            .map_err(|_| format!("unknown search entity '{}'", s.trim()))
    }
}

impl fmt::Display for SearchEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::FirstNames => "first_names",
            SearchType::LastNames => "last_names",
            SearchType::FullName => "full_name",
            SearchType::BirthDate => "birth_date",
            SearchType::BirthMonth => "birth_month",
            SearchType::Gender => "gender",
            SearchType::MaritalStatus => "marital_status",
            SearchType::RecordStatus => "record_status",
            SearchType::Country => "country",
            SearchType::Department => "department",
            SearchType::Province => "province",
            SearchType::District => "district",
            SearchType::UrbanSector => "urban_sector",
            SearchType::Address => "address",
            SearchType::ChurchName => "church_name",
            SearchType::FoundingDate => "founding_date",
            SearchType::MinistryType => "ministry_type",
            SearchType::MinistryName => "ministry_name",
            SearchType::ZoneName => "zone_name",
            SearchType::FamilyGroupName => "family_group_name",
            SearchType::FamilyGroupCode => "family_group_code",
            SearchType::Date => "date",
            SearchType::OfferingSubType => "offering_sub_type",
            SearchType::ExpenseType => "expense_type",
        }
    }

    /// The single form input this search type reads
    pub fn term_field(&self) -> TermField {
        match self {
            SearchType::FirstNames => TermField::FirstNames,
            SearchType::LastNames => TermField::LastNames,
            SearchType::FullName => TermField::FullName,
            SearchType::BirthDate | SearchType::FoundingDate | SearchType::Date => {
                TermField::DateRange
            }
            SearchType::BirthMonth
            | SearchType::Gender
            | SearchType::MaritalStatus
            | SearchType::RecordStatus
            | SearchType::MinistryType
            | SearchType::OfferingSubType
            | SearchType::ExpenseType => TermField::Select,
            SearchType::Country
            | SearchType::Department
            | SearchType::Province
            | SearchType::District
            | SearchType::UrbanSector
            | SearchType::Address
            | SearchType::ChurchName
            | SearchType::MinistryName
            | SearchType::ZoneName
            | SearchType::FamilyGroupName
            | SearchType::FamilyGroupCode => TermField::Input,
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().replace('-', "_")))
            .map_err(|_| format!("unknown search type '{}'", s.trim()))
    }
}

/// Inclusive date range; `to == None` searches a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

/// Raw values typed into a search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFormInput {
    #[serde(default)]
    pub input_term: Option<String>,
    #[serde(default)]
    pub first_names_term: Option<String>,
    #[serde(default)]
    pub last_names_term: Option<String>,
    #[serde(default)]
    pub date_term: Option<DateRange>,
    #[serde(default)]
    pub select_term: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    pub limit: u32,
    pub offset: u32,
    pub order: SortOrder,
    /// Fetch every match, ignoring limit and offset
    pub all: bool,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            order: SortOrder::Desc,
            all: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchQueryError {
    #[error("'{search_type}' is not a valid search type for {entity}")]
    UnsupportedSearchType {
        entity: SearchEntity,
        search_type: SearchType,
    },

    #[error("search by '{search_type}' requires a value in the {field:?} field")]
    MissingTerm {
        search_type: SearchType,
        field: TermField,
    },

    #[error("date range ends ({to}) before it starts ({from})")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub entity: SearchEntity,
    pub search_type: SearchType,
    pub term: String,
    pub paging: Paging,
}

impl SearchQuery {
    /// Collection path, e.g. `/disciples/search`
    pub fn path(&self) -> String {
        format!("/{}/search", self.entity.resource_path())
    }

    /// Query-string parameters in the order the backend documents them
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("term", self.term.clone()),
            ("searchType", self.search_type.as_str().to_string()),
        ];
        if !self.paging.all {
            pairs.push(("limit", self.paging.limit.to_string()));
            pairs.push(("offset", self.paging.offset.to_string()));
        }
        pairs.push(("order", self.paging.order.as_str().to_string()));
        pairs.push(("all", self.paging.all.to_string()));
        pairs
    }
}

/// Build a search query from form input.
///
/// Only the term field selected by `search_type` is read; it must be present
/// and non-blank.
pub fn build_search_query(
    entity: SearchEntity,
    search_type: SearchType,
    input: &SearchFormInput,
    paging: Paging,
) -> Result<SearchQuery, SearchQueryError> {
    if !entity.supports(search_type) {
        return Err(SearchQueryError::UnsupportedSearchType {
            entity,
            search_type,
        });
    }

    let field = search_type.term_field();
    let missing = || SearchQueryError::MissingTerm { search_type, field };

    let term = match field {
        TermField::Input => non_blank(input.input_term.as_deref()).ok_or_else(missing)?,
        TermField::Select => non_blank(input.select_term.as_deref()).ok_or_else(missing)?,
        TermField::FirstNames => non_blank(input.first_names_term.as_deref())
            .map(|names| join_words(&names))
            .ok_or_else(missing)?,
        TermField::LastNames => non_blank(input.last_names_term.as_deref())
            .map(|names| join_words(&names))
            .ok_or_else(missing)?,
        TermField::FullName => {
            let first = non_blank(input.first_names_term.as_deref()).ok_or_else(missing)?;
            let last = non_blank(input.last_names_term.as_deref()).ok_or_else(missing)?;
            format!("{}-{}", join_words(&first), join_words(&last))
        }
        TermField::DateRange => {
            let range = input.date_term.ok_or_else(missing)?;
            let to = range.to.unwrap_or(range.from);
            if to < range.from {
                return Err(SearchQueryError::InvertedDateRange {
                    from: range.from,
                    to,
                });
            }
            format!("{}+{}", range.from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))
        }
    };

    Ok(SearchQuery {
        entity,
        search_type,
        term,
        paging,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// "Ana  Maria" -> "Ana+Maria"
fn join_words(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_name_term_joins_both_name_fields() {
        let input = SearchFormInput {
            first_names_term: Some(" Ana  Maria ".into()),
            last_names_term: Some("Quispe Rojas".into()),
            input_term: Some("ignored".into()),
            ..Default::default()
        };
        let query = build_search_query(
            SearchEntity::Disciple,
            SearchType::FullName,
            &input,
            Paging::default(),
        )
        .unwrap();
        assert_eq!(query.term, "Ana+Maria-Quispe+Rojas");
        assert_eq!(query.path(), "/disciples/search");
    }

    #[test]
    fn test_full_name_needs_both_parts() {
        let input = SearchFormInput {
            first_names_term: Some("Ana".into()),
            ..Default::default()
        };
        let err = build_search_query(
            SearchEntity::Pastor,
            SearchType::FullName,
            &input,
            Paging::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SearchQueryError::MissingTerm {
                search_type: SearchType::FullName,
                field: TermField::FullName,
            }
        );
    }

    #[test]
    fn test_only_the_selected_field_is_read() {
        let input = SearchFormInput {
            input_term: Some("Lima".into()),
            select_term: Some("female".into()),
            ..Default::default()
        };
        let by_gender = build_search_query(
            SearchEntity::Preacher,
            SearchType::Gender,
            &input,
            Paging::default(),
        )
        .unwrap();
        assert_eq!(by_gender.term, "female");

        let by_province = build_search_query(
            SearchEntity::Preacher,
            SearchType::Province,
            &input,
            Paging::default(),
        )
        .unwrap();
        assert_eq!(by_province.term, "Lima");
    }

    #[test]
    fn test_blank_term_is_missing() {
        let input = SearchFormInput {
            input_term: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_search_query(
                SearchEntity::Zone,
                SearchType::ZoneName,
                &input,
                Paging::default()
            ),
            Err(SearchQueryError::MissingTerm { .. })
        ));
    }

    #[test]
    fn test_date_range_term() {
        let mut input = SearchFormInput {
            date_term: Some(DateRange {
                from: date(2024, 6, 1),
                to: Some(date(2024, 6, 30)),
            }),
            ..Default::default()
        };
        let query = build_search_query(
            SearchEntity::OfferingIncome,
            SearchType::Date,
            &input,
            Paging::default(),
        )
        .unwrap();
        assert_eq!(query.term, "2024-06-01+2024-06-30");

        input.date_term = Some(DateRange {
            from: date(2024, 6, 1),
            to: None,
        });
        let single_day = build_search_query(
            SearchEntity::OfferingIncome,
            SearchType::Date,
            &input,
            Paging::default(),
        )
        .unwrap();
        assert_eq!(single_day.term, "2024-06-01+2024-06-01");

        input.date_term = Some(DateRange {
            from: date(2024, 6, 30),
            to: Some(date(2024, 6, 1)),
        });
        assert!(matches!(
            build_search_query(
                SearchEntity::OfferingIncome,
                SearchType::Date,
                &input,
                Paging::default()
            ),
            Err(SearchQueryError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn test_unsupported_combination_rejected() {
        let input = SearchFormInput {
            input_term: Some("FG-001".into()),
            ..Default::default()
        };
        assert!(SearchEntity::Disciple.supports(SearchType::FamilyGroupCode));
        assert!(!SearchEntity::Pastor.supports(SearchType::FamilyGroupCode));
        let err = build_search_query(
            SearchEntity::Pastor,
            SearchType::FamilyGroupCode,
            &input,
            Paging::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("family_group_code"));
    }

    #[test]
    fn test_query_pairs_respect_all_flag() {
        let input = SearchFormInput {
            select_term: Some("active".into()),
            ..Default::default()
        };
        let mut paging = Paging::default();
        let query = build_search_query(
            SearchEntity::Church,
            SearchType::RecordStatus,
            &input,
            paging,
        )
        .unwrap();
        let keys: Vec<&str> = query.to_query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["term", "searchType", "limit", "offset", "order", "all"]);

        paging.all = true;
        let all = SearchQuery { paging, ..query };
        let pairs = all.to_query_pairs();
        assert!(pairs.iter().all(|(k, _)| *k != "limit" && *k != "offset"));
        assert!(pairs.contains(&("all", "true".to_string())));
        assert!(pairs.contains(&("order", "DESC".to_string())));
    }

    #[test]
    fn test_search_type_parses_kebab_and_snake() {
        assert_eq!("full-name".parse::<SearchType>().unwrap(), SearchType::FullName);
        assert_eq!("zone_name".parse::<SearchType>().unwrap(), SearchType::ZoneName);
        assert!("shoe_size".parse::<SearchType>().is_err());
    }

    #[test]
    fn test_every_entity_has_search_types_and_path() {
        let entities = [
            SearchEntity::Pastor,
            SearchEntity::Church,
            SearchEntity::Ministry,
            SearchEntity::Zone,
            SearchEntity::FamilyGroup,
            SearchEntity::OfferingIncome,
            SearchEntity::OfferingExpense,
        ];
        for entity in entities {
            assert!(!entity.supported_search_types().is_empty());
            assert!(!entity.resource_path().is_empty());
        }
        for kind in MemberKind::ALL {
            let entity = SearchEntity::from(kind);
            assert_eq!(entity.member_kind(), Some(kind));
            assert_eq!(entity.resource_path(), kind.resource_path());
        }
    }
}
