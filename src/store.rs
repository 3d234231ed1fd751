//! Last-fetched search results
//!
//! Search pages keep the most recent result list so that navigating to a
//! detail view and back does not refetch. Nothing here evicts or expires; a
//! new search simply replaces the previous one.

use flock_types::{
    Church, FamilyGroup, MemberKind, MemberRecord, Ministry, OfferingExpense, OfferingIncome,
    SearchQuery, Zone,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SearchResultStore<T> {
    results: Vec<T>,
    last_query: Option<SearchQuery>,
}

impl<T> Default for SearchResultStore<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            last_query: None,
        }
    }
}

impl<T> SearchResultStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, query: SearchQuery, results: Vec<T>) {
        self.last_query = Some(query);
        self.results = results;
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.last_query = None;
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True unless the stored results came from exactly `query`
    pub fn is_stale_for(&self, query: &SearchQuery) -> bool {
        self.last_query.as_ref() != Some(query)
    }
}

/// One store per searchable collection
#[derive(Debug, Clone, Default)]
pub struct SearchStores {
    pub members: HashMap<MemberKind, SearchResultStore<MemberRecord>>,
    pub churches: SearchResultStore<Church>,
    pub ministries: SearchResultStore<Ministry>,
    pub zones: SearchResultStore<Zone>,
    pub family_groups: SearchResultStore<FamilyGroup>,
    pub offering_income: SearchResultStore<OfferingIncome>,
    pub offering_expenses: SearchResultStore<OfferingExpense>,
}

impl SearchStores {
    pub fn members_mut(&mut self, kind: MemberKind) -> &mut SearchResultStore<MemberRecord> {
        self.members.entry(kind).or_default()
    }

    pub fn members(&self, kind: MemberKind) -> Option<&SearchResultStore<MemberRecord>> {
        self.members.get(&kind)
    }

    /// Forget everything, e.g. on logout
    pub fn clear_all(&mut self) {
        self.members.clear();
        self.churches.clear();
        self.ministries.clear();
        self.zones.clear();
        self.family_groups.clear();
        self.offering_income.clear();
        self.offering_expenses.clear();
    }
}
