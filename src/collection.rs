//! Caller-owned record collection.
//!
//! Records are appended and never removed. Insertion order is the
//! tie-break order used by the scorer.

use serde::{Deserialize, Serialize};

use crate::models::ProfileRecord;
use crate::search::{self, SearchOutcome, SearchParams};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileCollection {
    records: Vec<ProfileRecord>,
}

impl ProfileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ProfileRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn search<'a>(&'a self, query: &str, params: &SearchParams) -> SearchOutcome<'a> {
        search::search(&self.records, query, params)
    }
}

impl Extend<ProfileRecord> for ProfileCollection {
    fn extend<T: IntoIterator<Item = ProfileRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl From<Vec<ProfileRecord>> for ProfileCollection {
    fn from(records: Vec<ProfileRecord>) -> Self {
        Self { records }
    }
}
