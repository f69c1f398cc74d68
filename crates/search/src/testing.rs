//! Scripted record store shared by the search tests.

use crate::error::StoreError;
use crate::record::{ArtworkStatus, MatchRecord, RecordQuery};
use crate::store::RecordStore;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub(crate) fn artwork(id: &str, title: &str, day: u32) -> MatchRecord {
    MatchRecord {
        id: id.to_string(),
        title: title.to_string(),
        artist_name: None,
        description: None,
        materials: None,
        location: None,
        provenance: None,
        category: Some("paintings".to_string()),
        status: ArtworkStatus::Approved,
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        images: vec![],
    }
}

/// Answers each pattern from a script and records every query it sees.
#[derive(Default)]
pub(crate) struct ScriptedStore {
    answers: HashMap<Option<String>, Vec<MatchRecord>>,
    failing: HashSet<Option<String>>,
    fail_everything_else: bool,
    calls: Mutex<Vec<RecordQuery>>,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answer(mut self, pattern: Option<&str>, records: Vec<MatchRecord>) -> Self {
        self.answers.insert(pattern.map(String::from), records);
        self
    }

    pub(crate) fn fail(mut self, pattern: Option<&str>) -> Self {
        self.failing.insert(pattern.map(String::from));
        self
    }

    pub(crate) fn fail_unscripted(mut self) -> Self {
        self.fail_everything_else = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn find(&self, query: &RecordQuery) -> Result<Vec<MatchRecord>, StoreError> {
        self.calls.lock().unwrap().push(query.clone());

        if self.failing.contains(&query.pattern) {
            return Err(StoreError::backend("scripted failure"));
        }
        match self.answers.get(&query.pattern) {
            Some(records) => Ok(records.clone()),
            None if self.fail_everything_else => Err(StoreError::unavailable("scripted outage")),
            None => Ok(Vec::new()),
        }
    }
}
