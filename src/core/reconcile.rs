//! Insert-vs-update decision for submitted timesheet rows.
//!
//! Every date cell of every row is matched against the stored items of the
//! timesheet, first by the explicit item id the client sent, otherwise by the
//! natural key (timesheet, project, activity, date). Matched items get the new
//! duration (and the comment, when one is sent); the rest are inserted.

use crate::core::entries::positive_id;
use crate::db::store::ItemStore;
use crate::errors::{AppError, AppResult};
use crate::models::item::{CompositeKey, LookupKey, TimesheetItem};
use crate::models::row::SubmittedRow;
use crate::models::timesheet::Timesheet;
use crate::utils::date::parse_date_required;
use crate::utils::time::duration_from_time_of_day;
use std::collections::{HashMap, HashSet};

/// One date cell of a submitted row, ready to be matched.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRequest {
    pub key: CompositeKey,
    /// Stored item the client claims this cell is.
    pub item_id: Option<i64>,
    pub duration: i64,
    pub comment: Option<String>,
}

impl CellRequest {
    pub fn lookup_key(&self) -> LookupKey {
        match self.item_id {
            Some(id) => LookupKey::Id(id),
            None => LookupKey::Composite(self.key),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    pub items: Vec<TimesheetItem>,
    pub inserted: usize,
    pub updated: usize,
}

/// Decompose submitted rows into cell requests, rejecting malformed input
/// before anything touches storage. A cell repeating an id, or an id-less
/// cell repeating a natural key, replaces the earlier one.
pub fn build_requests(timesheet_id: i64, rows: &[SubmittedRow]) -> AppResult<Vec<CellRequest>> {
    let mut requests: Vec<CellRequest> = Vec::new();
    let mut positions: HashMap<LookupKey, usize> = HashMap::new();

    for row in rows {
        let (Some(project_id), Some(activity_id), Some(dates)) =
            (row.project_id, row.activity_id, row.dates.as_ref())
        else {
            return Err(AppError::Shape(
                "`projectId` & `activityId` & `dates` required attributes".into(),
            ));
        };

        for (date_str, cell) in dates {
            let duration = cell
                .duration
                .as_deref()
                .ok_or_else(|| AppError::Shape("`duration` required attribute".into()))?;

            let key = CompositeKey {
                timesheet_id,
                project_id,
                activity_id,
                date: parse_date_required(date_str)?,
            };

            let request = CellRequest {
                key,
                item_id: cell.id.as_ref().and_then(positive_id),
                duration: duration_from_time_of_day(duration)?,
                comment: cell.comment.clone(),
            };

            match positions.get(&request.lookup_key()) {
                Some(&pos) => requests[pos] = request,
                None => {
                    positions.insert(request.lookup_key(), requests.len());
                    requests.push(request);
                }
            }
        }
    }

    Ok(requests)
}

/// Stored items addressable by id and by natural key.
struct CandidateIndex {
    by_id: HashMap<i64, TimesheetItem>,
    /// Item ids per natural key, lowest id first.
    by_key: HashMap<CompositeKey, Vec<i64>>,
}

impl CandidateIndex {
    fn build(existing: Vec<TimesheetItem>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_key: HashMap<CompositeKey, Vec<i64>> = HashMap::new();

        for item in existing {
            by_key.entry(item.composite_key()).or_default().push(item.id);
            by_id.insert(item.id, item);
        }
        for ids in by_key.values_mut() {
            ids.sort_unstable();
        }

        Self { by_id, by_key }
    }

    /// Match each request to a stored item. Explicit ids are claimed first;
    /// an id-less request then takes the lowest unclaimed id with its natural
    /// key.
    fn resolve(&self, requests: &[CellRequest]) -> Vec<Option<TimesheetItem>> {
        let mut out: Vec<Option<TimesheetItem>> = vec![None; requests.len()];
        let mut claimed: HashSet<i64> = HashSet::new();

        for (i, req) in requests.iter().enumerate() {
            if let Some(id) = req.item_id
                && let Some(found) = self.by_id.get(&id)
            {
                claimed.insert(id);
                out[i] = Some(found.clone());
            }
        }

        for (i, req) in requests.iter().enumerate() {
            if req.item_id.is_some() {
                continue;
            }
            let Some(ids) = self.by_key.get(&req.key) else {
                continue;
            };
            out[i] = ids
                .iter()
                .find(|id| !claimed.contains(id))
                .and_then(|id| self.by_id.get(id))
                .cloned();
        }

        out
    }
}

/// Reconciles submitted rows against stored items through an injected store.
pub struct Reconciler<'s, S: ItemStore> {
    store: &'s mut S,
}

impl<'s, S: ItemStore> Reconciler<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Every activity must exist and belong to the project of its row.
    fn check_activities(&self, requests: &[CellRequest]) -> AppResult<()> {
        let mut activity_ids: Vec<i64> = requests.iter().map(|r| r.key.activity_id).collect();
        activity_ids.sort_unstable();
        activity_ids.dedup();

        let owners = self.store.activity_projects(&activity_ids)?;

        for req in requests {
            let activity_id = req.key.activity_id;
            let project_id = req.key.project_id;
            match owners.get(&activity_id) {
                Some(owner) if *owner == project_id => {}
                Some(_) => {
                    return Err(AppError::Consistency(format!(
                        "The project activity (id: {}) does not belong to the provided project (id: {})",
                        activity_id, project_id
                    )));
                }
                None => {
                    return Err(AppError::Consistency(format!(
                        "Unknown project activity (id: {})",
                        activity_id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn reconcile(&mut self, timesheet: &Timesheet, rows: &[SubmittedRow]) -> AppResult<ReconcileOutcome> {
        let requests = build_requests(timesheet.id, rows)?;
        if requests.is_empty() {
            return Ok(ReconcileOutcome::default());
        }

        self.check_activities(&requests)?;

        let ids: Vec<i64> = requests.iter().filter_map(|r| r.item_id).collect();
        let mut composites: Vec<CompositeKey> = requests.iter().map(|r| r.key).collect();
        composites.sort_unstable();
        composites.dedup();

        let existing = self
            .store
            .find_many_by_ids_or_composite_keys(timesheet.id, &ids, &composites)?;
        let matches = CandidateIndex::build(existing).resolve(&requests);

        let mut outcome = ReconcileOutcome::default();

        for (req, found) in requests.into_iter().zip(matches) {
            let item = match found {
                Some(mut stored) => {
                    stored.duration = Some(req.duration);
                    // a missing comment keeps the stored one
                    if let Some(comment) = req.comment {
                        stored.comment = Some(comment);
                    }
                    outcome.updated += 1;
                    stored
                }
                None => {
                    let mut item = TimesheetItem::new(
                        timesheet.id,
                        timesheet.emp_number,
                        req.key.project_id,
                        req.key.activity_id,
                        req.key.date,
                        req.duration,
                    );
                    item.comment = req.comment;
                    outcome.inserted += 1;
                    item
                }
            };
            self.store.persist(item);
        }

        outcome.items = self.store.flush()?;
        Ok(outcome)
    }
}
