//! Tag reconciliation
//!
//! Brings an entity's remote tag associations from the set the client last
//! saw to the set the user picked. Calls for distinct tag ids are
//! independent: they are issued together and joined, nothing is rolled back
//! on partial failure, and the caller decides what to retry.

use std::collections::BTreeSet;
use std::fmt;

use futures::future::{join, join_all};
use shared::models::TagType;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::tags::TagAssignments;
use crate::{ClientError, ClientResult};

/// Minimal add/remove sets between two tag-id collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    pub to_add: BTreeSet<i64>,
    pub to_remove: BTreeSet<i64>,
}

impl TagDiff {
    /// Duplicates in either input are collapsed before diffing
    pub fn between<I, J>(current: I, desired: J) -> Self
    where
        I: IntoIterator<Item = i64>,
        J: IntoIterator<Item = i64>,
    {
        let current: BTreeSet<i64> = current.into_iter().collect();
        let desired: BTreeSet<i64> = desired.into_iter().collect();
        Self {
            to_add: desired.difference(&current).copied().collect(),
            to_remove: current.difference(&desired).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Number of remote calls applying this diff takes
    pub fn call_count(&self) -> usize {
        self.to_add.len() + self.to_remove.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationOp {
    Add,
    Remove,
}

impl fmt::Display for AssociationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// One association call that did not go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationFailure {
    pub tag_id: i64,
    pub op: AssociationOp,
    /// HTTP status, when the backend answered
    pub status: Option<u16>,
    pub reason: String,
}

/// Calls that completed (including tolerated 409/404 answers)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: BTreeSet<i64>,
    pub removed: BTreeSet<i64>,
}

/// At least one association call failed.
///
/// `applied` lists what did go through; those calls are not rolled back,
/// so local and remote state differ until the failed ids are retried.
#[derive(Debug, Clone, Error)]
#[error("{} tag association call(s) failed for {entity_type} {entity_id}", .failures.len())]
pub struct AssociationError {
    pub entity_type: TagType,
    pub entity_id: i64,
    pub failures: Vec<AssociationFailure>,
    pub applied: ReconcileReport,
}

impl AssociationError {
    /// Tag ids whose `op` call failed
    pub fn failed_ids(&self, op: AssociationOp) -> BTreeSet<i64> {
        self.failures
            .iter()
            .filter(|f| f.op == op)
            .map(|f| f.tag_id)
            .collect()
    }

    /// The diff still outstanding, ready to retry
    pub fn remaining(&self) -> TagDiff {
        TagDiff {
            to_add: self.failed_ids(AssociationOp::Add),
            to_remove: self.failed_ids(AssociationOp::Remove),
        }
    }
}

/// Drives [`TagAssignments`] calls for a diff
#[derive(Debug, Clone)]
pub struct TagReconciler<A> {
    api: A,
}

impl<A: TagAssignments> TagReconciler<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Make the remote tags of `entity_type` `entity_id` equal `desired`.
    ///
    /// Issues one create per id in `desired - current` and one delete per id
    /// in `current - desired`, all concurrently. Equal sets issue nothing.
    pub async fn reconcile<I, J>(
        &self,
        entity_id: i64,
        entity_type: TagType,
        current: I,
        desired: J,
    ) -> Result<ReconcileReport, AssociationError>
    where
        I: IntoIterator<Item = i64>,
        J: IntoIterator<Item = i64>,
    {
        let diff = TagDiff::between(current, desired);
        self.apply(entity_id, entity_type, &diff).await
    }

    /// Apply an already computed diff
    pub async fn apply(
        &self,
        entity_id: i64,
        entity_type: TagType,
        diff: &TagDiff,
    ) -> Result<ReconcileReport, AssociationError> {
        if diff.is_empty() {
            debug!(%entity_type, entity_id, "[Tags] nothing to reconcile");
            return Ok(ReconcileReport::default());
        }

        let adds = diff.to_add.iter().map(|&tag_id| async move {
            let result = self.api.assign(entity_type, entity_id, tag_id).await;
            (tag_id, settle(AssociationOp::Add, tag_id, result))
        });
        let removes = diff.to_remove.iter().map(|&tag_id| async move {
            let result = self.api.unassign(entity_type, entity_id, tag_id).await;
            (tag_id, settle(AssociationOp::Remove, tag_id, result))
        });

        let (add_results, remove_results) = join(join_all(adds), join_all(removes)).await;

        let mut report = ReconcileReport::default();
        let mut failures = Vec::new();
        for (op, results) in [
            (AssociationOp::Add, add_results),
            (AssociationOp::Remove, remove_results),
        ] {
            for (tag_id, result) in results {
                match result {
                    Ok(()) => {
                        let applied = match op {
                            AssociationOp::Add => &mut report.added,
                            AssociationOp::Remove => &mut report.removed,
                        };
                        applied.insert(tag_id);
                    }
                    Err(e) => {
                        warn!(%entity_type, entity_id, tag_id, %op, error = %e, "[Tags] association call failed");
                        failures.push(AssociationFailure {
                            tag_id,
                            op,
                            status: e.status(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            %entity_type,
            entity_id,
            added = report.added.len(),
            removed = report.removed.len(),
            failed = failures.len(),
            "[Tags] reconciled"
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(AssociationError {
                entity_type,
                entity_id,
                failures,
                applied: report,
            })
        }
    }
}

/// Creating an existing association or deleting a missing one is a no-op
fn settle(op: AssociationOp, tag_id: i64, result: ClientResult<()>) -> Result<(), ClientError> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if op == AssociationOp::Add && e.is_conflict() => {
            debug!(tag_id, "[Tags] already associated");
            Ok(())
        }
        Err(e) if op == AssociationOp::Remove && e.is_not_found() => {
            debug!(tag_id, "[Tags] association already gone");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
