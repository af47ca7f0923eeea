use chrono::NaiveDate;

use crate::model::{FloorPlan, Revision};

/// Most recently created revision.
///
/// Ordered by `created_at`; equal timestamps fall back to the store's
/// `sequence` counter and then to list position (later wins). The input order
/// itself is never trusted to be sorted.
pub fn latest_revision(revisions: &[Revision]) -> Option<&Revision> {
    revisions
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.sequence.cmp(&b.sequence))
                .then(ia.cmp(ib))
        })
        .map(|(_, r)| r)
}

/// Footer stamp printed on every exported plan page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevisionStamp {
    pub major: u32,
    pub minor: u32,
    pub date: NaiveDate,
}

impl RevisionStamp {
    pub fn for_plan(plan: &FloorPlan) -> Option<Self> {
        latest_revision(&plan.revisions).map(|r| RevisionStamp {
            major: r.major,
            minor: r.minor,
            date: r.created_at.date_naive(),
        })
    }

    pub fn label(&self) -> String {
        format!("Rev: {}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
#[path = "revision_test.rs"]
mod tests;
