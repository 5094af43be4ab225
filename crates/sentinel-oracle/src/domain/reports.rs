//! Per-member report ledger and disagreement detection.

use crate::types::MemberReport;
use shared_types::{Address, Hash};
use std::collections::BTreeMap;

/// A member submitted a hash no other member submitted for the same slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disagreement {
    /// The minority reporter
    pub reporter: Address,
    /// The hash it submitted
    pub reported_hash: Hash,
    /// The earliest conflicting member for the same slot
    pub conflicting_member: Address,
    /// The hash that member submitted
    pub conflicting_hash: Hash,
    /// Reports recorded for this slot, including the new one
    pub received: usize,
    /// Committee size
    pub total_members: usize,
}

/// In-memory map of each member's last observed report.
///
/// Rows are created on first observation (or backfill) and updated in place;
/// they are never deleted. Only reports for the same reference slot
/// participate in disagreement detection.
#[derive(Debug, Default)]
pub struct ReportLedger {
    reports: BTreeMap<Address, MemberReport>,
}

impl ReportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a member's report, returning a disagreement if its hash
    /// matches none of the hashes already recorded for the same slot
    /// (including the member's own prior row) while at least one differing
    /// peer row exists.
    ///
    /// A hash that was already seen for the slot is quiet even when a
    /// different minority hash is also on record, so each alternative hash
    /// is reported exactly once, by its first submitter.
    pub fn record(
        &mut self,
        member: Address,
        report: MemberReport,
        total_members: usize,
    ) -> Option<Disagreement> {
        let mut any_match = false;
        let mut first_conflict: Option<(Address, Hash)> = None;
        let mut peer_count = 0usize;
        for (addr, prior) in self
            .reports
            .iter()
            .filter(|(_, prior)| prior.ref_slot == report.ref_slot)
        {
            if prior.report_hash == report.report_hash {
                any_match = true;
            }
            if *addr == member {
                continue;
            }
            peer_count += 1;
            if first_conflict.is_none() && prior.report_hash != report.report_hash {
                first_conflict = Some((*addr, prior.report_hash));
            }
        }

        let disagreement = if any_match {
            None
        } else {
            first_conflict.map(|(conflicting_member, conflicting_hash)| Disagreement {
                reporter: member,
                reported_hash: report.report_hash,
                conflicting_member,
                conflicting_hash,
                received: peer_count + 1,
                total_members,
            })
        };

        self.reports.insert(member, report);
        disagreement
    }

    /// Last recorded report for a member, if any.
    pub fn get(&self, member: &Address) -> Option<&MemberReport> {
        self.reports.get(member)
    }

    /// Number of members with at least one recorded report.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
