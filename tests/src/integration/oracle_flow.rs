//! Oracle consensus monitor running under the supervisor.

#[cfg(test)]
mod tests {
    use crate::integration::support::{addr, hash, ScriptedConsensus, ONE_ETH};
    use sentinel_chain::ResilientReader;
    use sentinel_oracle::{OracleConsensusMonitor, ReportReceivedEvent, SubmissionTimes};
    use sentinel_runtime::{Network, NetworkConfig, OracleBlockMonitor, Supervisor, SupervisorConfig};
    use shared_types::{Address, BlockRef, Severity};
    use std::sync::Arc;

    fn event(member: Address, ref_slot: u64, h: u8, block_number: u64) -> ReportReceivedEvent {
        ReportReceivedEvent {
            member,
            ref_slot,
            report_hash: hash(h),
            block_number,
        }
    }

    async fn oracle_monitor(
        consensus: Arc<ScriptedConsensus>,
        current: &BlockRef,
    ) -> OracleConsensusMonitor<ScriptedConsensus> {
        // Config flows from the per-network constant table, as in
        // production composition.
        let config = NetworkConfig::for_network(Network::Holesky).oracle_config();
        OracleConsensusMonitor::initialize(consensus, ResilientReader::new(), config, current)
            .await
            .expect("oracle init")
    }

    #[tokio::test]
    async fn test_disagreement_after_backfilled_state() {
        let members: Vec<Address> = (1..=9).map(addr).collect();
        let consensus = Arc::new(ScriptedConsensus::new(members));
        consensus
            .history
            .lock()
            .push(event(addr(1), 10, 0xAA, 199_900));
        let monitor = oracle_monitor(consensus, &BlockRef::at(200_000, 1_000)).await;

        // The first report came from history; the live alternative one
        // conflicts with it.
        let findings = monitor.handle_report_received(&event(addr(2), 10, 0xBB, 200_001));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].description.contains("2 of 9 reports received"));
    }

    #[tokio::test]
    async fn test_balance_and_overdue_through_supervisor() {
        let consensus = Arc::new(ScriptedConsensus::new(vec![addr(1), addr(2)]));
        consensus.balances.lock().insert(addr(1), ONE_ETH / 100);
        *consensus.times.lock() = SubmissionTimes {
            main_data_at: 1_000,
            extra_data_at: 1_000,
        };
        let monitor = oracle_monitor(consensus, &BlockRef::at(200_000, 1_000)).await;

        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 1_000);
        supervisor.register(Arc::new(OracleBlockMonitor::new(monitor)));

        // Far enough in the future that the report is overdue and balances
        // are due for a poll.
        let late = 1_000 + 87_300 + 1;
        let findings = supervisor.run_cycle(&BlockRef::at(200_400, late)).await;

        let balance: Vec<_> = findings
            .iter()
            .filter(|f| f.alert_id == "ORACLE-MEMBER-LOW-BALANCE")
            .collect();
        assert_eq!(balance.len(), 1);
        assert_eq!(balance[0].severity, Severity::High);

        let overdue: Vec<_> = findings
            .iter()
            .filter(|f| f.alert_id == "ORACLE-REPORT-OVERDUE")
            .collect();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn test_submission_sweep_flags_silent_member() {
        let consensus = Arc::new(ScriptedConsensus::new(vec![addr(1), addr(2)]));
        consensus
            .history
            .lock()
            .push(event(addr(1), 10, 0xAA, 199_900));
        *consensus.fast_lane.lock() = vec![addr(1), addr(2)];
        let monitor = oracle_monitor(consensus, &BlockRef::at(200_000, 1_000)).await;

        // Member 2 never reported; its silence spans the whole observation
        // window plus the new blocks.
        let findings = monitor
            .handle_report_submitted(&BlockRef::at(200_050, 1_600))
            .await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].alert_id, "ORACLE-MEMBER-VERY-SLOPPY");
        assert_eq!(
            findings[0].metadata.get("member").map(String::as_str),
            Some("0x02000000…")
        );
    }
}
