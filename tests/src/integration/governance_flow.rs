//! Governance escrow monitor running under the supervisor.

#[cfg(test)]
mod tests {
    use crate::integration::support::ScriptedEscrow;
    use sentinel_chain::ResilientReader;
    use sentinel_governance::{GovernanceEscrowMonitor, GovernanceState};
    use sentinel_runtime::{GovernanceBlockMonitor, Supervisor, SupervisorConfig};
    use shared_types::{BlockRef, Severity};
    use std::sync::Arc;

    async fn supervised(
        escrow: Arc<ScriptedEscrow>,
    ) -> Supervisor {
        let monitor =
            GovernanceEscrowMonitor::initialize(escrow, ResilientReader::new())
                .await
                .expect("escrow config fetch");
        let mut supervisor = Supervisor::new(SupervisorConfig::default(), 0);
        supervisor.register(Arc::new(GovernanceBlockMonitor::new(monitor)));
        supervisor
    }

    #[tokio::test]
    async fn test_threshold_finding_surfaces_through_supervisor() {
        let escrow = Arc::new(ScriptedEscrow::new(10_000, 15_000));
        *escrow.state.lock() = GovernanceState::VetoSignalling;
        *escrow.rage_quit_support.lock() = 7_600;
        let supervisor = supervised(escrow).await;

        let findings = supervisor.run_cycle(&BlockRef::at(100, 1_200)).await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].alert_id, "GOVERNANCE-RAGE-QUIT-SUPPORT");
        assert_eq!(findings[0].severity, Severity::Medium);
        assert!(supervisor.is_healthy());
    }

    #[tokio::test]
    async fn test_quiet_cycles_after_alert() {
        let escrow = Arc::new(ScriptedEscrow::new(10_000, 15_000));
        *escrow.state.lock() = GovernanceState::VetoSignalling;
        *escrow.rage_quit_support.lock() = 7_600;
        let supervisor = supervised(escrow.clone()).await;

        assert_eq!(supervisor.run_cycle(&BlockRef::at(100, 1_200)).await.len(), 1);

        // Identical chain state on the next blocks: nothing new to say.
        assert!(supervisor.run_cycle(&BlockRef::at(101, 1_212)).await.is_empty());
        *escrow.rage_quit_support.lock() = 7_650; // still level 50
        assert!(supervisor.run_cycle(&BlockRef::at(102, 1_224)).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_outage_produces_error_findings_not_silence() {
        let escrow = Arc::new(ScriptedEscrow::new(10_000, 15_000));
        *escrow.fail_reads.lock() = true;
        let supervisor = supervised(escrow).await;

        let findings = supervisor.run_cycle(&BlockRef::at(100, 1_200)).await;
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_network_error());
        // One failed cycle is far below the health ceiling.
        assert!(supervisor.is_healthy());
    }
}
