//! Pure oracle-monitoring logic, unit-testable without I/O.

pub mod balances;
pub mod liveness;
pub mod overdue;
pub mod reports;
