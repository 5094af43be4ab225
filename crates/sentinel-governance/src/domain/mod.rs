//! Pure governance logic, unit-testable without I/O.

pub mod hysteresis;
