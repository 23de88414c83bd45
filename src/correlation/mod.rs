//! Domain layer: canonical scan and vulnerability shapes plus the pure
//! services that normalize raw scans and derive search terms from them.

pub mod domain;
pub mod services;
