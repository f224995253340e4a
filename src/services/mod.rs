//! Domain services. Everything here takes `&mut SqliteConnection` so the
//! ledger can compose inventory and registry calls inside one transaction;
//! only the two ledger entry points own their transaction and take a pool.

pub mod accounts;
pub mod dashboard;
pub mod inventory;
pub mod ledger;
pub mod registry;
