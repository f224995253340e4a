//! Hostel booking administration: room inventory, guest registry and the
//! booking ledger behind a small server-rendered UI.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
