//! Orgdesk - Membership backend for student organizations
//!
//! Tracks members, events with participant registration, and compliance
//! requirements with per-member status tallies. Identity is delegated to
//! Firebase Authentication; local accounts and profiles live in PostgreSQL.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
