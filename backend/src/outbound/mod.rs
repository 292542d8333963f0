//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process tables for local runs and integration tests
//! - **supabase**: PostgREST repositories and the GoTrue auth gateway
//! - **open_meteo**: current-conditions weather source
//!
//! Adapters translate between domain types and wire representations and
//! classify failures into port errors. They contain no business rules.

pub mod memory;
pub mod open_meteo;
pub mod supabase;
