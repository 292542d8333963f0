//! Supabase adapters.
//!
//! `SupabaseStore` implements the repository ports against PostgREST and
//! `SupabaseAuthGateway` implements the auth port against GoTrue. Both share
//! one [`SupabaseClient`] carrying the project URL, anon key and timeout.

mod auth;
mod client;
mod postgrest;
mod repositories;

pub use auth::SupabaseAuthGateway;
pub use client::SupabaseClient;
pub use repositories::SupabaseStore;
