// src/supabase/mod.rs
pub mod client;
pub mod models;

pub use client::SupabaseStore;
pub use models::KnowledgeRecord;
