//! Domain types shared by the preference stores.

pub mod errors;
pub mod preset;
pub mod checklist;
