//! Dashboard personalization stores.
//! - `pins`: the user's pinned cards, reconciled against the cards that exist.
//! - `presets`: named saved values under caller-chosen keys.
//! - `checklist`: setup progress derived from resource counts.
//! - `storage`: best-effort JSON persistence shared by the stores.

pub mod errors;
pub mod storage;
pub mod pins;
pub mod presets;
pub mod checklist;
#[cfg(test)]
pub mod test_support;
