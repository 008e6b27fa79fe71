// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required, /api/*)
pub mod protected;
pub mod public;
