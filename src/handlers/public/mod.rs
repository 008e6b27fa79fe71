// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and liveness. Mounted outside the /api prefix, so the
// auth gate never runs in front of them.

pub mod auth;
pub mod health;

pub use health::health;
