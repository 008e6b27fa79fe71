// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Everything here is mounted under /api behind `jwt_auth_middleware`, so each
// handler may take `Extension<AuthUser>` to learn who is calling.
//
// Each resource follows the same shape: decode → validate → persist → ack.
// Persistence failures surface immediately as 500; nothing is retried.

pub mod asset;
pub mod dashboard;
pub mod employee;
pub mod mapping;
