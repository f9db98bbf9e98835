// handlers/mod.rs - Profile route handlers, split by security tier
//
// Public (no auth) → Protected (token required)
pub mod public;
pub mod protected;
