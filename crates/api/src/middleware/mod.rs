//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac`] -- Wrap `AuthUser` and require a right granted by its role.

pub mod auth;
pub mod rbac;
