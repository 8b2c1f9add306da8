//! Right-checking extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects with 403 when the token's
//! role does not grant the right the endpoint needs. A bad or missing token
//! still rejects with 401 first.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use textsum_core::error::CoreError;
use textsum_core::roles::{has_right, Right};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires [`Right::GetSummaries`].
///
/// ```ignore
/// async fn list(CanGetSummaries(user): CanGetSummaries) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CanGetSummaries(pub AuthUser);

impl FromRequestParts<AppState> for CanGetSummaries {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require(&user, Right::GetSummaries)?;
        Ok(CanGetSummaries(user))
    }
}

/// Requires [`Right::ManageSummaries`].
#[derive(Debug, Clone)]
pub struct CanManageSummaries(pub AuthUser);

impl FromRequestParts<AppState> for CanManageSummaries {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require(&user, Right::ManageSummaries)?;
        Ok(CanManageSummaries(user))
    }
}

fn require(user: &AuthUser, right: Right) -> Result<(), AppError> {
    if has_right(&user.role, right) {
        return Ok(());
    }
    tracing::warn!(
        user_id = user.user_id,
        role = %user.role,
        right = right.as_str(),
        "Missing right"
    );
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Role '{}' lacks the {} right",
        user.role,
        right.as_str()
    ))))
}
