//! Role names carried in access tokens and the rights each one grants.

/// Full access to the caller's own history.
pub const ROLE_USER: &str = "user";
/// Same rights as [`ROLE_USER`]; kept distinct for the identity service.
pub const ROLE_ADMIN: &str = "admin";
/// May read history and stats but not create, change or delete summaries.
pub const ROLE_VIEWER: &str = "viewer";

/// A capability checked before an endpoint runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Right {
    /// List and read summaries, read stats.
    GetSummaries,
    /// Summarize, save, update and delete summaries.
    ManageSummaries,
}

impl Right {
    pub fn as_str(self) -> &'static str {
        match self {
            Right::GetSummaries => "getSummaries",
            Right::ManageSummaries => "manageSummaries",
        }
    }
}

const FULL: &[Right] = &[Right::GetSummaries, Right::ManageSummaries];
const READ_ONLY: &[Right] = &[Right::GetSummaries];

/// Rights granted to `role`. Unknown roles get none.
pub fn role_rights(role: &str) -> &'static [Right] {
    match role {
        ROLE_USER | ROLE_ADMIN => FULL,
        ROLE_VIEWER => READ_ONLY,
        _ => &[],
    }
}

pub fn has_right(role: &str, right: Right) -> bool {
    role_rights(role).contains(&right)
}
