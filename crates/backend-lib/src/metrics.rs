// ============================
// crates/backend-lib/src/metrics.rs
// ============================
//! Central place for metric keys
pub const USER_REGISTERED: &str = "user.registered";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const LOGIN_FAILED: &str = "login.failed";
pub const ORGANIZATION_CREATED: &str = "organization.created";
pub const MEMBER_ADDED: &str = "organization.member_added";
pub const TOKEN_REJECTED: &str = "token.rejected";
