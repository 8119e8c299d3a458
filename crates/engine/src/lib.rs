pub mod allowlist;
pub mod dispatch;
pub mod registry;
pub mod router;
