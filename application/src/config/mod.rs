//! Application-level configuration.
//!
//! - [`RetryPolicy`] — Transport attempts, backoff and per-call deadline

pub mod retry_policy;

pub use retry_policy::RetryPolicy;
