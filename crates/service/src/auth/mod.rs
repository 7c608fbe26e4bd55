//! Auth module: domain, repository, password policy, session registry and service.
//!
//! Only the mutating employee routes are gated; reads stay public.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod session;
pub mod repo;

pub use service::AuthService;
pub use session::{SessionEntry, SessionStore};
