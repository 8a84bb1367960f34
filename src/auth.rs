use thiserror::Error;

use crate::models::Role;

pub const MANAGER_EMAIL: &str = "manager@demo.com";
pub const MANAGER_PASSWORD: &str = "manager123";
pub const EMPLOYEE_EMAIL: &str = "employee@demo.com";
pub const EMPLOYEE_PASSWORD: &str = "employee123";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("consent to data collection is required before signing up")]
    ConsentRequired,
}

/// Credential check seam. Swapping the demo table for a real identity
/// provider must not touch the session layer.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> Option<Role>;
}

/// Fixed demo account table: one manager, one employee. Exact match only,
/// no hashing or rate limiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCredentials;

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<Role> {
        match (email, password) {
            (MANAGER_EMAIL, MANAGER_PASSWORD) => Some(Role::Manager),
            (EMPLOYEE_EMAIL, EMPLOYEE_PASSWORD) => Some(Role::Employee),
            _ => None,
        }
    }
}
