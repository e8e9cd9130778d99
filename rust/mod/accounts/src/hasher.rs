//! Password digest seam.
//!
//! The accounts module never hashes passwords itself — it only knows this
//! trait. The concrete scheme (and any migration between schemes) is the
//! binary's concern, injected at startup time.

/// Pluggable password digest scheme.
pub trait PasswordHasher: Send + Sync {
    /// Produce a storable digest for a new password.
    fn hash(&self, password: &str) -> String;

    /// Check a login attempt against a stored digest.
    fn verify(&self, password: &str, digest: &str) -> bool;
}
