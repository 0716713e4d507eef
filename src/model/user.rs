/// How a login ID proves itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Argon2 PHC string.
    Fixed { password_hash: String },
    /// No password has been set for this account yet.
    Provisional,
}
