//! Capability interface for anything a token can be minted for.

/// An authenticatable identity
///
/// Implementors only need to expose a stable identifier; the type name
/// defaults to the Rust type path and is what model-safe mode compares.
///
/// # Example
/// ```
/// use tg_core::domain::Principal;
///
/// struct Account { id: u64 }
///
/// impl Principal for Account {
///     fn auth_identifier(&self) -> String {
///         self.id.to_string()
///     }
/// }
///
/// let account = Account { id: 42 };
/// assert_eq!(account.auth_identifier(), "42");
/// assert!(account.type_name().ends_with("Account"));
/// ```
pub trait Principal: Send + Sync {
    /// Identifier placed in the `sub` claim
    fn auth_identifier(&self) -> String;

    /// Name of the concrete principal type, placed in the `model` claim
    fn type_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}
