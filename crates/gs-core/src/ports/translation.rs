/// Read-only lookup of user-facing strings.
pub trait TranslationPort: Send + Sync {
    /// Looks `key` up in `locale`, then in the default locale. Returns the key
    /// itself when neither has it.
    fn translate(&self, key: &str, locale: &str) -> String;
}
