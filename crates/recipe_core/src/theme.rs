/// Dark mode at startup: the persisted choice when one exists, otherwise the
/// platform colour-scheme preference.
pub fn resolve_dark_mode(persisted: Option<bool>, platform_prefers_dark: bool) -> bool {
    persisted.unwrap_or(platform_prefers_dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_choice_wins() {
        assert!(!resolve_dark_mode(Some(false), true));
        assert!(resolve_dark_mode(Some(true), false));
    }

    #[test]
    fn platform_default_when_unset() {
        assert!(resolve_dark_mode(None, true));
        assert!(!resolve_dark_mode(None, false));
    }
}
