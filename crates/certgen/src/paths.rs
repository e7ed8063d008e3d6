//! Home-directory expansion for user-supplied file paths.

use std::path::PathBuf;

/// Expand a leading `~` to the invoking user's home directory.
///
/// Only the bare `~` and the `~/...` forms are expanded; the `~user/...` form
/// is returned unchanged. When the home directory cannot be resolved the
/// input is also returned unchanged and provisioning proceeds against the
/// literal path — a deliberate fallback, not an error: paths that never
/// needed expansion must keep working on systems without a resolvable home.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(&rest[1..]),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_slash_roots_at_home() {
        let home = dirs::home_dir().expect("test environment has a home directory");
        assert_eq!(expand_home("~/certs/server"), home.join("certs/server"));
    }

    #[test]
    fn bare_tilde_is_home() {
        let home = dirs::home_dir().expect("test environment has a home directory");
        assert_eq!(expand_home("~"), home);
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/etc/httpsd/cert"), PathBuf::from("/etc/httpsd/cert"));
    }

    #[test]
    fn relative_path_unchanged() {
        assert_eq!(expand_home("certs/cert"), PathBuf::from("certs/cert"));
    }

    #[test]
    fn user_form_unchanged() {
        assert_eq!(expand_home("~alice/certs"), PathBuf::from("~alice/certs"));
    }
}
