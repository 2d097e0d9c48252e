use std::path::PathBuf;

/// Expand a leading `~/` to the home directory. Other paths are returned
/// unchanged.
pub fn expand_user_path(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
