use std::path::{Path, PathBuf};

/// Resolve the data directory holding todos.json and config.toml.
///
/// Precedence: explicit override (the `-C` flag) > `$TICK_DIR` >
/// `$XDG_DATA_HOME/tick` > `$HOME/.local/share/tick`.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf, std::io::Error> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(dir) = std::env::var("TICK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
        })
        .map_err(|_| std::io::Error::other("cannot locate data directory: HOME is not set"))?;
    Ok(base.join("tick"))
}
