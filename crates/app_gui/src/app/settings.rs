//! Where the config file is looked up.

use directories_next::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "BOXLABEL_CONFIG";
pub const LOCAL_CONFIG: &str = "boxlabel.toml";

/// Candidate config files in priority order: `$BOXLABEL_CONFIG`, then
/// `boxlabel.toml` in the working directory, then the platform config dir.
pub fn config_candidates() -> Vec<PathBuf> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let user_dir = ProjectDirs::from("", "", "boxlabel").map(|d| d.config_dir().to_path_buf());
    candidates_from(from_env, Path::new("."), user_dir.as_deref())
}

fn candidates_from(
    from_env: Option<PathBuf>,
    working_dir: &Path,
    user_config_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(3);
    out.extend(from_env);
    out.push(working_dir.join(LOCAL_CONFIG));
    if let Some(dir) = user_config_dir {
        out.push(dir.join("config.toml"));
    }
    out
}
