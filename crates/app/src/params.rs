//! Game parameters from the environment.

use std::fmt;
use std::path::PathBuf;

use simulation::GameParams;

/// Environment variable naming a JSON `GameParams` file.
pub const PARAMS_ENV: &str = "SKYLINE_PARAMS";

#[derive(Debug)]
pub enum ParamsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            ParamsError::Parse { path, source } => {
                write!(f, "invalid parameters in {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io { source, .. } => Some(source),
            ParamsError::Parse { source, .. } => Some(source),
        }
    }
}

/// Parameters from the file named by `SKYLINE_PARAMS`, or the defaults when
/// the variable is unset.
pub fn params_from_env() -> Result<GameParams, ParamsError> {
    match std::env::var_os(PARAMS_ENV) {
        Some(path) => load_params(PathBuf::from(path)),
        None => Ok(GameParams::default()),
    }
}

pub fn load_params(path: PathBuf) -> Result<GameParams, ParamsError> {
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(source) => return Err(ParamsError::Io { path, source }),
    };
    GameParams::from_json_str(&json).map_err(|source| ParamsError::Parse { path, source })
}
