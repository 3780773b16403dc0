//! Workspace definition and helper
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use crate::{cli::Cli, Error};

/// Environment variable that always defines the workspace
const WORKSPACE_ENV: &str = "LEOLINK_WORKSPACE";

/// Default workspace, relative to current directory
const DEFAULT_WORKSPACE: &str = "graphs";

/// Workspace, where all sessions are generated
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Root Fullpath
    pub root: PathBuf,
}

impl Workspace {
    /// Builds a new workspace either
    ///  1. from $LEOLINK_WORKSPACE environment variable
    ///  2. from -w workspace CLI argument
    ///  3. or defaults to ./graphs
    pub fn new(cli: &Cli) -> Result<Self, Error> {
        let root = match std::env::var(WORKSPACE_ENV) {
            Ok(path) => PathBuf::from(path),
            _ => match cli.workspace() {
                Some(path) => path.to_path_buf(),
                None => PathBuf::from(DEFAULT_WORKSPACE),
            },
        };
        Self::from_root(root)
    }
    /// Builds a workspace at given location, which is created if needed.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();
        create_dir_all(&root).map_err(|e| Error::Workspace(root.clone(), e))?;
        info!("workspace is \"{}\"", root.display());
        Ok(Self { root })
    }
    /// Creates subdirectory within self, returns its full path
    pub fn create_subdir(&self, dir: &str) -> Result<PathBuf, Error> {
        let path = self.root.join(dir);
        create_dir_all(&path).map_err(|e| Error::Workspace(path.clone(), e))?;
        Ok(path)
    }
}
