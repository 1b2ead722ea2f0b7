use std::path::{Path, PathBuf};

use clap::Args;

/// Shader loaded by the `camera` demo, relative to the root.
pub const CAMERA_SHADER: &str = "assets/shaders/camera.wgsl";

/// File printed by `read_file` when none is given.
pub const TEST_TEXT: &str = "assets/test.txt";

/// `--root` option shared by the demo binaries.
#[derive(Debug, Clone, Args)]
pub struct RootArgs {
    /// Directory that holds `assets/`. Falls back to `$CL_ROOT_PATH`, then `./`.
    #[arg(long, value_name = "DIR", env = "CL_ROOT_PATH", default_value = "./")]
    pub root: PathBuf,
}

impl RootArgs {
    pub fn asset_root(&self) -> AssetRoot {
        AssetRoot::new(&self.root)
    }
}

/// Resolves asset paths against a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRoot {
    root: PathBuf,
}

impl AssetRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `relative` onto the root. Absolute paths are returned unchanged.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
