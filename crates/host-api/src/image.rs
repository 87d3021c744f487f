//! Route registration for trader portraits and other static images.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps request route paths to image files on disk.
///
/// The host serves a registered route by streaming the bound file; plugins
/// only register the binding. Re-registering a route replaces the binding,
/// matching the host's last-writer-wins behavior for static content.
#[derive(Clone, Debug, Default)]
pub struct ImageRouter {
    routes: HashMap<String, PathBuf>,
}

impl ImageRouter {
    pub fn register(&mut self, route: impl Into<String>, file: impl Into<PathBuf>) {
        self.routes.insert(route.into(), file.into());
    }

    pub fn file_for(&self, route: &str) -> Option<&Path> {
        self.routes.get(route).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
