use std::collections::HashMap;

use log::debug;
use track_framework_common::render::ModelHandle;

/// Hands out one [`ModelHandle`] per model name.
///
/// The mesh data itself belongs to the render backend, which resolves handles by name via
/// [`ModelCache::name`]. Pieces only keep copies of the handle.
#[derive(Debug, Default)]
pub struct ModelCache {
    names: Vec<String>,
    handles: HashMap<String, ModelHandle>,
}

impl ModelCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, registering the model on first use.
    pub fn load(&mut self, name: &str) -> ModelHandle {
        if let Some(handle) = self.handles.get(name) {
            return *handle;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "there are never more than a handful of models"
        )]
        let handle = ModelHandle(self.names.len() as u32);
        debug!("registering model {name:?} as {handle:?}");
        self.names.push(name.to_owned());
        self.handles.insert(name.to_owned(), handle);
        handle
    }

    #[must_use]
    pub fn name(&self, handle: ModelHandle) -> Option<&str> {
        let index = usize::try_from(handle.0).ok()?;
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
