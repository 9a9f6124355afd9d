use std::any::Any;
use std::collections::HashMap;

use vortex_error::{VortexResult, vortex_err};

/// Scratch state owned by one scan thread and handed to every array conversion on that thread.
///
/// Converters key their allocations (decoded dictionaries, string buffers, ...) by whatever
/// identifies the source, typically a column index, and reuse them across arrays and
/// partitions.
#[derive(Debug)]
pub struct ConversionCache {
    // A value which must be unique for a given duckdb pipeline.
    instance_id: u64,
    scratch: HashMap<usize, Box<dyn Any + Send>>,
}

impl ConversionCache {
    pub fn new(instance_id: u64) -> Self {
        Self {
            instance_id,
            scratch: HashMap::new(),
        }
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    /// The scratch value stored under `key`, created with `init` if absent or if the slot holds
    /// a value of another type.
    pub fn get_or_insert_with<T: Any + Send>(
        &mut self,
        key: usize,
        init: impl FnOnce() -> T,
    ) -> VortexResult<&mut T> {
        if !self.scratch.get(&key).is_some_and(|v| v.is::<T>()) {
            self.scratch.insert(key, Box::new(init()));
        }
        self.scratch
            .get_mut(&key)
            .and_then(|v| v.downcast_mut::<T>())
            .ok_or_else(|| vortex_err!(AssertionFailed: "conversion cache slot {} lost its value", key))
    }

    pub fn len(&self) -> usize {
        self.scratch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scratch.is_empty()
    }
}
