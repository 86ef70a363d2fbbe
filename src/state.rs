use std::sync::Arc;

use crate::application::services::CodeAllocator;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<CodeAllocator>,
}

impl AppState {
    pub fn new(allocator: Arc<CodeAllocator>) -> Self {
        Self { allocator }
    }
}
