//! Drawing context handed to widgets.

use kestrel_types::backend::DrawBackend;

/// Wraps the backend for one draw pass.
pub struct DrawContext<'a> {
    pub backend: &'a mut dyn DrawBackend,
}

impl<'a> DrawContext<'a> {
    pub fn new(backend: &'a mut dyn DrawBackend) -> Self {
        Self { backend }
    }
}
