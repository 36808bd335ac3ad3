//! Display-list seam for an external renderer
//!
//! The core never draws. It only tells the presentation side which entities
//! should currently be on screen: add on spawn, remove on disposal. An actual
//! renderer would pair each handle with a scene node; the headless build (and
//! the tests) just inspect the list.

/// Handle the renderer uses to pair a scene node with an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

/// The set of entities the renderer should currently draw
#[derive(Debug, Default)]
pub struct DisplayList {
    visible: Vec<RenderHandle>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity for drawing; duplicates are a frame-ordering bug
    pub fn add(&mut self, handle: RenderHandle) {
        debug_assert!(
            !self.visible.contains(&handle),
            "render handle added twice: {handle:?}"
        );
        self.visible.push(handle);
    }

    /// Drop an entity from the draw set
    pub fn remove(&mut self, handle: RenderHandle) {
        self.visible.retain(|h| *h != handle);
    }

    pub fn contains(&self, handle: RenderHandle) -> bool {
        self.visible.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}
