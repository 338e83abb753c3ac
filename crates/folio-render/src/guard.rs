//! # Style Guard
//!
//! Scoped access to a surface's font and color state.
//!
//! ```text
//! StyleGuard::acquire(surface)      ← snapshot current style
//!      │
//!      ├── set_font / set_text_color / draw …
//!      │
//!      ├── early return via `?`      ┐
//!      └── end of scope              ┴─► Drop restores the snapshot
//! ```
//!
//! Layout code never pairs manual "set muted / reset base" calls; it opens a
//! guard, mutates freely, and lets the scope end.

use std::ops::{Deref, DerefMut};

use crate::surface::{DrawingSurface, TextStyle};

/// Exclusive access to a surface that restores its style on drop.
pub struct StyleGuard<'s, S: DrawingSurface + ?Sized> {
    surface: &'s mut S,
    saved: TextStyle,
}

impl<'s, S: DrawingSurface + ?Sized> StyleGuard<'s, S> {
    /// Snapshots the current style of `surface`.
    pub fn acquire(surface: &'s mut S) -> Self {
        let saved = surface.style();
        StyleGuard { surface, saved }
    }

    /// The style that will be restored.
    pub fn saved(&self) -> &TextStyle {
        &self.saved
    }
}

impl<S: DrawingSurface + ?Sized> Deref for StyleGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for StyleGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for StyleGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.apply_style(&self.saved);
    }
}
