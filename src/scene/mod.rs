//! The decorative layers drawn around the fireworks.

use crate::canvas::Canvas;

pub mod banner;
pub mod cake;
pub mod font;
pub mod popup;
pub mod sky;

/// Something that animates once per tick and draws itself without changing
/// state.
pub trait Layer {
    fn update(&mut self) {}
    fn draw(&self, canvas: &mut dyn Canvas);
}
