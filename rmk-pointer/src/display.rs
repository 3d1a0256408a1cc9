//! Status display hook.

/// A small text display the pointer task writes status labels to, e.g. the active speed curve
pub trait StatusDisplay {
    fn set_text(&mut self, slot: u8, text: &str);
}

/// Display that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopDisplay;

impl StatusDisplay for NoopDisplay {
    fn set_text(&mut self, _slot: u8, _text: &str) {}
}

impl<T: StatusDisplay> StatusDisplay for &mut T {
    fn set_text(&mut self, slot: u8, text: &str) {
        (**self).set_text(slot, text)
    }
}
