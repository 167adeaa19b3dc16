//! Getter/setter binding between a reaction and a host property.

use core::fmt;

use crate::value::Animatable;

/// Reads and writes one host property.
///
/// Typical hosts capture `Rc<RefCell<_>>` state in both closures.
pub struct Target<T> {
    getter: Box<dyn Fn() -> T>,
    setter: Box<dyn FnMut(T)>,
}

impl<T: Animatable> Target<T> {
    pub fn new(getter: impl Fn() -> T + 'static, setter: impl FnMut(T) + 'static) -> Self {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        (self.getter)()
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        (self.setter)(value)
    }
}

impl<T> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Target { .. }")
    }
}
