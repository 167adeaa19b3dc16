//! Observer lists for lifecycle notifications.

use core::fmt;

/// An ordered list of observers invoked with an argument of type `A`.
pub struct Callback<A = ()> {
    observers: Vec<Box<dyn FnMut(A)>>,
}

impl<A: Copy> Callback<A> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer; observers run in registration order.
    pub fn add(&mut self, f: impl FnMut(A) + 'static) {
        self.observers.push(Box::new(f));
    }

    pub fn invoke(&mut self, arg: A) {
        for f in self.observers.iter_mut() {
            f(arg);
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<A: Copy> Default for Callback<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn observers_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut cb: Callback<u32> = Callback::new();
        let l1 = Rc::clone(&log);
        cb.add(move |v| l1.borrow_mut().push(("a", v)));
        let l2 = Rc::clone(&log);
        cb.add(move |v| l2.borrow_mut().push(("b", v)));
        cb.invoke(7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
        cb.clear();
        cb.invoke(8);
        assert_eq!(log.borrow().len(), 2);
    }
}
