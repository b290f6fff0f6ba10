use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// The shared, mutable exports container of one module
///
/// Every clone is a handle to the same underlying value; the value a
/// module populates during initialization is the value every consumer
/// reads, at whatever state it is in when they look. All resolutions of
/// one module id hand back handles for which `Exports::same` is true.
///
/// Borrows must be released before calling back into a resolver: a
/// dependency cycle that reads these exports while a mutable borrow is
/// still held panics at runtime.
pub struct Exports<E>(Rc<RefCell<E>>);

impl<E> Exports<E> {
    /// Wrap a starting value in a fresh container
    pub fn new(value: E) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrow the current value immutably
    pub fn borrow(&self) -> Ref<'_, E> {
        self.0.borrow()
    }

    /// Borrow the current value mutably
    pub fn borrow_mut(&self) -> RefMut<'_, E> {
        self.0.borrow_mut()
    }

    /// Check whether two handles refer to the same underlying container
    pub fn same(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<E> Clone for Exports<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E: Default> Default for Exports<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: fmt::Debug> fmt::Debug for Exports<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => f.debug_tuple("Exports").field(&*value).finish(),
            Err(_) => f.debug_tuple("Exports").field(&"<borrowed>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_value() {
        let a = Exports::new(vec![1]);
        let b = a.clone();

        b.borrow_mut().push(2);

        assert_eq!(*a.borrow(), vec![1, 2]);
        assert!(Exports::same(&a, &b));
    }

    #[test]
    fn test_distinct_containers_differ() {
        let a = Exports::new(0);
        let b = Exports::new(0);

        assert!(!Exports::same(&a, &b));
    }
}
