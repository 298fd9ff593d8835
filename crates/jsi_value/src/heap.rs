//! Enforced heap-allocation wrapper.
//!
//! `Heap<T>`'s constructor is private to this crate; the only way to get
//! one is through a `Value` factory method (`Value::array`, `Value::object`,
//! ...), mirroring the teacher's `Heap<T>` Arc-enforcement design. The
//! interpreter is single-threaded (concurrency model), so this wraps `Rc`
//! rather than `Arc`.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Heap<T>(Rc<RefCell<T>>);

impl<T> Heap<T> {
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(RefCell::new(value)))
    }

    #[must_use]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[must_use]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Reference identity, used by `===`/`!==` on arrays and objects
    /// (spec: strict equality compares objects by identity).
    #[must_use]
    pub fn ptr_eq(&self, other: &Heap<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
