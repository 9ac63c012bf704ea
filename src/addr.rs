use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Deref;
use std::rc::{Rc, Weak};

/// Compares weak pointers by the address of their allocation, ignoring
/// vtable metadata.
pub struct WeakAddr<T: ?Sized> {
	ptr: Weak<T>,
}

impl<T: ?Sized> WeakAddr<T> {
	pub fn new(ptr: Weak<T>) -> Self {
		WeakAddr { ptr }
	}

	pub fn is_alive(&self) -> bool {
		self.ptr.strong_count() > 0
	}

	pub fn upgrade(&self) -> Option<Rc<T>> {
		self.ptr.upgrade()
	}

	fn addr(&self) -> *const () {
		self.ptr.as_ptr().cast::<()>()
	}
}

impl<T: ?Sized> Deref for WeakAddr<T> {
	type Target = Weak<T>;
	fn deref(&self) -> &Self::Target {
		&self.ptr
	}
}

impl<T: ?Sized> Clone for WeakAddr<T> {
	fn clone(&self) -> Self {
		WeakAddr {
			ptr: self.ptr.clone(),
		}
	}
}

impl<T: ?Sized> PartialEq for WeakAddr<T> {
	fn eq(&self, other: &Self) -> bool {
		Weak::ptr_eq(&self.ptr, &other.ptr)
	}
}

impl<T: ?Sized> Eq for WeakAddr<T> {}

impl<T: ?Sized> Ord for WeakAddr<T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.addr().cmp(&other.addr())
	}
}

impl<T: ?Sized> PartialOrd for WeakAddr<T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T: ?Sized> Debug for WeakAddr<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "WeakAddr({:p})", self.addr())
	}
}
