use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::addr::WeakAddr;
use crate::Subscriber;

/// Subscribers interested in a single reactive property.
///
/// Subscribers are kept in registration order and each one is stored
/// at most once, no matter how many times it reads the property.
#[derive(Default)]
pub struct Dependencies {
	inner: RefCell<DependenciesInner>,
}

#[derive(Default)]
struct DependenciesInner {
	order: SmallVec<[WeakAddr<dyn Subscriber>; 4]>,
	members: BTreeSet<WeakAddr<dyn Subscriber>>,
}

impl DependenciesInner {
	fn prune(&mut self) {
		let members = &mut self.members;
		self.order.retain(|s| {
			let alive = s.is_alive();
			if !alive {
				members.remove(s);
			}
			alive
		});
	}
}

impl Dependencies {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `false` if the subscriber was already registered.
	pub fn add(&self, subscriber: Weak<dyn Subscriber>) -> bool {
		let subscriber = WeakAddr::new(subscriber);
		let mut inner = self.inner.borrow_mut();
		if !inner.members.insert(subscriber.clone()) {
			return false;
		}

		inner.order.push(subscriber);
		true
	}

	pub fn len(&self) -> usize {
		self.inner
			.borrow()
			.order
			.iter()
			.filter(|s| s.is_alive())
			.count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Updates every live subscriber in registration order and returns how
	/// many of them failed.
	///
	/// A failing subscriber is logged and skipped, the rest of the fan-out
	/// still runs.
	pub fn notify(&self) -> usize {
		let subscribers: SmallVec<[Rc<dyn Subscriber>; 4]> = {
			let mut inner = self.inner.borrow_mut();
			inner.prune();
			inner.order.iter().filter_map(|s| s.upgrade()).collect()
		};

		tracing::trace!(subscribers = subscribers.len(), "notify");

		let mut failed = 0;
		for subscriber in subscribers {
			if let Err(error) = subscriber.update() {
				failed += 1;
				tracing::error!(%error, "subscriber update failed");
			}
		}

		failed
	}
}
