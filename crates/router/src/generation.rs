use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic navigation counter; the newest generation owns the view.
#[derive(Debug, Default)]
pub(crate) struct NavigationClock {
	next: AtomicU64,
}

impl NavigationClock {
	/// Returns the next generation ID, starting at 1.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generations_increase() {
		let clock = NavigationClock::default();
		assert_eq!(clock.next(), 1);
		assert_eq!(clock.next(), 2);
		assert_eq!(clock.next(), 3);
	}
}
