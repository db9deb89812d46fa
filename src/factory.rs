use alloc::boxed::Box;
use core::{
	any::type_name,
	fmt::{self, Debug, Formatter},
};

/// The default-value policy of an [`AttrDefault`](`crate::AttrDefault`).
///
/// The absent case is its own variant rather than an [`Option`] wrapper, so callers matching on
/// a policy handle all three shapes exhaustively.
pub enum Factory<K, V> {
	/// No default values; missing keys are reported to the caller.
	None,
	/// Produces default values without inspecting the missing key.
	Plain {
		/// Identity label rendered by [`Debug`].
		name: &'static str,
		/// The producer itself.
		produce: Box<dyn FnMut() -> V>,
	},
	/// Produces default values from the missing key.
	Keyed {
		/// Identity label rendered by [`Debug`].
		name: &'static str,
		/// The producer itself.
		produce: Box<dyn FnMut(&K) -> V>,
	},
}

impl<K, V> Factory<K, V> {
	/// Wraps a zero-argument producer, capturing its type name as identity label.
	pub fn plain<F>(produce: F) -> Self
	where
		F: 'static + FnMut() -> V,
	{
		Self::Plain {
			name: type_name::<F>(),
			produce: Box::new(produce),
		}
	}

	/// Wraps a producer that receives the missing key, capturing its type name as identity label.
	pub fn keyed<F>(produce: F) -> Self
	where
		F: 'static + FnMut(&K) -> V,
	{
		Self::Keyed {
			name: type_name::<F>(),
			produce: Box::new(produce),
		}
	}

	/// Whether this policy produces no default values.
	#[must_use]
	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	/// Whether the missing key is passed to the producer.
	#[must_use]
	pub fn passes_key(&self) -> bool {
		matches!(self, Self::Keyed { .. })
	}

	/// Produces a default value for `key`, iff this policy has a producer.
	pub fn produce(&mut self, key: &K) -> Option<V> {
		match self {
			Self::None => None,
			Self::Plain { produce, .. } => Some(produce()),
			Self::Keyed { produce, .. } => Some(produce(key)),
		}
	}
}

impl<K, V> Default for Factory<K, V> {
	fn default() -> Self {
		Self::None
	}
}

impl<K, V> Debug for Factory<K, V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => f.write_str("None"),
			Self::Plain { name, .. } | Self::Keyed { name, .. } => f.write_str(name),
		}
	}
}
