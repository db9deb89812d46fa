use alloc::{borrow::ToOwned, collections::BTreeMap};
use core::{
	borrow::Borrow,
	fmt::{self, Debug, Display, Formatter},
	mem, ops,
};
use tap::{Pipe, Tap};

use crate::{
	iter::{IntoIter, Iter, IterMut, Keys, Values},
	Entries, Factory,
};

/// An insertion-ordered map with attribute-style accessors and factory-supplied default values.
///
/// The two resolving accessors, [`attr`](`AttrDefault::attr`) and [`item`](`AttrDefault::item`),
/// are aliases of one underlying resolution routine and differ only in the error they report
/// when a key is absent and no [`Factory`] is configured.
pub struct AttrDefault<K, V> {
	factory: Factory<K, V>,
	entries: Entries<K, V>,
}

impl<K, V> Default for AttrDefault<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> AttrDefault<K, V> {
	/// Creates an empty [`AttrDefault`] without a default-value policy.
	#[must_use]
	pub fn new() -> Self {
		Self {
			factory: Factory::None,
			entries: Entries::new(),
		}
	}

	/// Creates an empty [`AttrDefault`] with the given default-value policy.
	#[must_use]
	pub fn with_factory(factory: Factory<K, V>) -> Self {
		Self {
			factory,
			entries: Entries::new(),
		}
	}

	/// Creates an [`AttrDefault`] with the given default-value policy and initial entries.
	///
	/// Entry order is preserved. A later pair with an already-seen key overwrites that value in
	/// place, keeping the earlier position.
	pub fn with_entries<I>(factory: Factory<K, V>, entries: I) -> Self
	where
		K: Eq,
		I: IntoIterator<Item = (K, V)>,
	{
		Self::with_factory(factory).tap_mut(|map| map.extend(entries))
	}

	/// The configured default-value policy.
	#[must_use]
	pub fn factory(&self) -> &Factory<K, V> {
		&self.factory
	}

	/// Replaces the default-value policy, returning the previous one.
	///
	/// Stored entries are unaffected.
	pub fn replace_factory(&mut self, factory: Factory<K, V>) -> Factory<K, V> {
		mem::replace(&mut self.factory, factory)
	}

	/// The number of stored entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no entries are stored.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes all entries, keeping the default-value policy.
	pub fn clear(&mut self) {
		self.entries.clear()
	}

	/// Retrieves a reference to the value associated with `key`, iff present.
	///
	/// This never invokes the factory.
	pub fn get<Q>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq,
	{
		self.entries
			.iter()
			.find_map(|(k, v)| if key == k.borrow() { Some(v) } else { None })
	}

	/// Retrieves a mutable reference to the value associated with `key`, iff present.
	///
	/// This never invokes the factory.
	pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq,
	{
		self.entries
			.iter_mut()
			.find_map(|(k, v)| if key == (&*k).borrow() { Some(v) } else { None })
	}

	/// Whether an entry for `key` is present.
	pub fn contains_key<Q>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq,
	{
		self.get(key).is_some()
	}

	/// Attribute-style read of `key`, resolving defaults.
	///
	/// A missing key is resolved through the factory: the produced value is stored under `key`
	/// and returned, so this read mutates the map. Present keys are returned as-is and never
	/// overwritten.
	///
	/// # Errors
	///
	/// [`MissingAttribute`], iff `key` is absent and no factory is configured. The map is left
	/// untouched in that case.
	///
	/// # Examples
	///
	/// ```
	/// use attrdefault::{AttrDefault, Factory};
	///
	/// let mut map = AttrDefault::with_factory(Factory::keyed(|key: &String| key.repeat(2)));
	/// assert_eq!(map.attr("foo").unwrap(), "foofoo");
	/// assert_eq!(map.get("foo").unwrap(), "foofoo");
	/// ```
	pub fn attr<Q>(&mut self, key: &Q) -> Result<&mut V, MissingAttribute>
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq + ToOwned<Owned = K>,
	{
		self.resolve(key).ok_or(MissingAttribute)
	}

	/// Subscript-style read of `key`, resolving defaults.
	///
	/// Identical to [`attr`](`AttrDefault::attr`) except for the reported error.
	///
	/// # Errors
	///
	/// [`MissingKey`], iff `key` is absent and no factory is configured. The map is left
	/// untouched in that case.
	pub fn item<Q>(&mut self, key: &Q) -> Result<&mut V, MissingKey>
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq + ToOwned<Owned = K>,
	{
		self.resolve(key).ok_or(MissingKey)
	}

	/// The resolution routine backing [`attr`](`AttrDefault::attr`) and
	/// [`item`](`AttrDefault::item`).
	fn resolve<Q>(&mut self, key: &Q) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq + ToOwned<Owned = K>,
	{
		match self.entries.iter().position(|(k, _)| key == k.borrow()) {
			Some(index) => Some(&mut self.entries[index].1),
			None if self.factory.is_none() => None,
			None => {
				// Insertion is a side effect of the read.
				let key = key.to_owned();
				let value = self.factory.produce(&key)?;
				self.entries.push((key, value));
				self.entries.last_mut().map(|(_, value)| value)
			}
		}
	}

	/// Stores `value` under `key`, returning the replaced value iff one was present.
	///
	/// Replacement happens in place, keeping the key's original position; a new key is appended.
	/// This never invokes the factory.
	pub fn insert(&mut self, key: K, value: V) -> Option<V>
	where
		K: Eq,
	{
		match self.entries.iter().position(|(k, _)| *k == key) {
			Some(index) => Some(mem::replace(&mut self.entries[index].1, value)),
			None => {
				self.entries.push((key, value));
				None
			}
		}
	}

	/// Removes the entry for `key`, returning its value iff one was present.
	///
	/// Later entries shift down, so insertion order stays meaningful.
	pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: ?Sized + Eq,
	{
		let index = self.entries.iter().position(|(k, _)| key == k.borrow())?;
		self.entries.remove(index).1.pipe(Some)
	}

	/// Visits entries in insertion order.
	pub fn iter(&self) -> Iter<'_, K, V> {
		Iter::new(&self.entries)
	}

	/// Visits entries in insertion order, with mutable values.
	pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
		IterMut::new(&mut self.entries)
	}

	/// Visits keys in insertion order.
	pub fn keys(&self) -> Keys<'_, K, V> {
		Keys::new(&self.entries)
	}

	/// Visits values in insertion order.
	pub fn values(&self) -> Values<'_, K, V> {
		Values::new(&self.entries)
	}
}

impl<K: Eq, V> Extend<(K, V)> for AttrDefault<K, V> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
		for (key, value) in pairs {
			self.insert(key, value);
		}
	}
}

impl<K: Eq, V> FromIterator<(K, V)> for AttrDefault<K, V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
		Self::with_entries(Factory::None, pairs)
	}
}

impl<K: Eq, V, const N: usize> From<[(K, V); N]> for AttrDefault<K, V> {
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

impl<'a, K, V> IntoIterator for &'a AttrDefault<K, V> {
	type Item = (&'a K, &'a V);
	type IntoIter = Iter<'a, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, K, V> IntoIterator for &'a mut AttrDefault<K, V> {
	type Item = (&'a K, &'a mut V);
	type IntoIter = IterMut<'a, K, V>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

impl<K, V> IntoIterator for AttrDefault<K, V> {
	type Item = (K, V);
	type IntoIter = IntoIter<K, V>;

	fn into_iter(self) -> Self::IntoIter {
		IntoIter::new(self.entries)
	}
}

/// Entries only; the factory and insertion order are not significant for equality.
impl<K: Eq, V: PartialEq> PartialEq for AttrDefault<K, V> {
	fn eq(&self, other: &Self) -> bool {
		self.entries.len() == other.entries.len()
			&& self
				.entries
				.iter()
				.all(|(key, value)| other.get(key) == Some(value))
	}
}

impl<K: Eq, V: Eq> Eq for AttrDefault<K, V> {}

/// Equality against a plain mapping, over entries only.
impl<K: Ord, V: PartialEq> PartialEq<BTreeMap<K, V>> for AttrDefault<K, V> {
	fn eq(&self, other: &BTreeMap<K, V>) -> bool {
		self.entries.len() == other.len()
			&& self
				.entries
				.iter()
				.all(|(key, value)| other.get(key) == Some(value))
	}
}

impl<K, V, Q> ops::Index<&Q> for AttrDefault<K, V>
where
	K: Borrow<Q>,
	Q: ?Sized + Eq,
{
	type Output = V;

	/// A non-resolving read, as the operator cannot mutate the map.
	///
	/// # Panics
	///
	/// Panics iff `key` is absent. The factory is not invoked; use
	/// [`attr`](`AttrDefault::attr`) or [`item`](`AttrDefault::item`) for default resolution.
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

/// Renders as a constructor call: the factory identity (or `None`), whether the missing key is
/// passed to it, and the entries in insertion order.
impl<K: Debug, V: Debug> Debug for AttrDefault<K, V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "AttrDefault({:?}, {}, ", self.factory, self.factory.passes_key())?;
		f.debug_map().entries(self.iter()).finish()?;
		f.write_str(")")
	}
}

/// The error of [`AttrDefault::attr`]: the key is absent and no factory is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingAttribute;

impl Display for MissingAttribute {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("no such attribute")
	}
}

#[cfg(feature = "std")]
impl std::error::Error for MissingAttribute {}

/// The error of [`AttrDefault::item`]: the key is absent and no factory is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingKey;

impl Display for MissingKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("no such key")
	}
}

#[cfg(feature = "std")]
impl std::error::Error for MissingKey {}
