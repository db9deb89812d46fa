//! `serde` support: entries serialise as a map, in insertion order.
//!
//! The factory is not serialisable; a deserialised [`AttrDefault`] carries
//! [`Factory::None`](`crate::Factory::None`).

use core::{
	fmt::{self, Formatter},
	marker::PhantomData,
};

use serde::{
	de::{Deserialize, Deserializer, MapAccess, Visitor},
	ser::{Serialize, SerializeMap, Serializer},
};

use crate::AttrDefault;

impl<K: Serialize, V: Serialize> Serialize for AttrDefault<K, V> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (key, value) in self {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

struct EntriesVisitor<K, V>(PhantomData<AttrDefault<K, V>>);

impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
where
	K: Deserialize<'de> + Eq,
	V: Deserialize<'de>,
{
	type Value = AttrDefault<K, V>;

	fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("a map")
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
		let mut map = AttrDefault::new();
		while let Some((key, value)) = access.next_entry()? {
			map.insert(key, value);
		}
		Ok(map)
	}
}

impl<'de, K, V> Deserialize<'de> for AttrDefault<K, V>
where
	K: Deserialize<'de> + Eq,
	V: Deserialize<'de>,
{
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_map(EntriesVisitor(PhantomData))
	}
}
