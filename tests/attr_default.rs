use std::{cell::Cell, collections::BTreeMap, rc::Rc};

use attrdefault::{AttrDefault, Factory, MissingAttribute, MissingKey};
use pretty_assertions::{assert_eq, assert_ne};
use wasm_bindgen_test::wasm_bindgen_test;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[test]
#[wasm_bindgen_test]
fn missing_keys_without_factory_fail() {
	let mut map = AttrDefault::<String, String>::new();

	assert_eq!(map.attr("foo"), Err(MissingAttribute));
	assert_eq!(map.item("foo"), Err(MissingKey));

	// Failed reads must not have stored anything.
	assert_eq!(map.len(), 0);
	assert_eq!(map, AttrDefault::new());
	assert_eq!(map, BTreeMap::new());
}

#[test]
#[wasm_bindgen_test]
fn plain_factory_resolves_and_stores() {
	let mut map = AttrDefault::with_factory(Factory::plain(Vec::<u8>::new));

	assert_eq!(map.attr("foo"), Ok(&mut vec![]));
	assert_eq!(map.item("bar"), Ok(&mut vec![]));
	assert_eq!(
		map,
		AttrDefault::from([("foo".to_string(), vec![]), ("bar".to_string(), vec![])]),
	);
}

#[test]
#[wasm_bindgen_test]
fn keyed_factory_receives_the_missing_key() {
	let mut map = AttrDefault::with_factory(Factory::keyed(|key: &String| key.repeat(2)));

	assert_eq!(map.attr("foo").unwrap(), "foofoo");
	assert_eq!(map.item("bar").unwrap(), "barbar");
	assert_eq!(
		map,
		AttrDefault::from([
			("foo".to_string(), "foofoo".to_string()),
			("bar".to_string(), "barbar".to_string()),
		]),
	);
}

#[test]
#[wasm_bindgen_test]
fn resolution_runs_the_factory_at_most_once_per_key() {
	let calls = Rc::new(Cell::new(0));
	let counted = Rc::clone(&calls);
	let mut map = AttrDefault::with_factory(Factory::plain(move || {
		counted.set(counted.get() + 1);
		0_u32
	}));

	assert_eq!(map.attr("hits"), Ok(&mut 0));
	assert_eq!(map.attr("hits"), Ok(&mut 0));
	assert_eq!(map.item("hits"), Ok(&mut 0));
	assert_eq!(calls.get(), 1);
}

#[test]
#[wasm_bindgen_test]
fn present_keys_are_never_overwritten_by_resolution() {
	let mut map = AttrDefault::with_entries(
		Factory::plain(|| unreachable!("the factory must not run for present keys")),
		[("present".to_string(), 1_u32)],
	);

	assert_eq!(map.attr("present"), Ok(&mut 1));
	assert_eq!(map.item("present"), Ok(&mut 1));
}

#[test]
#[wasm_bindgen_test]
fn writes_never_invoke_the_factory() {
	let mut map = AttrDefault::with_factory(Factory::plain(|| {
		unreachable!("the factory must not run for writes")
	}));

	assert_eq!(map.insert("a".to_string(), 1_u32), None);
	assert_eq!(map.insert("a".to_string(), 2), Some(1));
	assert_eq!(map.get("a"), Some(&2));
}

#[test]
#[wasm_bindgen_test]
fn iteration_follows_insertion_order() {
	let mut map = AttrDefault::new();
	map.insert("b", 2);
	map.insert("a", 1);
	map.insert("c", 3);
	// Overwriting keeps the original position.
	map.insert("a", 4);

	assert_eq!(map.keys().collect::<Vec<_>>(), [&"b", &"a", &"c"]);
	assert_eq!(map.values().collect::<Vec<_>>(), [&2, &4, &3]);

	map.remove("a");
	assert_eq!(map.iter().collect::<Vec<_>>(), [(&"b", &2), (&"c", &3)]);
	assert_eq!(map.iter().rev().collect::<Vec<_>>(), [(&"c", &3), (&"b", &2)]);
	assert_eq!(map.into_iter().collect::<Vec<_>>(), [("b", 2), ("c", 3)]);
}

#[test]
#[wasm_bindgen_test]
fn equality_ignores_factory_and_order() {
	let left = AttrDefault::with_entries(Factory::plain(|| 0), [(1, 10), (2, 20)]);
	let right = AttrDefault::from([(2, 20), (1, 10)]);
	assert_eq!(left, right);

	let plain: BTreeMap<_, _> = [(1, 10), (2, 20)].into();
	assert_eq!(left, plain);

	assert_ne!(right, AttrDefault::from([(1, 10)]));
}

#[test]
#[wasm_bindgen_test]
fn debug_renders_a_constructor_call() {
	let empty = AttrDefault::<String, u32>::new();
	assert_eq!(format!("{empty:?}"), "AttrDefault(None, false, {})");

	let plain = AttrDefault::<String, u32>::with_factory(Factory::plain(|| 0));
	let rendered = format!("{plain:?}");
	assert!(rendered.starts_with("AttrDefault("), "{rendered}");
	assert!(rendered.ends_with(", false, {})"), "{rendered}");

	let seeded = AttrDefault::with_entries(
		Factory::keyed(|key: &String| key.clone()),
		[("foo".to_string(), "bar".to_string())],
	);
	let rendered = format!("{seeded:?}");
	assert!(rendered.ends_with(", true, {\"foo\": \"bar\"})"), "{rendered}");
}

#[test]
#[wasm_bindgen_test]
fn index_reads_without_resolving() {
	let map = AttrDefault::from([("a", 1)]);
	assert_eq!(map["a"], 1);
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_panics_on_missing_keys() {
	let map = AttrDefault::<&str, u32>::new();
	let _ = map["missing"];
}

#[test]
#[wasm_bindgen_test]
fn replace_factory_swaps_the_policy() {
	let mut map = AttrDefault::<String, u32>::new();
	assert!(map.factory().is_none());
	assert_eq!(map.attr("a"), Err(MissingAttribute));

	let previous = map.replace_factory(Factory::plain(|| 7));
	assert!(previous.is_none());
	assert!(!map.factory().passes_key());
	assert_eq!(map.attr("a"), Ok(&mut 7));

	map.clear();
	assert!(map.is_empty());
	assert_eq!(map.item("b"), Ok(&mut 7));
}

#[test]
#[wasm_bindgen_test]
fn plain_reads_and_edits_leave_absent_keys_absent() {
	let mut map = AttrDefault::with_entries(Factory::plain(|| 0_u32), [("a".to_string(), 1)]);

	assert_eq!(map.get("b"), None);
	assert_eq!(map.get_mut("b"), None);
	assert!(!map.contains_key("b"));

	*map.get_mut("a").unwrap() += 1;
	for (_, value) in &mut map {
		*value += 1;
	}
	assert_eq!(map.get("a"), Some(&3));
	assert_eq!(map.len(), 1);
}
