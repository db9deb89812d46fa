//! An insertion-ordered map with attribute-style accessors and factory-supplied default values.
//!
//! Reading a missing key through [`AttrDefault::attr`] or [`AttrDefault::item`] invokes the
//! configured [`Factory`], stores the produced value and returns it, so a read can mutate state.
//! Without a factory, the accessors fail with [`MissingAttribute`] and [`MissingKey`]
//! respectively and the map is left untouched.
//!
//! # Performance Focus
//!
//! Lookups scan the entries linearly. This implementation is optimised for relatively small
//! entry counts, like attribute-style records with a handful of fields; reach for a hashed or
//! tree-backed map where keys number in the thousands.
#![no_std]
#![doc(html_root_url = "https://docs.rs/attrdefault/0.0.1")]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::semicolon_if_nothing_returned)]

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
mod readme {}

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use alloc::vec::Vec;

mod attr_default;
mod factory;
pub mod iter;
#[cfg(feature = "serde")]
mod serde;

pub use attr_default::{AttrDefault, MissingAttribute, MissingKey};
pub use factory::Factory;

/// Insertion-ordered entry storage.
pub(crate) type Entries<K, V> = Vec<(K, V)>;
