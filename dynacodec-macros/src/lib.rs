//! Procedural macros for dynacodec.
//!
//! This crate provides `#[derive(PropertyHolder)]`, which implements
//! `dynacodec::property::PropertyHolder` for a struct of properties.
//!
//! # Example
//!
//! ```ignore
//! use dynacodec::property::{Property, PropertyHolder};
//!
//! #[derive(PropertyHolder)]
//! struct Hopper {
//!     // Fields of type `Property<_>` are picked up automatically
//!     cooldown: Property<i32>,
//!
//!     // Saved under a different key
//!     #[property(rename = "CustomName")]
//!     name: Property<String>,
//!
//!     // Left out of the holder
//!     #[property(skip)]
//!     scratch: Property<i32>,
//!
//!     // Plain fields are ignored
//!     ticks: u64,
//! }
//! ```
//!
//! This will generate a `PropertyHolder` implementation listing `cooldown`
//! and `CustomName`, in declaration order.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generate;
mod parse;

/// Derives `PropertyHolder` for a struct with named fields.
///
/// # Field Selection
///
/// A field is listed when its type's last path segment is `Property`, or when
/// it carries a `#[property]` attribute (for type aliases of `Property`).
///
/// # Attributes
///
/// - `#[property(rename = "key")]`: save the field under `key` instead of its
///   name
/// - `#[property(skip)]`: leave the field out
///
/// Property names must be unique; a duplicate is a compile error.
#[proc_macro_derive(PropertyHolder, attributes(property))]
pub fn derive_property_holder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let holder = match parse::parse_holder(&input) {
        Ok(holder) => holder,
        Err(err) => return err.to_compile_error().into(),
    };

    TokenStream::from(generate::generate_holder_impl(&holder))
}
