//! Parsing logic for `#[derive(PropertyHolder)]`.
//!
//! This module extracts the property fields of a struct and their options.

use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, Generics, Ident, LitStr, Meta, Result, Type,
};

/// Parsed holder definition.
#[derive(Debug)]
pub struct HolderDef {
    /// Struct name
    pub name: Ident,
    /// Struct generics
    pub generics: Generics,
    /// Property fields, in declaration order
    pub properties: Vec<PropertyDef>,
}

/// Parsed property field.
#[derive(Debug)]
pub struct PropertyDef {
    /// Field name
    pub field: Ident,
    /// Key the property is saved under
    pub key: String,
}

/// Options from `#[property(...)]` attributes on one field.
#[derive(Debug, Default)]
struct FieldOptions {
    marked: bool,
    skip: bool,
    rename: Option<String>,
}

/// Parse a derive input into a holder definition.
pub fn parse_holder(input: &DeriveInput) -> Result<HolderDef> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            &input.ident,
            "PropertyHolder can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new_spanned(
            &input.ident,
            "PropertyHolder requires a struct with named fields",
        ));
    };

    let mut properties: Vec<PropertyDef> = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let options = parse_options(&field.attrs)?;
        if options.skip || !(options.marked || is_property_type(&field.ty)) {
            continue;
        }

        let key = options.rename.unwrap_or_else(|| ident.unraw().to_string());
        if properties.iter().any(|property| property.key == key) {
            return Err(Error::new_spanned(
                ident,
                format!("duplicate property name '{key}'"),
            ));
        }
        properties.push(PropertyDef {
            field: ident.clone(),
            key,
        });
    }

    Ok(HolderDef {
        name: input.ident.clone(),
        generics: input.generics.clone(),
        properties,
    })
}

fn parse_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        options.marked = true;

        // A bare `#[property]` has no arguments to parse
        if !matches!(attr.meta, Meta::List(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported property option, expected `rename` or `skip`"))
            }
        })?;
    }
    Ok(options)
}

fn is_property_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => {
            path.qself.is_none()
                && path
                    .path
                    .segments
                    .last()
                    .is_some_and(|segment| segment.ident == "Property")
        }
        _ => false,
    }
}
