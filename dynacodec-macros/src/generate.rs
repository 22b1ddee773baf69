//! Code generation for `#[derive(PropertyHolder)]`.

use crate::parse::HolderDef;
use proc_macro2::TokenStream;
use quote::quote;

/// Generate the `PropertyHolder` implementation.
pub fn generate_holder_impl(holder: &HolderDef) -> TokenStream {
    let name = &holder.name;
    let (impl_generics, ty_generics, where_clause) = holder.generics.split_for_impl();

    let keys: Vec<&str> = holder
        .properties
        .iter()
        .map(|property| property.key.as_str())
        .collect();
    let fields: Vec<_> = holder
        .properties
        .iter()
        .map(|property| &property.field)
        .collect();

    quote! {
        impl #impl_generics ::dynacodec::property::PropertyHolder for #name #ty_generics #where_clause {
            fn properties(
                &self,
            ) -> ::std::vec::Vec<(&'static str, &dyn ::dynacodec::property::DynProperty)> {
                ::std::vec![
                    #( (#keys, &self.#fields as &dyn ::dynacodec::property::DynProperty) ),*
                ]
            }

            fn properties_mut(
                &mut self,
            ) -> ::std::vec::Vec<(&'static str, &mut dyn ::dynacodec::property::DynProperty)> {
                ::std::vec![
                    #( (#keys, &mut self.#fields as &mut dyn ::dynacodec::property::DynProperty) ),*
                ]
            }
        }
    }
}
