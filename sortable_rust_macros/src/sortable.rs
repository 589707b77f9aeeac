use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn derive_sortable(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // Extract #[sortable(collection = "...")] from struct-level attributes
    let collection = extract_collection(&input);

    // Extract the field marked with #[sortable(id)] or default to "id"
    let id_field = extract_marked_field(&input, "id", "id");

    // Extract the field marked with #[sortable(order)] or default to "sort_order"
    let order_field = extract_marked_field(&input, "order", "sort_order");

    // The serialized attribute name defaults to the order field's identifier,
    // overridable with #[sortable(attribute = "...")]
    let attribute =
        extract_string_arg(&input, "attribute").unwrap_or_else(|| order_field.to_string());

    let expanded = quote! {
        impl sortable_rust::Sortable for #name {
            const COLLECTION: &'static str = #collection;
            const ORDER_ATTRIBUTE: &'static str = #attribute;

            fn id(&self) -> &str {
                &self.#id_field
            }

            fn sort_order(&self) -> i64 {
                self.#order_field
            }

            fn set_sort_order(&mut self, order: i64) {
                self.#order_field = order;
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_collection(input: &DeriveInput) -> String {
    if let Some(collection) = extract_string_arg(input, "collection") {
        return collection;
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    format!("{}s", to_snake_case(&name))
}

fn extract_string_arg(input: &DeriveInput, arg: &str) -> Option<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("sortable") {
            continue;
        }

        let mut found = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(arg) {
                let value: LitStr = meta.value()?.parse()?;
                found = Some(value.value());
            } else if let Ok(value) = meta.value() {
                // Consume other name-value args so parsing continues past them.
                let _: LitStr = value.parse()?;
            }
            Ok(())
        });

        if found.is_some() {
            return found;
        }
    }

    None
}

fn extract_marked_field(input: &DeriveInput, marker: &str, default: &str) -> syn::Ident {
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields) = &data_struct.fields {
            for field in &fields.named {
                for attr in &field.attrs {
                    if attr.path().is_ident("sortable") {
                        let mut is_marked = false;
                        let _ = attr.parse_nested_meta(|meta| {
                            if meta.path.is_ident(marker) {
                                is_marked = true;
                            }
                            Ok(())
                        });
                        if is_marked {
                            return field.ident.clone().unwrap();
                        }
                    }
                }
            }

            // Default: look for a field with the expected name
            for field in &fields.named {
                if let Some(ident) = &field.ident {
                    if ident == default {
                        return ident.clone();
                    }
                }
            }
        }
    }

    panic!(
        "Sortable derive: no field marked with #[sortable({})] and no field named `{}`",
        marker, default
    );
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(ch.to_lowercase().next().unwrap());
        } else {
            result.push(ch);
        }
    }
    result
}
