//! Procedural macros for the `webcomponent` crate.
//!
//! The [`macro@web_component`] attribute turns a plain struct into a browser
//! custom element backed by WebAssembly: it generates the wasm-bindgen export
//! surface, the name metadata, and the registration entry points. The
//! [`macro@template_element`] attribute (behind the `template` feature) does
//! the same for `<template>` elements.
//!
//! Everything these macros emit calls back into the `webcomponent` runtime
//! crate, so they are not meant to be used on their own.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Expr, ItemStruct, Lit, LitStr, MetaNameValue, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

/// Parsed `name = "value"` parameters of the `#[web_component]` attribute.
#[derive(Debug, Default)]
struct ComponentArgs {
    class_name: Option<LitStr>,
    element_name: Option<LitStr>,
    observed_attrs: Option<LitStr>,
    observed_events: Option<LitStr>,
    base_class: Option<LitStr>,
    extends: Option<LitStr>,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;
        for pair in pairs {
            let value = string_value(&pair)?;
            if pair.path.is_ident("class_name") {
                args.class_name = Some(value);
            } else if pair.path.is_ident("element_name") {
                args.element_name = Some(value);
            } else if pair.path.is_ident("observed_attrs") {
                args.observed_attrs = Some(value);
            } else if pair.path.is_ident("observed_events") {
                args.observed_events = Some(value);
            } else if pair.path.is_ident("base_class") {
                args.base_class = Some(value);
            } else if pair.path.is_ident("extends") {
                args.extends = Some(value);
            } else {
                return Err(syn::Error::new_spanned(
                    &pair.path,
                    "unknown parameter; expected one of `class_name`, `element_name`, \
                     `observed_attrs`, `observed_events`, `base_class`, `extends`",
                ));
            }
        }
        Ok(args)
    }
}

fn string_value(pair: &MetaNameValue) -> syn::Result<LitStr> {
    if let Expr::Lit(expr) = &pair.value
        && let Lit::Str(lit) = &expr.lit
    {
        Ok(lit.clone())
    } else {
        Err(syn::Error::new_spanned(
            &pair.value,
            "expected a string literal",
        ))
    }
}

/// Turns a struct into a custom element definition.
///
/// The struct gains `#[wasm_bindgen]` together with `#[derive(Default, Debug)]`,
/// an implementation of `webcomponent::ElementSpec`, and the `*_impl` methods
/// the generated JavaScript shim class forwards its lifecycle callbacks to.
/// You implement `webcomponent::Lifecycle` for the struct to give the
/// callbacks behavior; every callback is optional.
///
/// Supported `name = "value"` parameters, all optional:
///
/// * `class_name = "MyElement"` — name of the generated JavaScript class.
///   Defaults to the struct identifier.
/// * `element_name = "my-element"` — the custom element tag. Defaults to the
///   class name converted to kebab-case. Must be a valid custom element name
///   (lowercase, containing a hyphen).
/// * `observed_attrs = "class, style"` — comma-separated attribute names to
///   observe for `attribute_changed` callbacks.
/// * `observed_events = "click, change"` — comma-separated DOM event types
///   routed to the `handle_event` callback.
/// * `base_class = "HTMLInputElement"` — the JavaScript class the element
///   extends. A non-default base class describes a customized built-in and
///   must be paired with `extends`.
/// * `extends = "input"` — the tag of the built-in element a customized
///   built-in extends. Must be paired with `base_class`; the pair is passed
///   to `customElements.define` as the `extends` option, and element
///   creation uses the built-in tag with the `is` option.
///
/// The expansion also provides `define()`, which registers the element with
/// the `CustomElementRegistry`, and `define_once()`, which does so exactly
/// once and logs instead of erroring on later calls.
///
/// # Example
///
/// ```ignore
/// use web_sys::{HtmlElement, Text};
/// use webcomponent::{Lifecycle, web_component};
///
/// #[web_component(element_name = "greeting-card", observed_attrs = "name")]
/// pub struct GreetingCard {}
///
/// impl Lifecycle for GreetingCard {
///     fn connected(&self, element: &HtmlElement) {
///         let node = Text::new().unwrap();
///         node.set_text_content(Some("hello"));
///         element.append_child(&node).unwrap();
///     }
/// }
///
/// pub fn register() {
///     GreetingCard::define_once();
/// }
/// ```
#[proc_macro_attribute]
pub fn web_component(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ComponentArgs);
    let item_struct = parse_macro_input!(item as ItemStruct);
    match expand_component(&args, &item_struct) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_component(
    args: &ComponentArgs,
    item_struct: &ItemStruct,
) -> syn::Result<proc_macro2::TokenStream> {
    if !item_struct.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_struct.generics,
            "#[web_component] does not support generic structs",
        ));
    }

    let name = &item_struct.ident;
    let class_name = args
        .class_name
        .as_ref()
        .map_or_else(|| name.to_string(), LitStr::value);
    let element_name = args
        .element_name
        .as_ref()
        .map_or_else(|| kebab_case(&class_name), LitStr::value);

    if !is_valid_element_name(&element_name) {
        let span = args
            .element_name
            .as_ref()
            .map_or_else(|| name.span(), LitStr::span);
        return Err(syn::Error::new(
            span,
            format!(
                "`{element_name}` is not a valid custom element name; it must start with a \
                 lowercase ASCII letter and contain a hyphen"
            ),
        ));
    }

    // A customized built-in needs both halves: the class for `extends` in the
    // shim source and the tag for the registration/creation options.
    match (&args.base_class, &args.extends) {
        (Some(base), None) => {
            return Err(syn::Error::new_spanned(
                base,
                "`base_class` describes a customized built-in and must be paired with \
                 the tag it extends, e.g. `extends = \"input\"`; without the \
                 registration option the element throws TypeError when constructed",
            ));
        }
        (None, Some(tag)) => {
            return Err(syn::Error::new_spanned(
                tag,
                "`extends` must be paired with `base_class` naming the built-in \
                 element's class, e.g. `base_class = \"HTMLInputElement\"`",
            ));
        }
        _ => {}
    }

    let observed_attrs = split_list(args.observed_attrs.as_ref());
    let observed_events = split_list(args.observed_events.as_ref());

    let attrs_setter = if observed_attrs.is_empty() {
        quote! {}
    } else {
        quote! { .observed_attributes([#(#observed_attrs),*]) }
    };
    let events_setter = if observed_events.is_empty() {
        quote! {}
    } else {
        quote! { .observed_events([#(#observed_events),*]) }
    };
    let base_setter = args.base_class.as_ref().map_or_else(
        || quote! {},
        |base| quote! { .base_class(#base) },
    );
    let extends_setter = args.extends.as_ref().map_or_else(
        || quote! {},
        |tag| quote! { .extends(#tag) },
    );
    let extends_impl = args.extends.as_ref().map_or_else(
        || quote! {},
        |tag| {
            quote! {
                fn extends() -> ::std::option::Option<&'static str> {
                    ::std::option::Option::Some(#tag)
                }
            }
        },
    );

    Ok(quote! {
        #[::wasm_bindgen::prelude::wasm_bindgen]
        #[derive(Default, Debug)]
        #item_struct

        impl ::webcomponent::ElementSpec for #name {
            fn element_name() -> &'static str {
                #element_name
            }

            fn class_name() -> &'static str {
                #class_name
            }

            #extends_impl
        }

        impl ::webcomponent::WebComponent for #name {}

        impl #name {
            #[doc = "The custom element tag this component registers under."]
            pub fn element_name() -> &'static str {
                <Self as ::webcomponent::ElementSpec>::element_name()
            }

            #[doc = "The name of the generated JavaScript class."]
            pub fn class_name() -> &'static str {
                <Self as ::webcomponent::ElementSpec>::class_name()
            }

            #[doc = "Registers this component with the custom element registry."]
            pub fn define() -> ::std::result::Result<
                ::webcomponent::ComponentHandle,
                ::webcomponent::ComponentError,
            > {
                let shim = ::webcomponent::ClassShim::new(
                    <Self as ::webcomponent::ElementSpec>::class_name(),
                    <Self as ::webcomponent::ElementSpec>::element_name(),
                )
                #base_setter
                #extends_setter
                #attrs_setter
                #events_setter;
                ::webcomponent::define::<Self>(&shim)
            }

            #[doc = "Registers this component exactly once. Later calls are noops."]
            pub fn define_once() {
                static DEFINED: ::std::sync::Once = ::std::sync::Once::new();
                DEFINED.call_once(|| {
                    if let Err(err) = Self::define() {
                        ::webcomponent::__report_define_error(
                            <Self as ::webcomponent::ElementSpec>::element_name(),
                            &err,
                        );
                    }
                });
            }
        }

        #[::wasm_bindgen::prelude::wasm_bindgen]
        impl #name {
            #[doc(hidden)]
            #[::wasm_bindgen::prelude::wasm_bindgen(constructor)]
            pub fn new() -> Self {
                <Self as ::webcomponent::ElementSpec>::new()
            }

            #[doc(hidden)]
            pub fn init_impl(&mut self, element: &::web_sys::HtmlElement) {
                use ::webcomponent::Lifecycle;
                self.init(element);
                self.init_mut(element);
            }

            #[doc(hidden)]
            pub fn connected_impl(&mut self, element: &::web_sys::HtmlElement) {
                use ::webcomponent::Lifecycle;
                self.connected(element);
                self.connected_mut(element);
            }

            #[doc(hidden)]
            pub fn disconnected_impl(&mut self, element: &::web_sys::HtmlElement) {
                use ::webcomponent::Lifecycle;
                self.disconnected(element);
                self.disconnected_mut(element);
            }

            #[doc(hidden)]
            pub fn adopted_impl(&mut self, element: &::web_sys::HtmlElement) {
                use ::webcomponent::Lifecycle;
                self.adopted(element);
                self.adopted_mut(element);
            }

            #[doc(hidden)]
            pub fn attribute_changed_impl(
                &mut self,
                element: &::web_sys::HtmlElement,
                name: ::std::string::String,
                old_value: ::std::option::Option<::std::string::String>,
                new_value: ::std::option::Option<::std::string::String>,
            ) {
                use ::webcomponent::Lifecycle;
                self.attribute_changed(element, &name, old_value.clone(), new_value.clone());
                self.attribute_changed_mut(element, &name, old_value, new_value);
            }

            #[doc(hidden)]
            pub fn handle_event_impl(
                &mut self,
                element: &::web_sys::HtmlElement,
                event: &::web_sys::Event,
            ) {
                use ::webcomponent::Lifecycle;
                self.handle_event(element, event);
                self.handle_event_mut(element, event);
            }
        }
    })
}

/// Turns a struct into an installable `<template>` element.
///
/// The struct must implement `webcomponent::RenderTemplate`. The expansion
/// provides `define_once()`, which renders the template and appends it to the
/// document body exactly once, and `id()`, which returns the id recorded at
/// installation time:
///
/// * `None` — the template has not been installed yet.
/// * `Some(&None)` — installed, no `id` attribute.
/// * `Some(&Some(id))` — installed with an `id` attribute.
#[cfg(feature = "template")]
#[proc_macro_attribute]
pub fn template_element(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let item_struct = parse_macro_input!(item as ItemStruct);
    let name = &item_struct.ident;

    let expanded = quote! {
        #item_struct

        impl ::webcomponent::TemplateElement for #name {}

        impl #name {
            fn template_id_cell() -> &'static ::std::sync::OnceLock<
                ::std::option::Option<::std::string::String>,
            > {
                static CELL: ::std::sync::OnceLock<
                    ::std::option::Option<::std::string::String>,
                > = ::std::sync::OnceLock::new();
                &CELL
            }

            #[doc = "Renders the template and appends it to the document body. \
                     The first call installs the template; later calls are noops \
                     returning the recorded id."]
            pub fn define_once() -> ::std::result::Result<
                &'static ::std::option::Option<::std::string::String>,
                ::webcomponent::ComponentError,
            > {
                let cell = Self::template_id_cell();
                if let ::std::option::Option::Some(id) = cell.get() {
                    return ::std::result::Result::Ok(id);
                }
                let id = ::webcomponent::install_template::<Self>()?;
                ::std::result::Result::Ok(cell.get_or_init(|| id))
            }

            #[doc = "The id recorded when the template was installed, or `None` \
                     if `define_once` has not run yet."]
            pub fn id() -> ::std::option::Option<
                &'static ::std::option::Option<::std::string::String>,
            > {
                Self::template_id_cell().get()
            }
        }
    };

    expanded.into()
}

/// Converts a JavaScript class name to a custom element tag (`MyElement`
/// becomes `my-element`, `HTMLCard` becomes `html-card`).
fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() {
            let prev_is_lower = i > 0 && !chars[i - 1].is_ascii_uppercase();
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if i > 0 && (prev_is_lower || next_is_lower) {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Splits a comma-separated attribute value into its entries.
fn split_list(value: Option<&LitStr>) -> Vec<String> {
    value
        .map(LitStr::value)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A conservative subset of the custom element name rules: lowercase ASCII
/// start, at least one hyphen, no uppercase characters.
fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase()
        && name.contains('-')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_splits_camel_words() {
        assert_eq!(kebab_case("MyElement"), "my-element");
        assert_eq!(kebab_case("AnElement"), "an-element");
        assert_eq!(kebab_case("HTMLCard"), "html-card");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
    }

    #[test]
    fn element_name_rules() {
        assert!(is_valid_element_name("my-element"));
        assert!(is_valid_element_name("x-a1.b_c"));
        assert!(!is_valid_element_name("widget"));
        assert!(!is_valid_element_name("My-Element"));
        assert!(!is_valid_element_name("-leading"));
        assert!(!is_valid_element_name(""));
    }

    #[test]
    fn split_list_trims_entries() {
        let lit = LitStr::new("class, style ,title", proc_macro2::Span::call_site());
        assert_eq!(split_list(Some(&lit)), ["class", "style", "title"]);
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn parses_component_args() {
        let args: ComponentArgs = syn::parse_str(
            r#"class_name = "MyElement", element_name = "my-element", observed_attrs = "class""#,
        )
        .expect("args should parse");
        assert_eq!(args.class_name.unwrap().value(), "MyElement");
        assert_eq!(args.element_name.unwrap().value(), "my-element");
        assert_eq!(args.observed_attrs.unwrap().value(), "class");
        assert!(args.observed_events.is_none());
        assert!(args.base_class.is_none());
    }

    #[test]
    fn base_class_requires_extends() {
        let args: ComponentArgs = syn::parse_str(
            r#"element_name = "fancy-input", base_class = "HTMLInputElement""#,
        )
        .expect("args should parse");
        let item: ItemStruct =
            syn::parse_str("pub struct FancyInput {}").expect("struct should parse");
        let err = expand_component(&args, &item)
            .expect_err("a base class without an extends tag should be rejected");
        assert!(err.to_string().contains("extends"));
    }

    #[test]
    fn extends_requires_base_class() {
        let args: ComponentArgs =
            syn::parse_str(r#"element_name = "fancy-input", extends = "input""#)
                .expect("args should parse");
        let item: ItemStruct =
            syn::parse_str("pub struct FancyInput {}").expect("struct should parse");
        let err = expand_component(&args, &item)
            .expect_err("an extends tag without a base class should be rejected");
        assert!(err.to_string().contains("base_class"));
    }

    #[test]
    fn rejects_unknown_parameters() {
        let err = syn::parse_str::<ComponentArgs>(r#"tag_name = "my-element""#)
            .expect_err("unknown keys should be rejected");
        assert!(err.to_string().contains("unknown parameter"));
    }

    #[test]
    fn rejects_non_string_values() {
        let err = syn::parse_str::<ComponentArgs>("class_name = 3")
            .expect_err("non-string values should be rejected");
        assert!(err.to_string().contains("string literal"));
    }
}
