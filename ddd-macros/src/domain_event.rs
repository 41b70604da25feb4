use crate::utils::{apply_derives, ensure_required_fields};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Meta, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Domain,
    Integration,
}

/// #[domain_event] / #[integration_event] 宏实现
/// - 仅支持具名字段结构体
/// - 确保存在字段：`meta: EventMeta`（缺失时追加在最前）
/// - 生成 `EVENT_TYPE`、`new(..)` 与对应的 trait 实现
pub(crate) fn expand(kind: EventKind, attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as EventAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "event macros can only be used on structs")
                .to_compile_error()
                .into();
        }
    };

    if kind == EventKind::Integration && cfg.integration {
        return syn::Error::new(
            st.ident.span(),
            "'integration' is only valid on #[domain_event]",
        )
        .to_compile_error()
        .into();
    }

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(
                st.span(),
                "event macros support only named-field structs, e.g., struct X { a: T }",
            )
            .to_compile_error()
            .into();
        }
    };

    let meta_ty: syn::Type = syn::parse_quote! { ::ddd_domain::domain_event::EventMeta };
    if let Err(err) = ensure_required_fields(fields_named, &[("meta", &meta_ty)], false) {
        return err.to_compile_error().into();
    }

    // 构造器参数：除 meta 外的全部字段，按声明顺序
    let (arg_names, arg_types): (Vec<_>, Vec<_>) = fields_named
        .named
        .iter()
        .filter(|f| f.ident.as_ref().is_some_and(|i| i != "meta"))
        .map(|f| (f.ident.clone(), f.ty.clone()))
        .unzip();

    let required: Vec<syn::Path> = vec![
        syn::parse_quote!(Debug),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let vis = &st.vis;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let event_type = match (&cfg.event_type, kind) {
        (Some(lit), _) => quote! { #lit },
        (None, EventKind::Domain) => {
            quote! { ::core::concat!(::core::module_path!(), "::", #name) }
        }
        (None, EventKind::Integration) => quote! { #name },
    };

    let capability = match kind {
        EventKind::Domain => {
            let integration = cfg.integration;
            let marker = integration.then(|| {
                quote! {
                    impl #impl_generics ::ddd_domain::domain_event::HasIntegrationEvent
                        for #ident #ty_generics #where_clause {}
                }
            });
            let wrap = integration.then(|| {
                quote! {
                    fn into_integration_event(
                        self: ::std::sync::Arc<Self>,
                    ) -> ::core::option::Option<
                        ::std::sync::Arc<dyn ::ddd_domain::integration_event::IntegrationEvent>,
                    > {
                        ::core::option::Option::Some(::std::sync::Arc::new(
                            ::ddd_domain::integration_event::IntegrationEventWrapper::new(self),
                        ))
                    }
                }
            });
            quote! {
                impl #impl_generics ::ddd_domain::domain_event::DomainEvent for #ident #ty_generics #where_clause {
                    fn has_integration_event(&self) -> bool {
                        #integration
                    }

                    #wrap
                }

                #marker
            }
        }
        EventKind::Integration => quote! {
            impl #impl_generics ::ddd_domain::integration_event::IntegrationEvent for #ident #ty_generics #where_clause {
                fn to_payload(&self) -> ::ddd_domain::error::DomainResult<::ddd_domain::integration_event::Payload> {
                    ::ddd_domain::integration_event::to_payload(self)
                }
            }
        },
    };

    let out = quote! {
        #st

        impl #impl_generics #ident #ty_generics #where_clause {
            #vis const EVENT_TYPE: &'static str = #event_type;

            #vis fn new(#( #arg_names: #arg_types ),*) -> Self {
                Self {
                    meta: ::ddd_domain::domain_event::EventMeta::new(),
                    #( #arg_names ),*
                }
            }
        }

        impl #impl_generics ::ddd_domain::domain_event::Event for #ident #ty_generics #where_clause {
            fn event_id(&self) -> ::ddd_domain::domain_event::EventId {
                self.meta.event_id()
            }

            fn occurred_at(&self) -> ::ddd_domain::domain_event::Timestamp {
                self.meta.occurred_at()
            }

            fn event_type(&self) -> &str {
                Self::EVENT_TYPE
            }
        }

        #capability
    };

    TokenStream::from(out)
}

// 解析宏参数：event_type = "..."、integration
struct EventAttrConfig {
    event_type: Option<syn::LitStr>,
    integration: bool,
}

impl Parse for EventAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut event_type: Option<syn::LitStr> = None;
        let mut integration = false;

        let items = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;
        for item in items {
            match &item {
                Meta::NameValue(nv) if nv.path.is_ident("event_type") => {
                    if event_type.is_some() {
                        return Err(syn::Error::new(
                            nv.path.span(),
                            "duplicate key 'event_type' in attribute",
                        ));
                    }
                    match &nv.value {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(lit),
                            ..
                        }) => event_type = Some(lit.clone()),
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected string literal for 'event_type'",
                            ));
                        }
                    }
                }
                Meta::Path(p) if p.is_ident("integration") => {
                    if integration {
                        return Err(syn::Error::new(
                            p.span(),
                            "duplicate flag 'integration' in attribute",
                        ));
                    }
                    integration = true;
                }
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "unknown key; expected 'event_type' | 'integration'",
                    ));
                }
            }
        }

        Ok(Self {
            event_type,
            integration,
        })
    }
}
