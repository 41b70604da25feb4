use crate::utils::{derives_serde, ensure_required_fields, has_field_named};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Ident, Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[aggregate] 宏实现
/// - 追加字段：`id: IdType`, `version: usize`, `domain_events: DomainEvents`，并置于字段最前
/// - 自动实现 `::ddd_domain::aggregate::{Entity, Aggregate}`
/// - 支持参数：`#[aggregate(id = IdType)]`，默认 `String`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as AggregateAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[aggregate] only on struct")
                .to_compile_error()
                .into();
        }
    };

    let skip_serde = derives_serde(&st.attrs);

    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let had_events_field = has_field_named(&fields_named.named, "domain_events");

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });
    let version_ty: Type = syn::parse_quote! { usize };
    let events_ty: Type = syn::parse_quote! { ::ddd_domain::aggregate::DomainEvents };

    if let Err(err) = ensure_required_fields(
        fields_named,
        &[
            ("id", &id_type),
            ("version", &version_ty),
            ("domain_events", &events_ty),
        ],
        true,
    ) {
        return err.to_compile_error().into();
    }

    // 事件缓冲区不参与聚合的序列化
    if skip_serde && !had_events_field {
        if let Some(field) = fields_named
            .named
            .iter_mut()
            .find(|f| f.ident.as_ref().is_some_and(|i| i == "domain_events"))
        {
            field.attrs.push(syn::parse_quote!(#[serde(skip)]));
        }
    }

    let ident = &st.ident;
    let (impl_generics, ty_generics, where_clause) = st.generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::ddd_domain::aggregate::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn new(aggregate_id: Self::Id) -> Self {
                Self {
                    id: aggregate_id,
                    version: 0,
                    ..Default::default()
                }
            }

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn version(&self) -> usize {
                self.version
            }

            fn set_version(&mut self, version: usize) {
                self.version = version;
            }
        }

        impl #impl_generics ::ddd_domain::aggregate::Aggregate for #ident #ty_generics #where_clause {
            fn domain_events(&self) -> &::ddd_domain::aggregate::DomainEvents {
                &self.domain_events
            }

            fn domain_events_mut(&mut self) -> &mut ::ddd_domain::aggregate::DomainEvents {
                &mut self.domain_events
            }
        }
    };

    TokenStream::from(expanded)
}

// 解析 aggregate 宏键值参数：id = <Type>
struct AggregateAttrConfig {
    id_ty: Option<Type>,
}

impl Parse for AggregateAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut id_ty: Option<Type> = None;

        let pairs = Punctuated::<KvType, Token![,]>::parse_terminated(input)?;
        for kv in pairs {
            match kv.key.to_string().as_str() {
                "id" => {
                    if id_ty.is_some() {
                        return Err(syn::Error::new(
                            kv.key.span(),
                            "duplicate key 'id' in attribute",
                        ));
                    }
                    id_ty = Some(kv.ty);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key in attribute; expected 'id'",
                    ));
                }
            }
        }

        Ok(Self { id_ty })
    }
}

struct KvType {
    key: Ident,
    ty: Type,
}

impl Parse for KvType {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;
        input.parse::<Token![=]>()?;
        let ty: Type = input.parse()?;
        Ok(Self { key, ty })
    }
}
