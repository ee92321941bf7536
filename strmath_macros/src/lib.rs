use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, FnArg, GenericArgument, ItemFn, PatType, PathArguments, Type};

/// How a parameter consumes the positional argument list.
enum ArgKind {
    Required,
    Optional,
    Variadic,
}

fn formatted_arg_error_msg(arg_name: &str, arg_pos: usize, fn_name: &str) -> String {
    format!(
        "{}() argument {} ('{}') must be an integer, not a float",
        fn_name,
        arg_pos + 1,
        arg_name
    )
}

fn formatted_arity_msg(fn_name: &str, required: usize, total: usize, variadic: bool) -> String {
    let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };
    if variadic {
        format!("{}() takes at least {} {}", fn_name, required, plural(required))
    } else if required == total {
        format!("{}() takes exactly {} {}", fn_name, required, plural(required))
    } else {
        format!(
            "{}() takes from {} to {} arguments",
            fn_name, required, total
        )
    }
}

/// Splits `Option<T>` / `Vec<T>` into the wrapper kind and `T`.
fn classify_type(ty: &Type) -> (ArgKind, &Type) {
    if let Type::Path(type_path) = ty {
        let segment = type_path.path.segments.last().unwrap();
        let kind = match segment.ident.to_string().as_str() {
            "Option" => Some(ArgKind::Optional),
            "Vec" => Some(ArgKind::Variadic),
            _ => None,
        };
        if let (Some(kind), PathArguments::AngleBracketed(generics)) = (kind, &segment.arguments) {
            if let Some(GenericArgument::Type(inner)) = generics.args.first() {
                return (kind, inner);
            }
        }
    }
    (ArgKind::Required, ty)
}

/// Conversion of one `Number` value into the declared scalar type.
fn scalar_extraction(ty: &Type, value: TokenStream2, err_msg: &str) -> TokenStream2 {
    let type_ident = match ty {
        Type::Path(type_path) => type_path.path.segments.last().unwrap().ident.to_string(),
        _ => panic!("Unsupported argument type"),
    };
    match type_ident.as_str() {
        "f64" => quote! {
            match #value {
                Number::Int(n) => n as f64,
                Number::Float(v) => v,
            }
        },
        "i64" => quote! {
            match #value {
                Number::Int(n) => n,
                Number::Float(_) => return Err(#err_msg.to_string()),
            }
        },
        "Number" => quote! { #value },
        other => panic!("Unsupported type {}", other),
    }
}

/// Turns `fn name(x: f64, n: Option<i64>) -> Result<Number, String>` into
/// `fn name(args: &[Number]) -> Result<Number, String>` with the arity and
/// argument type checks generated from the signature.
///
/// Supported parameter types are `f64` (accepts ints and floats), `i64`
/// (ints only), `Number`, `Option<_>` for trailing optional parameters and a
/// final `Vec<_>` collecting the remaining arguments.
#[proc_macro_attribute]
pub fn strmath_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;
    let display_name = fn_name.to_string();

    let mut arg_extractions = Vec::new();
    let mut required = 0usize;
    let mut total = 0usize;
    let mut variadic = false;

    for (i, arg) in fn_args.iter().enumerate() {
        if let FnArg::Typed(PatType { pat, ty, .. }) = arg {
            let arg_name = match **pat {
                syn::Pat::Ident(ref ident) => &ident.ident,
                _ => panic!("Unsupported pattern"),
            };
            if variadic {
                panic!("A Vec parameter must be the last one");
            }

            let err_msg = formatted_arg_error_msg(&arg_name.to_string(), i, &display_name);

            let extract_code = match classify_type(ty) {
                (ArgKind::Required, ty) => {
                    if total != required {
                        panic!("Required parameters must precede optional ones");
                    }
                    required += 1;
                    total += 1;
                    let convert = scalar_extraction(ty, quote! { args[#i] }, &err_msg);
                    quote! {
                        let #arg_name = #convert;
                    }
                }
                (ArgKind::Optional, ty) => {
                    total += 1;
                    let convert = scalar_extraction(ty, quote! { *value }, &err_msg);
                    quote! {
                        let #arg_name = match args.get(#i) {
                            Some(value) => Some(#convert),
                            None => None,
                        };
                    }
                }
                (ArgKind::Variadic, ty) => {
                    variadic = true;
                    let convert = scalar_extraction(ty, quote! { *value }, &err_msg);
                    quote! {
                        let mut #arg_name = Vec::with_capacity(args.len().saturating_sub(#i));
                        for value in args.get(#i..).unwrap_or(&[]) {
                            #arg_name.push(#convert);
                        }
                    }
                }
            };

            arg_extractions.push(extract_code);
        }
    }

    let arity_msg = formatted_arity_msg(&display_name, required, total, variadic);
    let arity_check = if variadic && required == 0 {
        quote! { false }
    } else if variadic {
        quote! { given < #required }
    } else {
        quote! { given < #required || given > #total }
    };

    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[Number]) #fn_output {
            let given = args.len();
            if #arity_check {
                return Err(format!("{} ({} given)", #arity_msg, given));
            }

            #(#arg_extractions)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
