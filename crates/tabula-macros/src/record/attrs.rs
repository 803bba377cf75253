//! Attribute parsing for the Record derive macro.
//!
//! This module provides parsers for the `#[column(...)]` field attributes
//! used by the `Record` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, LitStr, Meta, Result, Token,
};

const EXPECTED_TYPES: &str =
    "String, Number, Currency, Date, Datetime, Boolean, Collection";

/// The data type of a column field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Number,
    Currency,
    Date,
    Datetime,
    Boolean,
    Collection,
}

impl ColumnType {
    /// Parse a column type from its name, in either case.
    pub fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" => Ok(ColumnType::String),
            "Number" | "number" => Ok(ColumnType::Number),
            "Currency" | "currency" => Ok(ColumnType::Currency),
            "Date" | "date" => Ok(ColumnType::Date),
            "Datetime" | "DateTime" | "datetime" => Ok(ColumnType::Datetime),
            "Boolean" | "boolean" | "Bool" => Ok(ColumnType::Boolean),
            "Collection" | "collection" | "Tags" | "tags" => Ok(ColumnType::Collection),
            other => Err(Error::new(
                span,
                format!("unknown column type: '{other}'. Expected one of: {EXPECTED_TYPES}"),
            )),
        }
    }

    /// Parse a column type from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        ColumnType::from_name(&ident.to_string(), ident.span())
    }

    /// Name of the matching `tabula::DataType` variant.
    pub fn variant(self) -> &'static str {
        match self {
            ColumnType::String => "String",
            ColumnType::Number => "Number",
            ColumnType::Currency => "Currency",
            ColumnType::Date => "Date",
            ColumnType::Datetime => "Datetime",
            ColumnType::Boolean => "Boolean",
            ColumnType::Collection => "Collection",
        }
    }
}

/// Field-level attributes from `#[column(...)]`.
#[derive(Debug, Clone)]
pub struct ColumnAttr {
    /// The data type of this column.
    pub column_type: Option<ColumnType>,
    /// Leave this field out of the record.
    pub skip: bool,
    /// Custom accessor name (default: field name).
    pub rename: Option<String>,
    /// Display header.
    pub header: Option<String>,
    pub sortable: bool,
    pub filterable: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for ColumnAttr {
    fn default() -> Self {
        ColumnAttr {
            column_type: None,
            skip: false,
            rename: None,
            header: None,
            sortable: true,
            filterable: true,
            span: Span::call_site(),
        }
    }
}

fn string_value(expr: &Expr, key: &str) -> Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        _ => Err(Error::new(
            expr.span(),
            format!("{key} must be a string literal"),
        )),
    }
}

fn bool_value(expr: &Expr, key: &str) -> Result<bool> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Bool(b), ..
        }) => Ok(b.value),
        _ => Err(Error::new(expr.span(), format!("{key} must be true or false"))),
    }
}

impl Parse for ColumnAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ColumnAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // column(Number), column(skip), column(no_sort), ...
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("no_sort") {
                        attr.sortable = false;
                    } else if p.is_ident("no_filter") {
                        attr.filterable = false;
                    } else if let Some(ident) = p.get_ident() {
                        attr.column_type = Some(ColumnType::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            format!("expected column type ({EXPECTED_TYPES}) or skip"),
                        ));
                    }
                }

                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(string_value(&nv.value, "rename")?.value());
                    } else if nv.path.is_ident("header") {
                        attr.header = Some(string_value(&nv.value, "header")?.value());
                    } else if nv.path.is_ident("ty") {
                        let s = string_value(&nv.value, "ty")?;
                        attr.column_type = Some(ColumnType::from_name(&s.value(), s.span())?);
                        attr.span = s.span();
                    } else if nv.path.is_ident("sortable") {
                        attr.sortable = bool_value(&nv.value, "sortable")?;
                    } else if nv.path.is_ident("filterable") {
                        attr.filterable = bool_value(&nv.value, "filterable")?;
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename, header, ty, sortable or filterable",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown column attribute. Expected a column type, skip, no_sort, no_filter, or key = value",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[column(...)]` attributes from a field's attributes.
pub fn parse_column_attrs(attrs: &[Attribute]) -> Result<ColumnAttr> {
    for attr in attrs {
        if attr.path().is_ident("column") {
            return attr.parse_args::<ColumnAttr>();
        }
    }
    Ok(ColumnAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_column(tokens: &str) -> Result<ColumnAttr> {
        syn::parse_str::<ColumnAttr>(tokens)
    }

    #[test]
    fn test_column_string() {
        let attr = parse_column("String").unwrap();
        assert_eq!(attr.column_type, Some(ColumnType::String));
        assert!(!attr.skip);
        assert!(attr.sortable);
        assert!(attr.filterable);
    }

    #[test]
    fn test_column_lowercase_types() {
        assert_eq!(
            parse_column("currency").unwrap().column_type,
            Some(ColumnType::Currency)
        );
        assert_eq!(
            parse_column("datetime").unwrap().column_type,
            Some(ColumnType::Datetime)
        );
        assert_eq!(
            parse_column("collection").unwrap().column_type,
            Some(ColumnType::Collection)
        );
    }

    #[test]
    fn test_column_bool_alias() {
        // lowercase `bool` is a keyword
        let attr = parse_column("Bool").unwrap();
        assert_eq!(attr.column_type, Some(ColumnType::Boolean));
    }

    #[test]
    fn test_column_ty_literal() {
        let attr = parse_column(r#"ty = "date""#).unwrap();
        assert_eq!(attr.column_type, Some(ColumnType::Date));
    }

    #[test]
    fn test_column_skip() {
        let attr = parse_column("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.column_type, None);
    }

    #[test]
    fn test_column_rename_and_header() {
        let attr = parse_column(r#"Number, rename = "amount", header = "Amount ($)""#).unwrap();
        assert_eq!(attr.column_type, Some(ColumnType::Number));
        assert_eq!(attr.rename.as_deref(), Some("amount"));
        assert_eq!(attr.header.as_deref(), Some("Amount ($)"));
    }

    #[test]
    fn test_column_flags() {
        let attr = parse_column("String, no_sort, no_filter").unwrap();
        assert!(!attr.sortable);
        assert!(!attr.filterable);

        let attr = parse_column("String, sortable = false").unwrap();
        assert!(!attr.sortable);
        assert!(attr.filterable);
    }

    #[test]
    fn test_column_invalid_type() {
        let result = parse_column("Enum");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown column type"));
    }

    #[test]
    fn test_column_non_literal_rename() {
        assert!(parse_column("String, rename = name").is_err());
        assert!(parse_column("String, sortable = \"no\"").is_err());
    }

    #[test]
    fn test_column_variant_names() {
        assert_eq!(ColumnType::Datetime.variant(), "Datetime");
        assert_eq!(ColumnType::Boolean.variant(), "Boolean");
    }
}
