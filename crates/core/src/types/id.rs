//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! Catalog ids are normally integers, but persisted records written by other
//! clients may carry string ids. Both forms are accepted and written back in
//! the shape they were read.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Raw identifier: an integer or an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::Text(s) => f.pad(s),
        }
    }
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around [`IdValue`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`, `value()`
/// - `From<i64>`, `From<&str>`, `From<String>` and `FromStr` implementations
/// - `Display` honoring width and alignment
///
/// # Example
///
/// ```rust
/// # use beez_core::define_id;
/// define_id!(OrderId);
/// define_id!(InvoiceId);
///
/// let order_id = OrderId::new(1);
/// let invoice_id = InvoiceId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: OrderId = invoice_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($crate::types::id::IdValue);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self($crate::types::id::IdValue::Number(id))
            }

            /// The integer value, if this id is numeric.
            #[must_use]
            pub const fn as_i64(&self) -> Option<i64> {
                match self.0 {
                    $crate::types::id::IdValue::Number(n) => Some(n),
                    $crate::types::id::IdValue::Text(_) => None,
                }
            }

            /// The raw identifier.
            #[must_use]
            pub const fn value(&self) -> &$crate::types::id::IdValue {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::convert::Infallible;

            /// Integers parse as numeric ids; anything else is kept as text.
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let s = s.trim();
                Ok(s.parse::<i64>().map_or_else(|_| Self::from(s), Self::new))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self::new(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self($crate::types::id::IdValue::Text(id.to_owned()))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self($crate::types::id::IdValue::Text(id))
            }
        }
    };
}

// Catalog product identifier.
define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_str() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.as_i64(), Some(42));

        let id: ProductId = "a7".parse().unwrap();
        assert_eq!(id, ProductId::from("a7"));
        assert_eq!(id.as_i64(), None);
    }

    #[test]
    fn test_product_id_serde_keeps_shape() {
        let json = serde_json::to_string(&ProductId::new(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_i64(), Some(7));

        let parsed: ProductId = serde_json::from_str(r#""a7""#).unwrap();
        assert_eq!(parsed.value(), &IdValue::Text("a7".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""a7""#);
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("{:>4}|", ProductId::new(7)), "   7|");
        assert_eq!(format!("{:<4}|", ProductId::from("a7")), "a7  |");
    }
}
