//! Newtype IDs for type-safe entity references.
//!
//! The Tillpoint API identifies every entity with an opaque string id. Use
//! the `define_id!` macro to create type-safe wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use tillpoint_core::define_id;
/// define_id!(CompanyId);
/// define_id!(OutletId);
///
/// let company_id = CompanyId::new("C1");
/// let outlet_id = OutletId::new("O1");
///
/// // These are different types, so this won't compile:
/// // let _: CompanyId = outlet_id;
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
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the backend sent an empty id.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CompanyId);
define_id!(OutletId);
define_id!(CategoryId);
define_id!(CustomerId);
define_id!(SupplierId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_as_str() {
        let id = CompanyId::new("C1");
        assert_eq!(id.as_str(), "C1");
        assert_eq!(id.to_string(), "C1");
    }

    #[test]
    fn test_is_empty() {
        assert!(OutletId::new("").is_empty());
        assert!(!OutletId::new("O1").is_empty());
    }

    #[test]
    fn test_from_conversions() {
        let id: CustomerId = "cus_42".into();
        assert_eq!(id.as_str(), "cus_42");
        let raw: String = id.into();
        assert_eq!(raw, "cus_42");
    }

    #[test]
    fn test_serde_transparent() {
        let id = OutletId::new("O1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"O1\"");

        let parsed: OutletId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
