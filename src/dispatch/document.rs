use serde_json::Value;

use crate::core::SchemaVariant;

/// A normalized `Faktura` element known to follow one schema version.
pub trait FakturaDocument {
    const VARIANT: SchemaVariant;

    /// The normalized `Faktura` element.
    fn tree(&self) -> &Value;

    fn into_tree(self) -> Value;
}

macro_rules! faktura_document {
    ($(#[$meta:meta])* $name:ident => $variant:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Value);

        impl $name {
            /// Wrap a normalized `Faktura` element. The caller vouches for
            /// the version.
            pub fn new(tree: Value) -> Self {
                Self(tree)
            }
        }

        impl FakturaDocument for $name {
            const VARIANT: SchemaVariant = $variant;

            fn tree(&self) -> &Value {
                &self.0
            }

            fn into_tree(self) -> Value {
                self.0
            }
        }
    };
}

faktura_document! {
    /// `Faktura` element of an FA(1) invoice.
    Faktura1 => SchemaVariant::Fa1
}

faktura_document! {
    /// `Faktura` element of an FA(2) invoice.
    Faktura2 => SchemaVariant::Fa2
}

faktura_document! {
    /// `Faktura` element of an FA(3) invoice.
    Faktura3 => SchemaVariant::Fa3
}
