//! Helper macro generating driven-port error enums.
//!
//! Every variant carries a single `message` describing what the adapter
//! observed. The macro derives `thiserror::Error`, prefixes each display
//! string with the variant's label and adds a snake_case constructor per
//! variant that accepts anything convertible into `String`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error("{label}: {message}", label = $label)]
                $variant {
                    /// Adapter-supplied detail.
                    message: String,
                },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )*

            /// Detail recorded by the adapter.
            pub fn message(&self) -> &str {
                match self {
                    $( Self::$variant { message } => message.as_str(), )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;
