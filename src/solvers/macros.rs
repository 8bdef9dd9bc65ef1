/// Declares a fieldless enum whose variants map one to one onto a native integer code
/// and a snake_case name.
///
/// The generated type gets `code`, `from_code`, `as_str`, `Display` and a `FromStr`
/// that fails with [`Error::UnknownSymbol`](crate::Error::UnknownSymbol).
macro_rules! native_codes {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($symbol:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $code:literal => $text:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in native code order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The integer the native engine uses for this value.
            pub const fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Looks up a native code. `None` when the code is not in the table.
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// The symbolic name, as accepted by `FromStr`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::Error::UnknownSymbol {
                        field: $symbol,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}
