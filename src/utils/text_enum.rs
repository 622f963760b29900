/// Declares an enum persisted as a `VARCHAR` column and exchanged as a JSON
/// string. Each variant is paired with its textual form.
#[macro_export]
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(format!("'{}' is not a valid {}", s, stringify!($name))),
                }
            }
        }

        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::std::result::Result<Self, ::sqlx::error::BoxDynError> {
                let text = <&str as ::sqlx::Decode<'r, ::sqlx::Postgres>>::decode(value)?;
                text.parse::<Self>().map_err(::sqlx::error::BoxDynError::from)
            }
        }

        impl<'q> ::sqlx::Encode<'q, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::sqlx::encode::IsNull {
                <&str as ::sqlx::Encode<'q, ::sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::text_enum! {
        enum Fruit {
            Apple => "apple",
            BloodOrange => "blood_orange",
        }
    }

    #[test]
    fn text_form_round_trips_through_from_str() {
        assert_eq!(Fruit::BloodOrange.to_string(), "blood_orange");
        assert_eq!("apple".parse::<Fruit>(), Ok(Fruit::Apple));
        assert_eq!(
            "pear".parse::<Fruit>(),
            Err(String::from("'pear' is not a valid Fruit"))
        );
    }

    #[test]
    fn serializes_as_its_text_form() {
        assert_eq!(
            serde_json::to_string(&Fruit::BloodOrange).unwrap(),
            "\"blood_orange\""
        );
        assert_eq!(
            serde_json::from_str::<Fruit>("\"apple\"").unwrap(),
            Fruit::Apple
        );
    }

    mod with_local_result_alias {
        #[derive(Debug)]
        pub enum Error {
            UnexpectedError,
        }

        #[allow(dead_code)]
        type Result<T> = std::result::Result<T, Error>;

        crate::text_enum! {
            pub enum Shade {
                Light => "light",
                Dark => "dark",
            }
        }

        pub fn first_shade(raw: &str) -> Result<Shade> {
            raw.parse::<Shade>().map_err(|_| Error::UnexpectedError)
        }
    }

    #[test]
    fn expands_next_to_a_module_result_alias() {
        use with_local_result_alias::{first_shade, Shade};

        assert_eq!(first_shade("dark").ok(), Some(Shade::Dark));
        assert!(first_shade("dim").is_err());
    }
}
