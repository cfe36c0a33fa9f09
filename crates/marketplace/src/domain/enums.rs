use serde::{Deserialize, Serialize};
use sqlx::{
    Decode, Encode, Postgres, Type,
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Declares a closed set of string-valued states stored as TEXT columns and
/// exchanged as lowercase JSON strings.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let raw = <String as Decode<'r, Postgres>>::decode(value)?;
                Ok(raw.parse::<$name>()?)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
                <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

text_enum!(
    OrderStatus {
        Waiting => "waiting",
        Paid => "paid",
        Processing => "processing",
        Shipped => "shipped",
        Completed => "completed",
        Canceled => "canceled",
    }
);

text_enum!(
    PaymentStatus {
        Waiting => "waiting",
        Paid => "paid",
        Failed => "failed",
    }
);

text_enum!(
    AppointmentStatus {
        Waiting => "waiting",
        Confirmed => "confirmed",
        Completed => "completed",
        Canceled => "canceled",
    }
);

text_enum!(
    FishType {
        Fresh => "fresh",
        Frozen => "frozen",
        Processed => "processed",
        Live => "live",
    }
);

text_enum!(
    SellerType {
        Fisherman => "fisherman",
        Farmer => "farmer",
        Wholesale => "wholesale",
        Retail => "retail",
    }
);

text_enum!(
    MessageKind {
        Text => "text",
        Image => "image",
        Location => "location",
    }
);

text_enum!(
    NotificationKind {
        Order => "order",
        Payment => "payment",
        Appointment => "appointment",
        Chat => "chat",
        System => "system",
    }
);

text_enum!(
    SortDirection {
        Asc => "asc",
        Desc => "desc",
    }
);

impl SortDirection {
    pub const fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_the_same_text() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), *status);
        }
        assert_eq!(AppointmentStatus::Confirmed.to_string(), "confirmed");
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = "dibayar".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown OrderStatus: 'dibayar'");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&FishType::Frozen).unwrap();
        assert_eq!(json, "\"frozen\"");
        let kind: NotificationKind = serde_json::from_str("\"chat\"").unwrap();
        assert_eq!(kind, NotificationKind::Chat);
    }
}
