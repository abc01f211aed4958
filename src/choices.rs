//! Fixed choice lists for car attributes.
//!
//! Values are stored as their display label. Parsing is case-insensitive and always yields the
//! canonical spelling.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn parse(raw: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(raw))
            }

            pub fn labels() -> Vec<String> {
                Self::ALL.iter().map(|c| c.as_str().to_string()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(Brand {
    AstonMartin => "Aston Martin",
    Audi => "Audi",
    Bmw => "BMW",
    Bugatti => "Bugatti",
    Ferrari => "Ferrari",
    Ford => "Ford",
    Lamborghini => "Lamborghini",
    MercedesBenz => "Mercedes-Benz",
    Porsche => "Porsche",
    Tesla => "Tesla",
    Toyota => "Toyota",
    Volkswagen => "Volkswagen",
    Other => "Other",
});

choice_enum!(Category {
    Hyper => "Hyper",
    Super => "Super",
    Sports => "Sports",
    Sedan => "Sedan",
    Luxury => "Luxury",
    Coupe => "Coupe",
    Roadster => "Roadster",
    Hatchback => "Hatchback",
    Suv => "SUV",
    Other => "Other",
});

choice_enum!(Condition {
    New => "New",
    Used => "Used",
});

choice_enum!(Color {
    Black => "Black",
    White => "White",
    Red => "Red",
    Blue => "Blue",
    Silver => "Silver",
    Gray => "Gray",
    Green => "Green",
    Yellow => "Yellow",
    Orange => "Orange",
    Purple => "Purple",
    Brown => "Brown",
    Other => "Other",
});

choice_enum!(FuelType {
    Petrol => "Petrol",
    Diesel => "Diesel",
    Electric => "Electric",
    Hybrid => "Hybrid",
    Other => "Other",
});

choice_enum!(Drivetrain {
    Fwd => "FWD",
    Rwd => "RWD",
    Awd => "AWD",
    FourWd => "4WD",
    Other => "Other",
});

choice_enum!(Transmission {
    Automatic => "Automatic",
    Manual => "Manual",
    SemiAutomatic => "Semi-Automatic",
    Cvt => "CVT",
    Other => "Other",
});
