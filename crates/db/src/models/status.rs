//! Status helper enums mapping to SMALLINT columns.
//!
//! Each enum variant's discriminant matches the value documented in the
//! migration that defines the column.

use serde::Serialize;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Map a database status ID back to the enum, if known.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Training lifecycle status.
    TrainingStatus {
        Scheduled = 1,
        Completed = 2,
        Cancelled = 3,
    }
}

define_status_enum! {
    /// Administrator decision on a registration.
    ///
    /// Replaces the legacy nullable boolean: `NULL` is `Pending`, `true` is
    /// `Approved`, `false` is `Rejected`.
    ConfirmationStatus {
        Pending = 1,
        Approved = 2,
        Rejected = 3,
    }
}
