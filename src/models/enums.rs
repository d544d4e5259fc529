use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Urgency {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

str_enum!(DiagnosisStatus {
    Completed => "Completed",
    Critical => "Critical",
    Referred => "Referred",
    Pending => "Pending",
});

str_enum!(SchemeFilter {
    Government => "government",
    Insurance => "insurance",
});

impl Default for Urgency {
    fn default() -> Self {
        Self::Medium
    }
}

impl DiagnosisStatus {
    /// Status assigned at insert time. Referred/Pending are never produced here.
    pub fn from_urgency(urgency: Urgency) -> Self {
        match urgency {
            Urgency::High => Self::Critical,
            Urgency::Low | Urgency::Medium => Self::Completed,
        }
    }
}

impl SchemeFilter {
    /// Lenient parse for request input: unknown or blank values mean "no filter".
    pub fn from_request(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.trim().parse().ok())
    }
}
