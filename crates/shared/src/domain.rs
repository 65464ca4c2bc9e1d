use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(CommandId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Voice,
    Gesture,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Gesture => "gesture",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "voice" => Some(Self::Voice),
            "gesture" => Some(Self::Gesture),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Success,
    Error,
    Pending,
}

impl CommandOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Pending => "pending",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// A closed-enumeration value as it arrived at the ingestion boundary.
///
/// Strict ingestion only ever produces `Known`. Lenient ingestion keeps the
/// raw text of values outside the enumeration so they can be shown with a
/// dedicated style instead of being folded into a real variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tagged<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: Copy> Tagged<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }
}

impl Tagged<CommandKind> {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl Tagged<CommandOutcome> {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(outcome) => outcome.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl<T> From<T> for Tagged<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

/// One historical voice or gesture interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub id: CommandId,
    pub kind: Tagged<CommandKind>,
    pub label: String,
    /// Already formatted for display; never parsed.
    pub occurred_at: String,
    pub outcome: Tagged<CommandOutcome>,
}

impl CommandEntry {
    pub fn new(
        id: impl Into<String>,
        kind: CommandKind,
        label: impl Into<String>,
        occurred_at: impl Into<String>,
        outcome: CommandOutcome,
    ) -> Self {
        Self {
            id: CommandId(id.into()),
            kind: Tagged::Known(kind),
            label: label.into(),
            occurred_at: occurred_at.into(),
            outcome: Tagged::Known(outcome),
        }
    }

    pub fn is_kind(&self, kind: CommandKind) -> bool {
        self.kind.known() == Some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestPolicy {
    #[default]
    Strict,
    Lenient,
}
