use serde::{Deserialize, Deserializer, Serialize};

/// The categorical rescue intent chosen in the view.
///
/// Parsing is total: any value outside the known set becomes [`Selector::Reset`],
/// so a malformed selector simply shows every record. Values are compared
/// exactly, without trimming or case folding.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Water,
    Mountain,
    Disaster,
    #[default]
    Reset,
}

impl Selector {
    pub const ALL: [Selector; 4] = [
        Selector::Water,
        Selector::Mountain,
        Selector::Disaster,
        Selector::Reset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Mountain => "mountain",
            Self::Disaster => "disaster",
            Self::Reset => "reset",
        }
    }

    /// Label shown next to the radio option.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Water => "Water Rescue",
            Self::Mountain => "Mountain or Wilderness Rescue",
            Self::Disaster => "Disaster Rescue or Individual Tracking",
            Self::Reset => "Reset",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "water" => Self::Water,
            "mountain" => Self::Mountain,
            "disaster" => Self::Disaster,
            _ => Self::Reset,
        }
    }
}

/// Accepts any JSON value; non-strings (including `null`) become `Reset`.
impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Selector::parse).unwrap_or_default())
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the selector radio group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: Selector,
    pub label: String,
}

impl From<Selector> for SelectorOption {
    fn from(selector: Selector) -> Self {
        Self {
            value: selector,
            label: selector.label().to_string(),
        }
    }
}
