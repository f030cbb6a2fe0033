use serde::{Deserialize, Serialize};

/// Spending category of an expense.
///
/// The five presets are what a user picks from when adding an expense.
/// Files loaded from elsewhere may carry any other non-empty label, which is
/// kept verbatim as `Custom` so it survives a save/load round-trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    #[default]
    Food,
    Transport,
    Entertainment,
    Utilities,
    Other,
    Custom(CustomLabel),
}

/// Label of a non-preset category.
///
/// Only built by `Category::from_label`, so it is never blank and never
/// spells one of the presets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomLabel(String);

impl CustomLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Category {
    /// Preset categories, in the order they are offered for selection.
    pub const PRESETS: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
            Category::Custom(label) => label.as_str(),
        }
    }

    /// Map a stored label to a category. Matching is exact (case-sensitive);
    /// unknown labels become `Custom`. Blank labels are rejected.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.trim().is_empty() {
            return None;
        }
        let category = match label {
            "Food" => Category::Food,
            "Transport" => Category::Transport,
            "Entertainment" => Category::Entertainment,
            "Utilities" => Category::Utilities,
            "Other" => Category::Other,
            _ => Category::Custom(CustomLabel(label.to_string())),
        };
        Some(category)
    }

    /// Look up one of the preset categories, ignoring case.
    /// Used for interactive input, where only the presets are offered.
    pub fn from_preset(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(label) => label.0,
            preset => preset.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Category::from_label(&label).ok_or_else(|| "category label cannot be empty".to_string())
    }
}
