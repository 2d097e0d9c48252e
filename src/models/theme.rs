use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_id: i64,
    pub theme_name: String,
    pub variables: Option<String>, // JSON-encoded ThemeVariables
}

impl Theme {
    /// Decoded variables; a missing or malformed value yields `None`.
    pub fn decoded(&self) -> Option<serde_json::Map<String, serde_json::Value>> {
        self.variables
            .as_deref()
            .and_then(|v| serde_json::from_str(v).ok())
    }

    pub fn variable(&self, key: &str) -> Option<String> {
        self.decoded()?
            .get(key)
            .and_then(|v| v.as_str().map(str::to_string))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    pub primary_color: String,
    pub primary_font_color: String,
    pub secondary_color: String,
    pub secondary_font_color: String,
    pub primary_gradient_start_color: String,
    pub primary_gradient_end_color: String,
}

impl Default for ThemeVariables {
    fn default() -> Self {
        Self {
            primary_color: "#28A848".to_string(),
            primary_font_color: "#FFFFFF".to_string(),
            secondary_color: "#76BC21".to_string(),
            secondary_font_color: "#FFFFFF".to_string(),
            primary_gradient_start_color: "#28A848".to_string(),
            primary_gradient_end_color: "#06562C".to_string(),
        }
    }
}
