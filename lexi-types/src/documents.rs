use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Documents stored per user in the document store. Field names follow the
// camelCase layout the browser client already reads and writes.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub word_term: String,
    pub definition: String,
    pub personal_note: String,
    pub tags: String,
    pub date_created: String,
    pub last_modified: String,
}

impl PersonalNote {
    /// Comma separated tags, trimmed, empties dropped
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FavoriteList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub words: Vec<String>,
    pub notes: String,
    pub date_created: String,
    pub last_modified: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SupportPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PreferredContact {
    #[default]
    Email,
    Phone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SupportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub subject: String,
    pub category: String,
    pub description: String,
    pub priority: SupportPriority,
    pub contact_email: String,
    pub contact_phone: String,
    pub preferred_contact: PreferredContact,
    pub order_number: String,
    pub product_name: String,
    pub attachment_url: String,
    pub timestamp: String,
}

impl SupportRequest {
    /// Names of required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.subject.trim().is_empty() {
            missing.push("subject");
        }
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.preferred_contact == PreferredContact::Phone && self.contact_phone.trim().is_empty()
        {
            missing.push("contactPhone");
        }
        missing
    }
}

/// The per-user settings document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub email: String,
    pub username: String,
    pub profile_picture: String,
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub notification_frequency: String,
    pub data_sharing: bool,
    pub preferred_language: String,
    pub secondary_languages: Vec<String>,
    pub theme: String,
    pub font_size: String,
    pub connected_accounts: Vec<String>,
    pub daily_learning_goal: u32,
    pub preferred_word_categories: Vec<String>,
    pub learning_reminders: bool,
    pub two_factor_auth: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email: String::new(),
            username: String::new(),
            profile_picture: String::new(),
            email_notifications: false,
            push_notifications: false,
            notification_frequency: "daily".to_string(),
            data_sharing: false,
            preferred_language: "english".to_string(),
            secondary_languages: Vec::new(),
            theme: "light".to_string(),
            font_size: "medium".to_string(),
            connected_accounts: Vec::new(),
            daily_learning_goal: 10,
            preferred_word_categories: Vec::new(),
            learning_reminders: false,
            two_factor_auth: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fill_defaults_for_missing_fields() {
        let settings: UserSettings =
            serde_json::from_str(r#"{"username": "lexi", "theme": "dark"}"#).unwrap();

        assert_eq!(settings.username, "lexi");
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.notification_frequency, "daily");
        assert_eq!(settings.daily_learning_goal, 10);
        assert_eq!(settings.font_size, "medium");
    }

    #[test]
    fn test_note_uses_camel_case_and_omits_missing_id() {
        let note = PersonalNote {
            title: "Latin roots".to_string(),
            word_term: "ephemeral".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["wordTerm"], "ephemeral");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_note_tag_list() {
        let note = PersonalNote {
            tags: "greek, latin,, adjectives ".to_string(),
            ..Default::default()
        };
        assert_eq!(note.tag_list(), vec!["greek", "latin", "adjectives"]);
    }

    #[test]
    fn test_support_request_required_fields() {
        let request: SupportRequest =
            serde_json::from_str(r#"{"subject": "Audio", "preferredContact": "phone"}"#).unwrap();

        assert_eq!(request.priority, SupportPriority::Medium);
        assert_eq!(
            request.missing_fields(),
            vec!["category", "description", "contactPhone"]
        );
    }
}
