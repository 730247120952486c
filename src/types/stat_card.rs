//! Dashboard statistic cards.

use serde::Serialize;
use utoipa::ToSchema;

/// Value shown on a card: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Text(String),
    Number(i64),
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Number(value)
    }
}

impl From<u64> for StatValue {
    fn from(value: u64) -> Self {
        StatValue::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<String> for StatValue {
    fn from(value: String) -> Self {
        StatValue::Text(value)
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

/// A single headline statistic.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatCard {
    #[schema(example = "Total Employees")]
    pub title: String,
    #[schema(value_type = Object, example = 42)]
    pub value: StatValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: impl Into<StatValue>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_card_without_description() {
        let json = serde_json::to_value(StatCard::new("Total Employees", 42_u64)).unwrap();

        assert_eq!(json["title"], "Total Employees");
        assert_eq!(json["value"], 42);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_text_card_with_description() {
        let card = StatCard::new("Top Department", "Engineering").with_description("by headcount");
        let json = serde_json::to_value(card).unwrap();

        assert_eq!(json["value"], "Engineering");
        assert_eq!(json["description"], "by headcount");
    }
}
