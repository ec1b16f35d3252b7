//! Turn backend record lists into short chat summaries.

use serde_json::Value;

/// How many records a summary lists before pointing at the dashboard.
pub const PREVIEW_LIMIT: usize = 3;

/// Render a JSON scalar for chat text. Strings come out unquoted.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Non-null field of a record, rendered for display.
pub fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Null => None,
        v => Some(display_value(v)),
    }
}

/// Name shown for a record: `name`, else `title`, else its 1-based position.
fn display_name(record: &Value, position: usize) -> String {
    field_text(record, "name")
        .or_else(|| field_text(record, "title"))
        .unwrap_or_else(|| format!("Item {}", position))
}

/// Summarise `records` as "Found N label:" plus the first few names.
pub fn summarize_records(records: &[Value], label: &str) -> String {
    if records.is_empty() {
        return format!("No {} data found.", label);
    }

    let mut message = format!("Found {} {}:\n\n", records.len(), label);
    for (i, record) in records.iter().take(PREVIEW_LIMIT).enumerate() {
        message.push_str(&format!("- {}\n", display_name(record, i + 1)));
    }

    if records.len() > PREVIEW_LIMIT {
        message.push_str(&format!(
            "\nAnd {} more {}. Check the dashboard for details.",
            records.len() - PREVIEW_LIMIT,
            label
        ));
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty() {
        assert_eq!(summarize_records(&[], "alerts"), "No alerts data found.");
    }

    #[test]
    fn test_short_list_has_no_trailer() {
        let records = vec![json!({"name": "Reuters"}), json!({"title": "Launch day"})];
        assert_eq!(
            summarize_records(&records, "journalists"),
            "Found 2 journalists:\n\n- Reuters\n- Launch day\n"
        );
    }

    #[test]
    fn test_truncates_to_three() {
        let records: Vec<Value> = (1..=5).map(|i| json!({"title": format!("Post {i}")})).collect();
        let message = summarize_records(&records, "posts");

        assert!(message.starts_with("Found 5 posts:"));
        assert_eq!(message.lines().filter(|l| l.starts_with("- ")).count(), 3);
        assert!(message.contains("- Post 3"));
        assert!(!message.contains("- Post 4"));
        assert!(message.ends_with("And 2 more posts. Check the dashboard for details."));
    }

    #[test]
    fn test_name_wins_over_title_then_position() {
        let records = vec![
            json!({"name": "Named", "title": "Titled"}),
            json!({"name": null, "title": "Fallback title"}),
            json!({"id": 7}),
        ];
        let message = summarize_records(&records, "items");
        assert!(message.contains("- Named\n"));
        assert!(message.contains("- Fallback title\n"));
        assert!(message.contains("- Item 3\n"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("positive")), "positive");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(true)), "true");
    }
}
