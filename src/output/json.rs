use serde_json::{Value, json};

use super::Preview;

#[must_use]
pub fn to_json(preview: &Preview) -> String {
    let commits: Vec<Value> = preview
        .commits
        .iter()
        .map(|c| {
            json!({
                "hash": c.hash,
                "date": c.date.to_rfc3339(),
                "message": c.message,
            })
        })
        .collect();
    json!({ "title": preview.title, "commits": commits }).to_string()
}
