//! CLI presentation: text and json formatters for the selection history.

use crate::error::{StateError, StorageError};
use crate::state::Stack;

pub fn format_stack_text(stack: &Stack) -> String {
    if stack.is_empty() {
        return "No selections yet.\n\nUse 'kcn .' to select the current context.".to_string();
    }
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["", "#", "Context", "Namespace"]);
    for (index, element) in stack.iter().enumerate() {
        let marker = if index == 0 { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            index.to_string(),
            element.context.clone(),
            element.namespace.clone(),
        ]);
    }
    table.to_string()
}

pub fn format_stack_json(stack: &Stack) -> Result<String, StateError> {
    let entries: Vec<_> = stack.iter().collect();
    let rendered = serde_json::to_string_pretty(&entries).map_err(StorageError::from)?;
    Ok(rendered)
}

pub fn format_stack(stack: &Stack, format: &str) -> Result<String, StateError> {
    match format {
        "text" => Ok(format_stack_text(stack)),
        "json" => format_stack_json(stack),
        other => Err(StateError::Config(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}
