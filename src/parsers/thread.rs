//! Active-branch reconstruction over the export's parent-pointer graph.
//!
//! Walks from the current leaf to the root following `parent` links, then reverses
//! so the thread reads oldest-first. Sibling branches are never visited.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::models::{DefectKind, Message, RawMessage, RawNode, UNKNOWN_ROLE};

/// Thread plus the per-message defects found while building it.
#[derive(Debug, Default)]
pub struct ReconstructedThread {
    pub messages: Vec<Message>,
    pub defects: Vec<DefectKind>,
}

/// Rebuild the active branch ending at `current_node`.
///
/// An absent or empty leaf id, or an empty mapping, yields an empty thread.
/// Traversal stops at a node with no parent, at a parent id missing from the
/// mapping, or at the first node seen twice.
pub fn reconstruct_thread(
    mapping: &HashMap<String, RawNode>,
    current_node: Option<&str>,
) -> ReconstructedThread {
    let mut result = ReconstructedThread::default();

    let Some(leaf_id) = current_node.filter(|id| !id.is_empty()) else {
        return result;
    };
    if mapping.is_empty() {
        return result;
    }
    if !mapping.contains_key(leaf_id) {
        result.defects.push(DefectKind::LeafNotInMapping { node_id: leaf_id.to_string() });
        return result;
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut cursor = Some(leaf_id);

    while let Some(node_id) = cursor {
        let Some((id, node)) = mapping.get_key_value(node_id) else {
            break;
        };
        if !visited.insert(id.as_str()) {
            debug!(node_id = %id, "Parent chain revisits node, stopping");
            result.defects.push(DefectKind::CycleDetected { node_id: id.clone() });
            break;
        }

        if let Some(value) = node.message.as_ref().filter(|v| !v.is_null()) {
            match message_from_value(id, value, &mut result.defects) {
                Some(message) => result.messages.push(message),
                None => debug!(node_id = %id, "Skipping unreadable message"),
            }
        }

        cursor = node.parent.as_deref();
    }

    result.messages.reverse();
    result
}

/// Convert one raw message, defaulting role/content where absent.
fn message_from_value(node_id: &str, value: &Value, defects: &mut Vec<DefectKind>) -> Option<Message> {
    let raw = match serde_json::from_value::<RawMessage>(value.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            defects.push(DefectKind::MessageSkipped {
                node_id: node_id.to_string(),
                reason: e.to_string(),
            });
            return None;
        }
    };

    let role = match raw.author.and_then(|a| a.role) {
        Some(role) => role,
        None => {
            defects.push(DefectKind::MissingRole { node_id: node_id.to_string() });
            UNKNOWN_ROLE.to_string()
        }
    };

    let content = match raw.content {
        Some(content) => match (content.parts, content.text) {
            (Some(parts), _) => join_parts(&parts),
            (None, Some(text)) => text,
            (None, None) => {
                defects.push(DefectKind::MissingContent { node_id: node_id.to_string() });
                String::new()
            }
        },
        None => {
            defects.push(DefectKind::MissingContent { node_id: node_id.to_string() });
            String::new()
        }
    };

    Some(Message { role, content })
}

/// Newline-join content parts.
///
/// Strings are taken verbatim, objects with a `text` field contribute that field,
/// anything else falls back to its JSON text.
pub fn join_parts(parts: &[Value]) -> String {
    let lines: Vec<String> = parts.iter().map(part_text).collect();
    lines.join("\n")
}

fn part_text(part: &Value) -> String {
    match part {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("text") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => part.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mapping_from(value: Value) -> HashMap<String, RawNode> {
        serde_json::from_value(value).unwrap()
    }

    fn roles_and_contents(thread: &ReconstructedThread) -> Vec<(&str, &str)> {
        thread.messages.iter().map(|m| (m.role.as_str(), m.content.as_str())).collect()
    }

    #[test]
    fn test_linear_chain_oldest_first() {
        let mapping = mapping_from(json!({
            "a": {"message": null, "parent": null},
            "b": {"message": {"author": {"role": "user"}, "content": {"parts": ["Hi"]}}, "parent": "a"},
            "c": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["Hello"]}}, "parent": "b"}
        }));

        let thread = reconstruct_thread(&mapping, Some("c"));

        assert_eq!(roles_and_contents(&thread), vec![("user", "Hi"), ("assistant", "Hello")]);
        assert!(thread.defects.is_empty());
    }

    #[test]
    fn test_sibling_branch_not_visited() {
        let mapping = mapping_from(json!({
            "root": {"parent": null},
            "q": {"message": {"author": {"role": "user"}, "content": {"parts": ["Q"]}}, "parent": "root"},
            "old": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["first try"]}}, "parent": "q"},
            "new": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["second try"]}}, "parent": "q"}
        }));

        let thread = reconstruct_thread(&mapping, Some("new"));

        assert_eq!(roles_and_contents(&thread), vec![("user", "Q"), ("assistant", "second try")]);
    }

    #[test]
    fn test_absent_leaf_yields_empty_thread() {
        let mapping = mapping_from(json!({"a": {"parent": null}}));
        let thread = reconstruct_thread(&mapping, None);
        assert!(thread.messages.is_empty());
        assert!(thread.defects.is_empty());
    }

    #[test]
    fn test_empty_leaf_id_treated_as_absent() {
        let mapping = mapping_from(json!({"a": {"parent": null}}));
        let thread = reconstruct_thread(&mapping, Some(""));
        assert!(thread.messages.is_empty());
        assert!(thread.defects.is_empty());
    }

    #[test]
    fn test_empty_mapping_yields_empty_thread() {
        let thread = reconstruct_thread(&HashMap::new(), Some("c"));
        assert!(thread.messages.is_empty());
        assert!(thread.defects.is_empty());
    }

    #[test]
    fn test_leaf_missing_from_mapping() {
        let mapping = mapping_from(json!({"a": {"parent": null}}));
        let thread = reconstruct_thread(&mapping, Some("zzz"));
        assert!(thread.messages.is_empty());
        assert_eq!(thread.defects, vec![DefectKind::LeafNotInMapping { node_id: "zzz".to_string() }]);
    }

    #[test]
    fn test_dangling_parent_terminates() {
        let mapping = mapping_from(json!({
            "b": {"message": {"author": {"role": "user"}, "content": {"parts": ["orphan"]}}, "parent": "gone"}
        }));

        let thread = reconstruct_thread(&mapping, Some("b"));

        assert_eq!(roles_and_contents(&thread), vec![("user", "orphan")]);
        assert!(thread.defects.is_empty());
    }

    #[test]
    fn test_cycle_is_stopped() {
        let mapping = mapping_from(json!({
            "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["one"]}}, "parent": "b"},
            "b": {"message": {"author": {"role": "assistant"}, "content": {"parts": ["two"]}}, "parent": "a"}
        }));

        let thread = reconstruct_thread(&mapping, Some("b"));

        assert_eq!(roles_and_contents(&thread), vec![("user", "one"), ("assistant", "two")]);
        assert_eq!(thread.defects, vec![DefectKind::CycleDetected { node_id: "b".to_string() }]);
    }

    #[test]
    fn test_self_parent_is_stopped() {
        let mapping = mapping_from(json!({
            "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["loop"]}}, "parent": "a"}
        }));

        let thread = reconstruct_thread(&mapping, Some("a"));

        assert_eq!(thread.messages.len(), 1);
        assert_eq!(thread.defects.len(), 1);
    }

    #[test]
    fn test_missing_role_uses_placeholder() {
        let mapping = mapping_from(json!({
            "a": {"message": {"content": {"parts": ["who said this"]}}, "parent": null}
        }));

        let thread = reconstruct_thread(&mapping, Some("a"));

        assert_eq!(roles_and_contents(&thread), vec![(UNKNOWN_ROLE, "who said this")]);
        assert_eq!(thread.defects, vec![DefectKind::MissingRole { node_id: "a".to_string() }]);
    }

    #[test]
    fn test_missing_parts_uses_empty_content() {
        let mapping = mapping_from(json!({
            "a": {"message": {"author": {"role": "tool"}, "content": {"content_type": "image"}}, "parent": null}
        }));

        let thread = reconstruct_thread(&mapping, Some("a"));

        assert_eq!(roles_and_contents(&thread), vec![("tool", "")]);
        assert_eq!(thread.defects, vec![DefectKind::MissingContent { node_id: "a".to_string() }]);
    }

    #[test]
    fn test_text_content_without_parts() {
        let mapping = mapping_from(json!({
            "a": {"message": {"author": {"role": "assistant"}, "content": {"content_type": "code", "text": "print(1)"}}, "parent": null}
        }));

        let thread = reconstruct_thread(&mapping, Some("a"));

        assert_eq!(roles_and_contents(&thread), vec![("assistant", "print(1)")]);
        assert!(thread.defects.is_empty());
    }

    #[test]
    fn test_mistyped_author_and_content_use_defaults() {
        let mapping = mapping_from(json!({
            "a": {"message": {"author": "user", "content": {"parts": ["kept text"]}}, "parent": null},
            "b": {"message": {"author": {"role": "assistant"}, "content": "flat string"}, "parent": "a"},
            "c": {"message": {"author": {"role": "user"}, "content": {"parts": "not a list", "text": "fallback"}}, "parent": "b"}
        }));

        let thread = reconstruct_thread(&mapping, Some("c"));

        assert_eq!(
            roles_and_contents(&thread),
            vec![(UNKNOWN_ROLE, "kept text"), ("assistant", ""), ("user", "fallback")]
        );
        assert_eq!(
            thread.defects,
            vec![
                DefectKind::MissingContent { node_id: "b".to_string() },
                DefectKind::MissingRole { node_id: "a".to_string() },
            ]
        );
    }

    #[test]
    fn test_non_object_message_is_skipped() {
        let mapping = mapping_from(json!({
            "a": {"message": {"author": {"role": "user"}, "content": {"parts": ["kept"]}}, "parent": null},
            "b": {"message": "garbage", "parent": "a"}
        }));

        let thread = reconstruct_thread(&mapping, Some("b"));

        assert_eq!(roles_and_contents(&thread), vec![("user", "kept")]);
        assert_eq!(thread.defects.len(), 1);
        assert!(matches!(thread.defects[0], DefectKind::MessageSkipped { .. }));
    }

    #[test]
    fn test_join_parts_mixed() {
        let parts = vec![json!({"text": "part1"}), json!("part2")];
        assert_eq!(join_parts(&parts), "part1\npart2");
    }

    #[test]
    fn test_join_parts_fallback_representation() {
        let parts = vec![json!({"asset_pointer": "file://x"}), json!(3), json!(null)];
        assert_eq!(join_parts(&parts), "{\"asset_pointer\":\"file://x\"}\n3\nnull");
    }

    #[test]
    fn test_join_parts_empty() {
        assert_eq!(join_parts(&[]), "");
    }
}
