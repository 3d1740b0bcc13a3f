//! Per-browser course progress. This state intentionally lives client-side
//! (local storage), so the tracker is a plain serializable container with
//! pure membership logic; the server never sees it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::domain::ContentNode;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTracker {
    /// course id -> ids of visited content nodes
    visited: HashMap<String, HashSet<String>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns the new state (true = now visited).
    pub fn toggle_visited(&mut self, course_id: &str, node_id: &str) -> bool {
        let entries = self.visited.entry(course_id.to_string()).or_default();
        if entries.remove(node_id) {
            false
        } else {
            entries.insert(node_id.to_string());
            true
        }
    }

    pub fn is_visited(&self, course_id: &str, node_id: &str) -> bool {
        self.visited
            .get(course_id)
            .map(|entries| entries.contains(node_id))
            .unwrap_or(false)
    }

    /// A main topic is complete when every sub-topic is visited, or, with
    /// no sub-topics, when the topic itself is.
    pub fn is_topic_complete(
        &self,
        course_id: &str,
        topic: &ContentNode,
        nodes: &[ContentNode],
    ) -> bool {
        let sub_topics: Vec<&ContentNode> = nodes
            .iter()
            .filter(|n| n.parent_id.as_deref() == Some(topic.id.as_str()))
            .collect();

        if sub_topics.is_empty() {
            self.is_visited(course_id, &topic.id)
        } else {
            sub_topics
                .iter()
                .all(|sub| self.is_visited(course_id, &sub.id))
        }
    }

    /// A course is complete when every main topic is complete. An empty
    /// course is not complete; there is nothing to certify.
    pub fn is_course_complete(&self, course_id: &str, nodes: &[ContentNode]) -> bool {
        let main_topics: Vec<&ContentNode> =
            nodes.iter().filter(|n| n.is_main_topic()).collect();

        !main_topics.is_empty()
            && main_topics
                .iter()
                .all(|topic| self.is_topic_complete(course_id, topic, nodes))
    }
}
