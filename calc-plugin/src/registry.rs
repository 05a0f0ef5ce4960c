//! Plugin Registry

use crate::{CommandPlugin, OperationMeta, OperationPlugin};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Central plugin registry.
///
/// Operations and commands live in separate namespaces. Names are stored
/// lower-cased; registering an existing name replaces the previous plugin.
pub struct PluginRegistry {
    operations: HashMap<String, Arc<dyn OperationPlugin>>,
    commands: HashMap<String, Arc<dyn CommandPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
            commands: HashMap::new(),
        }
    }

    pub fn with_operation<O: OperationPlugin + 'static>(mut self, op: O) -> Self {
        let name = op.meta().name;
        self.register(name, Arc::new(op));
        self
    }

    pub fn with_command<C: CommandPlugin + 'static>(mut self, c: C) -> Self {
        let name = c.meta().name.to_lowercase();
        self.commands.insert(name, Arc::new(c));
        self
    }

    /// Register `op` under `name`, returning the plugin it replaced
    pub fn register(&mut self, name: &str, op: Arc<dyn OperationPlugin>) -> Option<Arc<dyn OperationPlugin>> {
        self.operations.insert(name.to_lowercase(), op)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn OperationPlugin>> {
        self.operations.remove(&name.to_lowercase())
    }

    /// Shareable handle to an operation, e.g. for running it on another thread
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn OperationPlugin>> {
        self.operations.get(&name.to_lowercase()).cloned()
    }

    pub fn get_command(&self, name: &str) -> Option<&dyn CommandPlugin> {
        self.commands.get(&name.to_lowercase()).map(|c| c.as_ref())
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(&name.to_lowercase())
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registered operation names, sorted
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operations.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registered operations with their metadata, sorted by registry name
    pub fn operations(&self) -> Vec<(String, OperationMeta)> {
        let mut ops: Vec<(String, OperationMeta)> = self.operations.iter()
            .map(|(name, op)| (name.clone(), op.meta()))
            .collect();
        ops.sort_by(|a, b| a.0.cmp(&b.0));
        ops
    }

    /// Registered commands, sorted by name
    pub fn commands(&self) -> Vec<&dyn CommandPlugin> {
        let mut names: Vec<&String> = self.commands.keys().collect();
        names.sort();
        names.into_iter()
            .filter_map(|n| self.commands.get(n))
            .map(|c| c.as_ref())
            .collect()
    }

    /// Find operation names similar to the given name (for error suggestions)
    pub fn find_similar(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let threshold = name_lower.chars().collect::<HashSet<char>>().len() * 2;
        let mut matches: Vec<(String, usize)> = self.operations.keys()
            .filter_map(|op_name| {
                let score = Self::similarity_score(&name_lower, op_name);
                if score > 0 && score >= threshold {
                    Some((op_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Higher score first, name as tie-break for stable output
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Calculate similarity score between two strings
    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        // Exact prefix match is best
        if candidate.starts_with(query) {
            score += 100;
        }
        // Contains the query
        else if candidate.contains(query) {
            score += 50;
        }
        // Query contains the candidate
        else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        // Penalize length difference
        let len_diff = (query.len() as i64 - candidate.len() as i64).unsigned_abs() as usize;
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
