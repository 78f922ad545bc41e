//! Registry of investment research tools
//!
//! The agent runtime addresses tools by their stable names; the registry is
//! the lookup table behind that contract. Registration is last-writer-wins:
//! registering a second tool under an existing name displaces the first, with
//! a warning, so a caller can swap in a replacement implementation.

use crate::Tool;
use invest_core::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::warn;

/// Lookup table of tools keyed by their stable names
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.write().insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "re-registered tool; previous implementation displaced");
        }
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.read().get(name).cloned()
    }

    /// Execute the named tool in one step
    ///
    /// Fails with [`Error::UnknownTool`] when nothing is registered under
    /// `name`; everything else is the tool's own result.
    pub async fn execute(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        tool.execute(params).await
    }

    /// All registered tools, sorted by name
    ///
    /// The stable order makes the listing directly usable for building the
    /// tool definitions sent to the LLM.
    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools: Vec<_> = self.read().values().cloned().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the registry holds no tools
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<dyn Tool>>> {
        self.tools.read().expect("tool registry lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<dyn Tool>>> {
        self.tools.write().expect("tool registry lock poisoned")
    }
}
