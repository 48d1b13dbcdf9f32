//! Client-side view of the tools a server advertises.

use std::collections::BTreeMap;

use crate::core::tool::ToolDefinition;

/// The tool definitions learned from one server. Rebuilt wholesale on each
/// `tools/list`; never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    by_name: BTreeMap<String, ToolDefinition>,
}

impl Catalog {
    pub fn from_tools(tools: impl IntoIterator<Item = ToolDefinition>) -> Self {
        let by_name = tools
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Combine catalogs from several servers into one view. Every entry is
/// renamed `<server>/<tool>`, so same-named tools on different servers can
/// never silently overwrite each other.
pub fn merge_catalogs<'a>(
    sources: impl IntoIterator<Item = (&'a str, &'a Catalog)>,
) -> Catalog {
    let mut by_name = BTreeMap::new();
    for (server, catalog) in sources {
        for def in catalog.tools() {
            let mut def = def.clone();
            def.name = format!("{server}/{}", def.name);
            by_name.insert(def.name.clone(), def);
        }
    }
    Catalog { by_name }
}

/// Split a merged-catalog name back into (server, tool).
pub fn split_namespaced(name: &str) -> Option<(&str, &str)> {
    name.split_once('/')
}
