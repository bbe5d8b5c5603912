//! The top-level parsed artifact and its hot-reload wrapper.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use crate::dialect::Dialect;
use crate::format;
use crate::lookup::Lookup;
use crate::statement::Statement;
use crate::value::{Attribute, Value};

/// Identity of a parsed source: a filesystem path, or the `<string>`
/// sentinel for in-memory input with no backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceId {
    Path(String),
    Sentinel,
}

impl SourceId {
    pub fn as_str(&self) -> &str {
        match self {
            SourceId::Path(p) => p.as_str(),
            SourceId::Sentinel => "<string>",
        }
    }

    /// Namespace derived from the filename stem, or `"module"` when absent
    /// (in-memory input, or a path with no usable stem).
    pub fn derive_namespace(&self) -> String {
        match self {
            SourceId::Path(p) => {
                let file_name = p.rsplit(['/', '\\']).next().unwrap_or(p);
                let stem = file_name.split('.').next().unwrap_or(file_name);
                if stem.is_empty() {
                    "module".to_string()
                } else {
                    stem.to_string()
                }
            }
            SourceId::Sentinel => "module".to_string(),
        }
    }
}

/// The root immutable artifact produced by a successful parse.
#[derive(Debug, Clone)]
pub struct Module {
    namespace: String,
    source_id: SourceId,
    dialect: Dialect,
    attributes: Vec<Attribute>,
    statements: Vec<Statement>,
    index: IndexMap<String, Value>,
}

impl Module {
    /// Assemble the final module from the parser's accumulated statements.
    /// `DuplicateTopLevelKey` is detected by the parser itself (it alone has
    /// the offending statement's line/column); by the time statements reach
    /// here they are already known to have unique keys, which this
    /// constructor asserts rather than re-derives.
    pub(crate) fn build(
        namespace: String,
        source_id: SourceId,
        dialect: Dialect,
        attributes: Vec<Attribute>,
        statements: Vec<Statement>,
    ) -> Module {
        let mut index = IndexMap::with_capacity(statements.len());
        for stmt in &statements {
            let previous = index.insert(stmt.key.clone(), stmt.value.clone());
            debug_assert!(
                previous.is_none(),
                "duplicate top-level key '{}' reached Module::build; \
                 the parser must reject these before construction",
                stmt.key
            );
        }
        debug_assert_eq!(
            index.len(),
            statements.len(),
            "key-index size diverged from statement count"
        );

        tracing::debug!(
            namespace = %namespace,
            source = %source_id.as_str(),
            statements = statements.len(),
            "module constructed"
        );

        Module {
            namespace,
            source_id,
            dialect,
            attributes,
            statements,
            index,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn source(&self) -> &str {
        self.source_id.as_str()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Module-level attributes, merged in source order across every leading
    /// `@[ … ]` block.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Statements in source (insertion) order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn as_formatted_string(&self) -> String {
        format::format_module(self)
    }

    /// Structural equality ignoring the derived key-index (`Module`
    /// intentionally does not derive `PartialEq`, since the index is a
    /// cache of the statement list, not primary data).
    pub fn statements_equal(&self, other: &Module) -> bool {
        self.namespace == other.namespace
            && self.attributes == other.attributes
            && self.statements == other.statements
    }
}

impl Lookup for Module {
    fn try_get(&self, key: &str) -> Option<&Value> {
        self.index.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    fn context_name(&self) -> String {
        format!("module '{}'", self.namespace)
    }
}

/// A thread-safe, swappable handle to the "current" module, for an atomic
/// pointer-swap hot-reload story. Built on `Arc` + `Mutex` rather than a
/// lock-free swap crate: a single swap primitive already expressible with
/// the standard library doesn't earn a new dependency.
pub struct ModuleHandle {
    current: Mutex<Arc<Module>>,
}

impl ModuleHandle {
    pub fn new(module: Module) -> Self {
        ModuleHandle {
            current: Mutex::new(Arc::new(module)),
        }
    }

    /// Cheap clone of the current module pointer. Readers that hold the
    /// returned `Arc` see a stable snapshot even if `store` races ahead.
    pub fn load(&self) -> Arc<Module> {
        Arc::clone(&self.current.lock().expect("module handle mutex poisoned"))
    }

    /// Swap in a new module. The previous module is dropped once its last
    /// reader releases its `Arc`.
    pub fn store(&self, module: Module) {
        let mut guard = self.current.lock().expect("module handle mutex poisoned");
        *guard = Arc::new(module);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_statement(key: &str, value: Value) -> Statement {
        Statement {
            key: key.to_string(),
            attributes: vec![],
            value,
            parent: None,
        }
    }

    #[test]
    fn derives_namespace_from_path_stem() {
        let id = SourceId::Path("configs/server.aml".to_string());
        assert_eq!(id.derive_namespace(), "server");
    }

    #[test]
    fn sentinel_namespace_falls_back_to_module() {
        assert_eq!(SourceId::Sentinel.derive_namespace(), "module");
    }

    #[test]
    fn build_indexes_statements_in_order() {
        let statements = vec![
            sample_statement("a", Value::Numeric(crate::value::Numeric::Integer(1))),
            sample_statement("b", Value::Boolean(true)),
        ];
        let module = Module::build(
            "m".to_string(),
            SourceId::Sentinel,
            Dialect::Asl,
            vec![],
            statements,
        );
        assert_eq!(module.keys(), vec!["a", "b"]);
        assert!(module.contains("a"));
        assert!(!module.contains("missing"));
    }

    #[test]
    fn module_handle_load_reflects_store() {
        let m1 = Module::build("m".to_string(), SourceId::Sentinel, Dialect::Asl, vec![], vec![]);
        let handle = ModuleHandle::new(m1);
        assert_eq!(handle.load().namespace(), "m");

        let m2 = Module::build(
            "m2".to_string(),
            SourceId::Sentinel,
            Dialect::Asl,
            vec![],
            vec![],
        );
        handle.store(m2);
        assert_eq!(handle.load().namespace(), "m2");
    }
}
