//! Python bindings (feature `python`)
//!
//! Exposes the flat/nested converters and a `ConditionEditor` class whose
//! change callback is a Python callable receiving JSON text.

use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};
use pyo3::prelude::*;
use std::sync::Arc;
use tracing::warn;

use crate::config::{EditorConfig, FieldSchema, Representation};
use crate::editor::{describe, ConditionEditor, Conditions};
use crate::error::{ConditionTreeError, Result};
use crate::flat::{dedupe_ids, from_flat_json, parse_flat_value, to_flat_json};
use crate::mutation::LeafKey;
use crate::tree::{LogicOperator, Path, Tree};

// ============================================================================
// Cached Schema
// ============================================================================

/// Process-wide field schema shared by editors created afterwards
static SCHEMA: OnceCell<Arc<RwLock<Arc<FieldSchema>>>> = OnceCell::new();

fn current_schema() -> Arc<FieldSchema> {
    SCHEMA
        .get()
        .map(|cached| cached.read().clone())
        .unwrap_or_default()
}

fn parse_conditions(json: &str, representation: Representation) -> Result<Conditions> {
    match representation {
        Representation::Flat => {
            let value: serde_json::Value = serde_json::from_str(json)?;
            Ok(Conditions::Flat(parse_flat_value(&value)?))
        }
        Representation::Nested => Ok(Conditions::Nested(serde_json::from_str::<Tree>(json)?)),
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Register the field schema (call once at startup, or again to replace it)
///
/// # Arguments
/// * `json` - `{"fields": [...], "operators": {field: [{value, label}]}, "types": {field: type}}`
#[pyfunction]
fn init_schema(json: &str) -> PyResult<()> {
    let schema = Arc::new(FieldSchema::from_json(json)?);

    if let Some(existing) = SCHEMA.get() {
        *existing.write() = schema;
    } else {
        let _ = SCHEMA.set(Arc::new(RwLock::new(schema)));
    }

    Ok(())
}

/// Check if a schema was registered
#[pyfunction]
fn is_schema_initialized() -> bool {
    SCHEMA.get().is_some()
}

/// Convert flat JSON into nested JSON, dropping malformed entries
#[pyfunction]
fn flat_to_nested(json: &str) -> PyResult<String> {
    let tree = from_flat_json(json)?;
    Ok(serde_json::to_string(&tree).map_err(ConditionTreeError::from)?)
}

/// Convert nested JSON into flat JSON, replacing missing or repeated ids
#[pyfunction]
fn nested_to_flat(json: &str) -> PyResult<String> {
    let mut tree: Tree = serde_json::from_str(json).map_err(ConditionTreeError::from)?;
    dedupe_ids(&mut tree);
    Ok(to_flat_json(&tree)?)
}

// ============================================================================
// ConditionEditor PyClass
// ============================================================================

/// Editor handle for Python hosts
///
/// Mutations run under the lock; change payloads are queued and delivered
/// to `on_change` after the lock is released, so the callback may call
/// back into the editor. A reported change is only edited further once
/// the host passes it (or its own version of it) to `sync`.
#[pyclass(name = "ConditionEditor")]
pub struct PyConditionEditor {
    inner: Mutex<ConditionEditor>,
    pending: Arc<Mutex<Vec<String>>>,
    on_change: Py<PyAny>,
    representation: Representation,
}

impl PyConditionEditor {
    fn run<F>(&self, py: Python<'_>, op: F) -> PyResult<()>
    where
        F: FnOnce(&mut ConditionEditor) -> Result<()>,
    {
        op(&mut *self.inner.lock())?;
        let payloads = std::mem::take(&mut *self.pending.lock());
        for payload in payloads {
            self.on_change.call1(py, (payload,))?;
        }
        Ok(())
    }
}

#[pymethods]
impl PyConditionEditor {
    /// Create an editor over `conditions` (JSON in the configured output
    /// representation, flat by default)
    #[new]
    #[pyo3(signature = (conditions, on_change, config=None))]
    fn new(conditions: &str, on_change: Py<PyAny>, config: Option<&str>) -> PyResult<Self> {
        let config: EditorConfig = match config {
            Some(json) => serde_json::from_str(json).map_err(ConditionTreeError::from)?,
            None => EditorConfig::default(),
        };
        let representation = config.output;
        let input = parse_conditions(conditions, representation)?;

        let pending = Arc::new(Mutex::new(Vec::new()));
        let queue = pending.clone();
        let editor = ConditionEditor::new(input, current_schema(), config, move |changed| {
            match changed.to_json() {
                Ok(payload) => queue.lock().push(payload),
                Err(err) => warn!(error = %err, "failed to serialize conditions"),
            }
        });

        Ok(Self {
            inner: Mutex::new(editor),
            pending,
            on_change,
            representation,
        })
    }

    /// Adopt the conditions the host rendered
    fn sync(&self, conditions: &str) -> PyResult<()> {
        let input = parse_conditions(conditions, self.representation)?;
        self.inner.lock().sync(input);
        Ok(())
    }

    fn add_condition(&self, py: Python<'_>, parent: Vec<usize>) -> PyResult<()> {
        self.run(py, |ed| ed.add_condition(&Path::from(parent)))
    }

    fn add_group(&self, py: Python<'_>, parent: Vec<usize>) -> PyResult<()> {
        self.run(py, |ed| ed.add_group(&Path::from(parent)))
    }

    fn remove(&self, py: Python<'_>, path: Vec<usize>) -> PyResult<()> {
        self.run(py, |ed| ed.remove(&Path::from(path)))
    }

    /// Set "field", "operator" (or legacy "condition") or "value"
    fn update_field(&self, py: Python<'_>, path: Vec<usize>, key: &str, value: &str) -> PyResult<()> {
        let key: LeafKey = key.parse()?;
        self.run(py, |ed| ed.update_leaf(&Path::from(path), key, value))
    }

    fn set_group_logic(&self, py: Python<'_>, path: Vec<usize>, logic: &str) -> PyResult<()> {
        let logic: LogicOperator = logic.parse()?;
        self.run(py, |ed| ed.set_group_logic(&Path::from(path), logic))
    }

    fn toggle_logic(&self, py: Python<'_>, path: Vec<usize>) -> PyResult<()> {
        self.run(py, |ed| ed.toggle_leaf_logic(&Path::from(path)))
    }

    fn path_of(&self, id: &str) -> PyResult<Vec<usize>> {
        Ok(self.inner.lock().path_of(id)?.to_vec())
    }

    fn can_add_group(&self, parent: Vec<usize>) -> bool {
        self.inner.lock().can_add_group(&parent)
    }

    fn can_remove(&self, path: Vec<usize>) -> bool {
        self.inner.lock().can_remove(&path)
    }

    /// Current conditions as JSON, in the configured representation
    fn conditions_json(&self) -> PyResult<String> {
        Ok(self.inner.lock().output().to_json()?)
    }

    /// Render description as JSON
    fn view_json(&self) -> PyResult<String> {
        let view = self.inner.lock().view();
        Ok(serde_json::to_string(&view).map_err(ConditionTreeError::from)?)
    }

    /// Advisory per-leaf issues as JSON `[{"path": [...], "detail": {"issue": ...}}]`
    fn issues_json(&self) -> PyResult<String> {
        let issues: Vec<serde_json::Value> = self
            .inner
            .lock()
            .issues()
            .into_iter()
            .map(|(path, issue)| serde_json::json!({ "path": path, "detail": issue }))
            .collect();
        Ok(serde_json::to_string(&issues).map_err(ConditionTreeError::from)?)
    }

    /// One-line text summary; `root_logic` is "and"/"or" (or "all"/"any")
    #[pyo3(signature = (root_logic="and"))]
    fn describe(&self, root_logic: &str) -> PyResult<String> {
        let root_logic: LogicOperator = root_logic.parse()?;
        Ok(describe(self.inner.lock().tree(), root_logic))
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn condition_tree_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_schema, m)?)?;
    m.add_function(wrap_pyfunction!(is_schema_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(flat_to_nested, m)?)?;
    m.add_function(wrap_pyfunction!(nested_to_flat, m)?)?;
    m.add_class::<PyConditionEditor>()?;
    Ok(())
}
