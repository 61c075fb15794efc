//! ConditionEditor - orchestrates engine calls for an interactive host
//!
//! The host owns the canonical conditions and hands them in (flat or
//! nested). Each control maps to exactly one engine operation; the new
//! state is reported through the change callback immediately, in the
//! representation the host asked for. Nothing is batched or deferred.
//!
//! The editor only ever edits the state the host last rendered. A reported
//! change is not adopted until the host hands it back through
//! [`ConditionEditor::sync`], so a host that rejects or reshapes an edit
//! never has paths resolved against a tree it did not render.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::config::{EditorConfig, FieldSchema, Representation};
use crate::editor::validation::{validate, LeafIssue};
use crate::editor::view::{build_view, EditorView};
use crate::error::{ConditionTreeError, Result};
use crate::flat::{dedupe_ids, to_flat, to_nested, FlatItem};
use crate::mutation::{resolve, LeafKey, Mutation};
use crate::tree::{find_path, ConditionItem, LogicOperator, Path, Tree};

// ============================================================================
// Conditions payload
// ============================================================================

/// Conditions in either representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Conditions {
    Flat(Vec<FlatItem>),
    Nested(Tree),
}

impl Conditions {
    pub fn representation(&self) -> Representation {
        match self {
            Conditions::Flat(_) => Representation::Flat,
            Conditions::Nested(_) => Representation::Nested,
        }
    }

    /// Normalize into the nested tree. Missing or repeated ids are
    /// replaced in either representation.
    pub fn into_tree(self) -> Tree {
        match self {
            Conditions::Flat(items) => to_nested(&items),
            Conditions::Nested(mut tree) => {
                dedupe_ids(&mut tree);
                tree
            }
        }
    }

    /// Express `tree` in the requested representation
    pub fn from_tree(tree: &[ConditionItem], representation: Representation) -> Self {
        match representation {
            Representation::Flat => Conditions::Flat(to_flat(tree)),
            Representation::Nested => Conditions::Nested(tree.to_vec()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Vec<FlatItem>> for Conditions {
    fn from(items: Vec<FlatItem>) -> Self {
        Conditions::Flat(items)
    }
}

impl From<Tree> for Conditions {
    fn from(tree: Tree) -> Self {
        Conditions::Nested(tree)
    }
}

// ============================================================================
// Editor
// ============================================================================

/// Callback receiving the updated conditions after every mutation
pub type ChangeCallback = Box<dyn FnMut(Conditions) + Send>;

pub struct ConditionEditor {
    /// Last state the host rendered
    tree: Tree,
    schema: Arc<FieldSchema>,
    config: EditorConfig,
    on_change: ChangeCallback,
}

impl fmt::Debug for ConditionEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionEditor")
            .field("tree", &self.tree)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ConditionEditor {
    pub fn new<F>(
        input: Conditions,
        schema: Arc<FieldSchema>,
        config: EditorConfig,
        on_change: F,
    ) -> Self
    where
        F: FnMut(Conditions) + Send + 'static,
    {
        Self {
            tree: input.into_tree(),
            schema,
            config,
            on_change: Box::new(on_change),
        }
    }

    /// Adopt the state the host rendered, including any change the host
    /// accepted from the callback. Does not call back.
    pub fn sync(&mut self, input: Conditions) {
        self.tree = input.into_tree();
    }

    pub fn tree(&self) -> &[ConditionItem] {
        &self.tree
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current state in the configured output representation
    pub fn output(&self) -> Conditions {
        Conditions::from_tree(&self.tree, self.config.output)
    }

    /// "Add Condition" inside the group at `parent` (root when empty)
    pub fn add_condition(&mut self, parent: &Path) -> Result<()> {
        self.apply(Mutation::AddLeaf {
            parent: parent.clone(),
        })
    }

    /// "Add Group" inside the group at `parent`, subject to the depth limit
    pub fn add_group(&mut self, parent: &Path) -> Result<()> {
        self.apply(Mutation::AddGroup {
            parent: parent.clone(),
        })
    }

    /// Remove the node at `path`. The only child of a nested group stays.
    pub fn remove(&mut self, path: &Path) -> Result<()> {
        self.apply(Mutation::Remove { path: path.clone() })
    }

    pub fn update_leaf(&mut self, path: &Path, key: LeafKey, value: &str) -> Result<()> {
        self.apply(Mutation::UpdateLeaf {
            path: path.clone(),
            key,
            value: value.to_string(),
        })
    }

    pub fn set_group_logic(&mut self, path: &Path, logic_type: LogicOperator) -> Result<()> {
        self.apply(Mutation::SetGroupLogic {
            path: path.clone(),
            logic_type,
        })
    }

    pub fn toggle_leaf_logic(&mut self, path: &Path) -> Result<()> {
        self.apply(Mutation::ToggleLeafLogic { path: path.clone() })
    }

    /// Current path of a node, for hosts that hold on to ids
    pub fn path_of(&self, id: &str) -> Result<Path> {
        find_path(&self.tree, id).ok_or_else(|| ConditionTreeError::IdNotFound(id.to_string()))
    }

    /// Whether "Add Group" is offered inside the group at `parent`
    pub fn can_add_group(&self, parent: &[usize]) -> bool {
        parent.len() < self.config.max_depth && self.is_parent(parent)
    }

    /// Whether the remove control of the node at `path` is enabled
    pub fn can_remove(&self, path: &[usize]) -> bool {
        match path.split_last() {
            None => false,
            Some((_, [])) => resolve(&self.tree, path).is_some(),
            Some((&index, parent)) => match resolve(&self.tree, parent) {
                Some(ConditionItem::Group(group)) => {
                    index < group.children.len() && group.children.len() > 1
                }
                _ => false,
            },
        }
    }

    /// Render description of every control
    pub fn view(&self) -> EditorView {
        build_view(&self.tree, &self.schema, &self.config)
    }

    /// Advisory per-leaf problems for the host's messaging
    pub fn issues(&self) -> Vec<(Path, LeafIssue)> {
        validate(&self.tree, &self.schema)
    }

    /// Apply one mutation to the rendered state and report the result.
    ///
    /// The rendered state itself is left alone until the host syncs. On
    /// error the callback is not invoked.
    pub fn apply(&mut self, mutation: Mutation) -> Result<()> {
        let next = self.preview(&mutation)?;
        debug!(op = mutation.name(), "editor mutation reported");
        (self.on_change)(Conditions::from_tree(&next, self.config.output));
        Ok(())
    }

    /// The tree `mutation` would produce from the rendered state
    pub fn preview(&self, mutation: &Mutation) -> Result<Tree> {
        self.check_affordance(mutation)?;
        mutation.apply(&self.tree)
    }

    /// UI-level restrictions the engine itself does not impose
    fn check_affordance(&self, mutation: &Mutation) -> Result<()> {
        match mutation {
            Mutation::AddGroup { parent } => {
                let depth = parent.len() + 1;
                if depth > self.config.max_depth {
                    return Err(ConditionTreeError::DepthExceeded {
                        depth,
                        max: self.config.max_depth,
                    });
                }
            }
            Mutation::Remove { path } if path.len() > 1 => {
                if let Some((parent, _)) = path.split_last() {
                    if let Some(ConditionItem::Group(group)) = resolve(&self.tree, &parent) {
                        if group.children.len() == 1 {
                            return Err(ConditionTreeError::LastChildOfGroup(path.clone()));
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn is_parent(&self, path: &[usize]) -> bool {
        path.is_empty() || matches!(resolve(&self.tree, path), Some(ConditionItem::Group(_)))
    }
}
