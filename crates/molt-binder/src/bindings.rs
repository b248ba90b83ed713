//! Binding records and their arena.

use crate::scopes::ScopeId;
use molt_ast::NodeIndex;
use serde::Serialize;

/// Classification flags for bindings.
///
/// A binding accumulates flags when later declarations of the same name
/// merge into it (`x = []` followed by `x += y` yields `ASSIGNED | AUGMENTED`).
pub mod binding_flags {
    /// Simple assignment target.
    pub const ASSIGNED: u32 = 1 << 0;
    /// Annotated assignment target.
    pub const ANNOTATED: u32 = 1 << 1;
    /// Augmented assignment target.
    pub const AUGMENTED: u32 = 1 << 2;
    /// Function parameter.
    pub const PARAMETER: u32 = 1 << 3;
    /// For-loop target.
    pub const LOOP_TARGET: u32 = 1 << 4;
    /// Name declared by a function definition.
    pub const FUNCTION: u32 = 1 << 5;
    /// Name declared by a class definition.
    pub const CLASS: u32 = 1 << 6;
}

/// Index of a binding inside its [`BindingArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BindingId(pub u32);

/// An identifier's declaration record.
#[derive(Clone, Debug, Serialize)]
pub struct Binding {
    pub name: String,
    pub flags: u32,
    /// Scope the binding is declared in.
    pub scope: ScopeId,
    /// Every declaration site of the name in its scope, first one first.
    pub declarations: Vec<NodeIndex>,
    /// The statement responsible for the original declaration. Later
    /// same-name declarations never update this; the list-growth pass
    /// depends on it staying the original.
    pub assigned_from: NodeIndex,
    /// Growth-mutation call sites (`append`/`extend`/`insert`), in
    /// traversal order. Filled by the list-growth pass.
    pub calls: Vec<NodeIndex>,
}

impl Binding {
    /// The original declaration site.
    pub fn declaration(&self) -> NodeIndex {
        self.declarations.first().copied().unwrap_or(NodeIndex::NONE)
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Arena for binding storage.
#[derive(Debug, Default)]
pub struct BindingArena {
    bindings: Vec<Binding>,
}

impl BindingArena {
    pub fn new() -> BindingArena {
        BindingArena::default()
    }

    pub fn with_capacity(capacity: usize) -> BindingArena {
        BindingArena {
            bindings: Vec::with_capacity(capacity),
        }
    }

    pub fn alloc(
        &mut self,
        name: &str,
        flags: u32,
        scope: ScopeId,
        declaration: NodeIndex,
        assigned_from: NodeIndex,
    ) -> BindingId {
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(Binding {
            name: name.to_string(),
            flags,
            scope,
            declarations: vec![declaration],
            assigned_from,
            calls: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: BindingId) -> Option<&mut Binding> {
        self.bindings.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i as u32), b))
    }
}
