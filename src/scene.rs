// scene.rs

use std::rc::{Rc, Weak};

use crate::entry::Entry;
use crate::error::CommandError;
use crate::item::ItemRef;
use crate::navigator::SelectionHost;

#[derive(Debug)]
pub struct SceneObject {
    name: String,
}

impl SceneObject {
    pub fn name(&self) -> &str {
        &self.name
    }
}

pub type ObjectRef = Weak<SceneObject>;
pub type Selection = Entry<ObjectRef>;

/// A toy editor scene: named objects owned by the scene, and a selection
/// that only refers to them weakly.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Rc<SceneObject>>,
    selection: Vec<ObjectRef>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, name: &str) -> Result<(), CommandError> {
        if self.find(name).is_some() {
            return Err(CommandError::DuplicateObject(name.to_string()));
        }
        self.objects.push(Rc::new(SceneObject { name: name.to_string() }));
        Ok(())
    }

    /// Destroys the named object. Returns true if it was part of the
    /// selection, which is then narrowed to the surviving objects.
    pub fn destroy(&mut self, name: &str) -> Result<bool, CommandError> {
        let index = self
            .objects
            .iter()
            .position(|o| o.name == name)
            .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))?;
        self.objects.remove(index);

        let before = self.selection.len();
        self.selection.retain(|r| r.is_alive());
        Ok(self.selection.len() != before)
    }

    pub fn find(&self, name: &str) -> Option<&Rc<SceneObject>> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Replaces the selection. Nothing changes if any name is unknown.
    pub fn select<S: AsRef<str>>(&mut self, names: &[S]) -> Result<Selection, CommandError> {
        let selection = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.find(name)
                    .map(Rc::downgrade)
                    .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.selection = selection;
        Ok(self.selection())
    }

    /// Snapshot of the current selection.
    pub fn selection(&self) -> Selection {
        Entry::new(self.selection.clone())
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.selection
            .iter()
            .filter_map(Weak::upgrade)
            .map(|o| o.name.clone())
            .collect()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection
            .iter()
            .filter_map(Weak::upgrade)
            .any(|o| o.name == name)
    }

    pub fn object_names(&self) -> Vec<String> {
        self.objects.iter().map(|o| o.name.clone()).collect()
    }
}

impl SelectionHost<ObjectRef> for Scene {
    fn apply_selection(&mut self, entry: &Selection) {
        self.selection = entry.alive().cloned().collect();
    }
}

/// Display name of a reference, or `<destroyed>` once its object is gone.
pub fn describe(object: &ObjectRef) -> String {
    match object.upgrade() {
        Some(o) => o.name.clone(),
        None => "<destroyed>".to_string(),
    }
}
