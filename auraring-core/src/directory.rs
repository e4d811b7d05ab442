//! A world-level store of reusable aura templates, keyed by display name.
//! Entries are detached (no id) until applied to a token's collection. The
//! host persists the whole directory as one settings record.

use crate::aura::Aura;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("no stored aura named {0:?}")]
    UnknownName(String),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AuraDirectory(Vec<Aura>);

impl AuraDirectory {
    /// All templates, kept name-sorted on every write.
    #[must_use]
    pub fn all(&self) -> &[Aura] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Aura> {
        self.0.iter().find(|aura| aura.name == name)
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Store a template, detaching it from any token identity. A template
    /// with the same name is overwritten.
    pub fn put(&mut self, aura: &Aura) {
        let template = aura.detached();
        self.0.retain(|existing| existing.name != template.name);
        self.0.push(template);
        self.0.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn remove(&mut self, name: &str) -> Option<Aura> {
        let index = self.0.iter().position(|aura| aura.name == name)?;
        Some(self.0.remove(index))
    }

    /// Rename a stored template. Any template already carrying the new name
    /// is overwritten, matching `put`.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), DirectoryError> {
        let mut aura = self
            .remove(old_name)
            .ok_or_else(|| DirectoryError::UnknownName(old_name.to_owned()))?;
        aura.name = new_name.to_owned();
        self.put(&aura);
        Ok(())
    }
}
