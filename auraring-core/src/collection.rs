//! # Aura collections
//!
//! The ordered list of auras attached to one token. Ids are unique within a
//! collection and allocated from a deliberately small space (`0..100`);
//! exhausting it is an explicit error, not a silent misbehaviour. All edits
//! are value-level — persistence is the host's [`crate::host::AuraStore`].

use crate::aura::{Aura, AuraError, AuraId};
use crate::modifier::{set_field, AuraField, FieldValue};

/// Upper bound of the id space. A known low ceiling, not a hash space.
pub const MAX_AURAS: usize = 100;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollectionError {
    #[error("no aura ids left (all {MAX_AURAS} in use)")]
    Full,
    #[error("no aura with id {0}")]
    UnknownId(AuraId),
    #[error("duplicate aura id {0}")]
    DuplicateId(AuraId),
    #[error("value does not fit field {0}")]
    FieldType(AuraField),
    #[error(transparent)]
    Invalid(#[from] AuraError),
}

/// An ordered aura list. Order is insertion order; updating an existing
/// aura keeps its position. Name ordering exists only as a presentation
/// view ([`Self::sorted_by_name`]), never as a storage side effect.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AuraCollection(Vec<Aura>);

impl AuraCollection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Aura> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Aura] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, id: AuraId) -> Option<&Aura> {
        self.0.iter().find(|aura| aura.id == Some(id))
    }

    /// First unused id in `0..100`.
    pub fn next_available_id(&self) -> Result<AuraId, CollectionError> {
        (0..MAX_AURAS as u8)
            .map(AuraId)
            .find(|id| self.get(*id).is_none())
            .ok_or(CollectionError::Full)
    }

    /// Insert or update. A detached aura (`id: None`) is assigned the next
    /// free id and appended; an aura carrying an id replaces the record with
    /// that id in place, or is appended if the id is unused.
    pub fn upsert(&mut self, mut aura: Aura) -> Result<AuraId, CollectionError> {
        aura.validate()?;
        let id = match aura.id {
            Some(id) => id,
            None => {
                let id = self.next_available_id()?;
                aura.id = Some(id);
                id
            }
        };
        match self.0.iter_mut().find(|existing| existing.id == Some(id)) {
            Some(slot) => *slot = aura,
            None => self.0.push(aura),
        }
        Ok(id)
    }

    pub fn delete(&mut self, id: AuraId) -> Option<Aura> {
        let index = self.0.iter().position(|aura| aura.id == Some(id))?;
        Some(self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Wholesale replacement, preserving the caller's ordering. Every
    /// record is validated, detached records get ids, and id clashes are
    /// rejected before anything is committed.
    pub fn replace_all(&mut self, auras: Vec<Aura>) -> Result<(), CollectionError> {
        let mut taken: Vec<AuraId> = Vec::with_capacity(auras.len());
        for aura in &auras {
            aura.validate()?;
            if let Some(id) = aura.id {
                if taken.contains(&id) {
                    return Err(CollectionError::DuplicateId(id));
                }
                taken.push(id);
            }
        }

        let mut replacement = Vec::with_capacity(auras.len());
        for mut aura in auras {
            if aura.id.is_none() {
                let id = (0..MAX_AURAS as u8)
                    .map(AuraId)
                    .find(|id| !taken.contains(id))
                    .ok_or(CollectionError::Full)?;
                taken.push(id);
                aura.id = Some(id);
            }
            replacement.push(aura);
        }
        self.0 = replacement;
        Ok(())
    }

    /// Patch one field of one aura directly. The patched record must still
    /// pass schema validation or the edit is rolled back.
    pub fn set_value(
        &mut self,
        id: AuraId,
        field: AuraField,
        value: &FieldValue,
    ) -> Result<(), CollectionError> {
        let slot = self
            .0
            .iter_mut()
            .find(|aura| aura.id == Some(id))
            .ok_or(CollectionError::UnknownId(id))?;
        let mut patched = slot.clone();
        if !set_field(&mut patched, field, value) {
            return Err(CollectionError::FieldType(field));
        }
        patched.validate()?;
        *slot = patched;
        Ok(())
    }

    /// Id → name listing in collection order, for pickers and lookups.
    #[must_use]
    pub fn index(&self) -> Vec<(AuraId, &str)> {
        self.0
            .iter()
            .filter_map(|aura| Some((aura.id?, aura.name.as_str())))
            .collect()
    }

    /// Presentation-time name ordering. Storage order is untouched.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&Aura> {
        let mut view: Vec<&Aura> = self.0.iter().collect();
        view.sort_by(|a, b| a.name.cmp(&b.name));
        view
    }
}

impl From<Vec<Aura>> for AuraCollection {
    fn from(auras: Vec<Aura>) -> Self {
        Self(auras)
    }
}

impl<'a> IntoIterator for &'a AuraCollection {
    type Item = &'a Aura;
    type IntoIter = std::slice::Iter<'a, Aura>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use super::{AuraCollection, CollectionError, MAX_AURAS};
    use crate::aura::{Aura, AuraId};
    use crate::modifier::{AuraField, FieldValue};

    fn named(name: &str, id: Option<u8>) -> Aura {
        Aura {
            id: id.map(AuraId),
            name: name.into(),
            ..Aura::default()
        }
    }

    #[test]
    fn next_id_fills_gaps_first() {
        let mut auras = AuraCollection::default();
        for id in [0, 1, 2] {
            auras.upsert(named("Aura", Some(id))).unwrap();
        }
        assert_eq!(auras.next_available_id(), Ok(AuraId(3)));

        auras.delete(AuraId(1)).unwrap();
        assert_eq!(auras.next_available_id(), Ok(AuraId(1)));
    }

    #[test]
    fn id_space_exhaustion_is_reported() {
        let mut auras = AuraCollection::default();
        for id in 0..MAX_AURAS as u8 {
            auras.upsert(named("Aura", Some(id))).unwrap();
        }
        assert_eq!(auras.next_available_id(), Err(CollectionError::Full));
        assert_eq!(
            auras.upsert(named("One More", None)),
            Err(CollectionError::Full)
        );
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut auras = AuraCollection::default();
        let mut aura = named("Torchlight", None);
        aura.radius = 30.0;
        aura.stroke.close = true;

        let id = auras.upsert(aura.clone()).unwrap();
        let stored = auras.get(id).unwrap();
        assert_eq!(stored.name, "Torchlight");
        assert_eq!(stored.radius, 30.0);
        assert!(stored.stroke.close);
        assert_eq!(stored.id, Some(id));
    }

    #[test]
    fn update_keeps_position() {
        let mut auras = AuraCollection::default();
        auras.upsert(named("First", Some(0))).unwrap();
        auras.upsert(named("Second", Some(1))).unwrap();
        auras.upsert(named("Third", Some(2))).unwrap();

        let mut updated = named("First Renamed", Some(0));
        updated.radius = 5.0;
        auras.upsert(updated).unwrap();

        let names: Vec<&str> = auras.iter().map(|aura| aura.name.as_str()).collect();
        assert_eq!(names, ["First Renamed", "Second", "Third"]);
    }

    #[test]
    fn name_sort_is_presentation_only() {
        let mut auras = AuraCollection::default();
        auras.upsert(named("Zeta", Some(0))).unwrap();
        auras.upsert(named("Alpha", Some(1))).unwrap();

        let sorted: Vec<&str> = auras
            .sorted_by_name()
            .into_iter()
            .map(|aura| aura.name.as_str())
            .collect();
        assert_eq!(sorted, ["Alpha", "Zeta"]);

        let stored: Vec<&str> = auras.iter().map(|aura| aura.name.as_str()).collect();
        assert_eq!(stored, ["Zeta", "Alpha"]);
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let mut auras = AuraCollection::default();
        let result = auras.replace_all(vec![named("A", Some(3)), named("B", Some(3))]);
        assert_eq!(result, Err(CollectionError::DuplicateId(AuraId(3))));
        assert!(auras.is_empty());
    }

    #[test]
    fn set_value_patches_and_validates() {
        let mut auras = AuraCollection::default();
        let id = auras.upsert(named("Aura", None)).unwrap();

        auras
            .set_value(id, AuraField::Radius, &FieldValue::Number(42.0))
            .unwrap();
        assert_eq!(auras.get(id).unwrap().radius, 42.0);

        // A patch that breaks the schema is rolled back.
        let err = auras.set_value(id, AuraField::Angle, &FieldValue::Number(1.0));
        assert!(matches!(err, Err(CollectionError::Invalid(_))));
        assert_eq!(auras.get(id).unwrap().angle, 360.0);

        let err = auras.set_value(id, AuraField::Radius, &FieldValue::Flag(true));
        assert_eq!(err, Err(CollectionError::FieldType(AuraField::Radius)));
    }

    #[test]
    fn index_lists_ids_and_names_in_order() {
        let mut auras = AuraCollection::default();
        auras.upsert(named("Watch", Some(4))).unwrap();
        auras.upsert(named("Ward", Some(2))).unwrap();
        let index = auras.index();
        assert_eq!(index, vec![(AuraId(4), "Watch"), (AuraId(2), "Ward")]);
    }
}
