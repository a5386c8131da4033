//! The owner: sole owner of every pet in a household.

use serde::Serialize;

use crate::pet::Pet;
use crate::task::Task;

/// A pet owner with an ordered list of distinct pets.
#[derive(Debug, Clone, Serialize)]
pub struct Owner {
    id: String,
    name: String,
    pets: Vec<Pet>,
}

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Owner {
            id: format!("owner-{}", uuid::Uuid::new_v4()),
            name: name.into(),
            pets: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Take ownership of a pet and point its back-reference here.
    ///
    /// A pet whose id is already present is ignored; returns whether the
    /// pet was added.
    pub fn add_pet(&mut self, mut pet: Pet) -> bool {
        if self.pets.iter().any(|existing| existing.id() == pet.id()) {
            return false;
        }
        pet.set_owner_id(&self.id);
        self.pets.push(pet);
        true
    }

    /// Pets in the order they were added.
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// First pet with the given name.
    pub fn pet(&self, name: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.name() == name)
    }

    pub fn pet_mut(&mut self, name: &str) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|pet| pet.name() == name)
    }

    /// Whether a pet's back-reference points at this owner.
    pub fn owns(&self, pet: &Pet) -> bool {
        pet.owner_id() == Some(self.id.as_str())
    }

    /// Every task of every pet, pet by pet.
    pub fn get_all_tasks(&self) -> Vec<&Task> {
        self.pets.iter().flat_map(|pet| pet.list_tasks()).collect()
    }
}
