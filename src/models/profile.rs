// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Family profile model: parents, child and an optional pet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use super::validation::{validate_calendar_date, validate_person_name, validate_pet_text};

/// Father or mother.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[validate(schema(function = "parent_birth_date"))]
pub struct ParentInfo {
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_person_name")
    )]
    pub first_name: String,
    #[validate(
        length(max = 50, message = "Must be at most 50 characters"),
        custom(function = "validate_person_name")
    )]
    #[serde(default)]
    pub middle_name: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_person_name")
    )]
    pub last_name: String,
    #[validate(range(min = 1900, max = 2024, message = "Must be between 1900 and 2024"))]
    pub birth_year: i32,
    #[validate(range(min = 1, max = 12, message = "Must be between 1 and 12"))]
    pub birth_month: u32,
    #[validate(range(min = 1, max = 31, message = "Must be between 1 and 31"))]
    pub birth_day: u32,
}

fn parent_birth_date(parent: &ParentInfo) -> Result<(), ValidationError> {
    validate_calendar_date(parent.birth_year, parent.birth_month, parent.birth_day)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[validate(schema(function = "child_birth_date"))]
pub struct ChildInfo {
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_person_name")
    )]
    pub first_name: String,
    #[validate(
        length(max = 50, message = "Must be at most 50 characters"),
        custom(function = "validate_person_name")
    )]
    #[serde(default)]
    pub middle_name: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_person_name")
    )]
    pub last_name: String,
    pub gender: Gender,
    #[validate(range(min = 2000, max = 2024, message = "Must be between 2000 and 2024"))]
    pub birth_year: i32,
    #[validate(range(min = 1, max = 12, message = "Must be between 1 and 12"))]
    pub birth_month: u32,
    #[validate(range(min = 1, max = 31, message = "Must be between 1 and 31"))]
    pub birth_day: u32,
}

fn child_birth_date(child: &ChildInfo) -> Result<(), ValidationError> {
    validate_calendar_date(child.birth_year, child.birth_month, child.birth_day)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PetInfo {
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_pet_text")
    )]
    pub name: String,
    pub pet_type: PetType,
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_pet_text")
    )]
    pub breed: String,
    #[validate(
        length(min = 1, max = 50, message = "Must be 1 to 50 characters"),
        custom(function = "validate_pet_text")
    )]
    pub color: String,
}

/// Profile record stored in the profiles file, one per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub user_id: String,
    pub father: ParentInfo,
    pub mother: ParentInfo,
    pub child: ChildInfo,
    #[serde(default)]
    pub pet: Option<PetInfo>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileCreate {
    #[validate(nested)]
    pub father: ParentInfo,
    #[validate(nested)]
    pub mother: ParentInfo,
    #[validate(nested)]
    pub child: ChildInfo,
    #[validate(nested)]
    #[serde(default)]
    pub pet: Option<PetInfo>,
}

/// Section-level patch: each supplied section replaces the stored one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileUpdate {
    #[validate(nested)]
    pub father: Option<ParentInfo>,
    #[validate(nested)]
    pub mother: Option<ParentInfo>,
    #[validate(nested)]
    pub child: Option<ChildInfo>,
    #[validate(nested)]
    pub pet: Option<PetInfo>,
}

impl Profile {
    pub fn new(user_id: &str, data: ProfileCreate) -> Self {
        Self {
            user_id: user_id.to_string(),
            father: data.father,
            mother: data.mother,
            child: data.child,
            pet: data.pet,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Replace every section present in `update` and stamp the update time.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(father) = update.father {
            self.father = father;
        }
        if let Some(mother) = update.mother {
            self.mother = mother;
        }
        if let Some(child) = update.child {
            self.child = child;
        }
        if let Some(pet) = update.pet {
            self.pet = Some(pet);
        }
        self.updated_at = Some(Utc::now());
    }
}
