// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile records, at most one per user id.

use super::store::{page, JsonFile, Mutation};
use super::StoreError;
use crate::models::{Profile, ProfileCreate, ProfileUpdate};
use std::path::Path;

const DUPLICATE_PROFILE: &str = "Profile already exists for this user";

/// Profile store backed by one JSON file.
pub struct ProfileStore {
    file: JsonFile<Profile>,
}

impl ProfileStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file = JsonFile::open(path).await?;
        tracing::info!(path = %file.path().display(), "Profile store opened");
        Ok(Self { file })
    }

    /// Create the profile for `user_id`; a user may only have one.
    pub async fn create(&self, user_id: &str, data: ProfileCreate) -> Result<Profile, StoreError> {
        let profile = Profile::new(user_id, data);

        let profile = self
            .file
            .mutate(move |profiles| {
                if profiles.iter().any(|p| p.user_id == profile.user_id) {
                    return Err(StoreError::Duplicate(DUPLICATE_PROFILE.to_string()));
                }
                profiles.push(profile.clone());
                Ok(Mutation::Changed(profile))
            })
            .await?;

        tracing::info!(user_id, "Profile created");
        Ok(profile)
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let profiles = self.file.load().await?;
        Ok(profiles.into_iter().find(|p| p.user_id == user_id))
    }

    /// Replace the supplied sections. Returns `None` if no profile exists.
    pub async fn update(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Option<Profile>, StoreError> {
        let updated = self
            .file
            .mutate(move |profiles| match profiles.iter_mut().find(|p| p.user_id == user_id) {
                Some(profile) => {
                    profile.apply(update);
                    Ok(Mutation::Changed(Some(profile.clone())))
                }
                None => Ok(Mutation::Unchanged(None)),
            })
            .await?;

        if updated.is_some() {
            tracing::info!(user_id, "Profile updated");
        }
        Ok(updated)
    }

    /// Remove the profile. Returns `false` if absent.
    pub async fn delete(&self, user_id: &str) -> Result<bool, StoreError> {
        let deleted = self
            .file
            .mutate(|profiles| match profiles.iter().position(|p| p.user_id == user_id) {
                Some(index) => {
                    profiles.remove(index);
                    Ok(Mutation::Changed(true))
                }
                None => Ok(Mutation::Unchanged(false)),
            })
            .await?;

        if deleted {
            tracing::info!(user_id, "Profile deleted");
        }
        Ok(deleted)
    }

    pub async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Profile>, StoreError> {
        let profiles = self.file.load().await?;
        Ok(page(&profiles, skip, limit))
    }
}
