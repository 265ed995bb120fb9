// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User records keyed by mobile phone (unique) and email (unique).

use super::store::{page, JsonFile, Mutation};
use super::StoreError;
use crate::models::{User, UserCreate, UserUpdate};
use crate::services::auth::{hash_password_blocking, verify_password_blocking, AuthScheme};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

const DUPLICATE_PHONE: &str = "User with this mobile phone already exists";
const DUPLICATE_EMAIL: &str = "User with this email already exists";

/// User store backed by one JSON file.
pub struct UserStore {
    file: JsonFile<User>,
    auth: Arc<dyn AuthScheme>,
}

impl UserStore {
    pub async fn open(
        path: impl AsRef<Path>,
        auth: Arc<dyn AuthScheme>,
    ) -> Result<Self, StoreError> {
        let file = JsonFile::open(path).await?;
        tracing::info!(path = %file.path().display(), "User store opened");
        Ok(Self { file, auth })
    }

    async fn hash(&self, password: &str) -> Result<String, StoreError> {
        hash_password_blocking(self.auth.clone(), password.to_string())
            .await
            .map_err(|e| StoreError::Hash(e.to_string()))
    }

    /// Register a new user. Fails with [`StoreError::Duplicate`] if the
    /// phone or email is taken.
    pub async fn create(&self, data: UserCreate) -> Result<User, StoreError> {
        let hashed_password = self.hash(&data.password).await?;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            mobile_phone: data.mobile_phone,
            email: data.email,
            name: data.name,
            is_active: data.is_active,
            hashed_password,
            created_at: Utc::now(),
            updated_at: None,
        };

        let user = self
            .file
            .mutate(move |users| {
                if users.iter().any(|u| u.mobile_phone == user.mobile_phone) {
                    return Err(StoreError::Duplicate(DUPLICATE_PHONE.to_string()));
                }
                if users.iter().any(|u| u.email == user.email) {
                    return Err(StoreError::Duplicate(DUPLICATE_EMAIL.to_string()));
                }
                users.push(user.clone());
                Ok(Mutation::Changed(user))
            })
            .await?;

        tracing::info!(user_id = %user.id, mobile_phone = %user.mobile_phone, "User created");
        Ok(user)
    }

    pub async fn get_by_phone(&self, mobile_phone: &str) -> Result<Option<User>, StoreError> {
        let users = self.file.load().await?;
        Ok(users.into_iter().find(|u| u.mobile_phone == mobile_phone))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.file.load().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Merge the supplied fields into the user. Returns `None` if no user
    /// has `mobile_phone`. An empty update returns the user untouched.
    pub async fn update(
        &self,
        mobile_phone: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, StoreError> {
        let updated = self
            .file
            .mutate(|users| {
                let Some(index) = users.iter().position(|u| u.mobile_phone == mobile_phone) else {
                    return Ok(Mutation::Unchanged(None));
                };

                if update.is_empty() {
                    return Ok(Mutation::Unchanged(Some(users[index].clone())));
                }

                if let Some(phone) = &update.mobile_phone {
                    if held_by_other(&users[..], index, |other| &other.mobile_phone == phone) {
                        return Err(StoreError::Duplicate(DUPLICATE_PHONE.to_string()));
                    }
                }
                if let Some(email) = &update.email {
                    if held_by_other(&users[..], index, |other| &other.email == email) {
                        return Err(StoreError::Duplicate(DUPLICATE_EMAIL.to_string()));
                    }
                }

                let user = &mut users[index];
                if let Some(phone) = update.mobile_phone {
                    user.mobile_phone = phone;
                }
                if let Some(email) = update.email {
                    user.email = email;
                }
                if let Some(name) = update.name {
                    user.name = name;
                }
                if let Some(is_active) = update.is_active {
                    user.is_active = is_active;
                }
                user.updated_at = Some(Utc::now());

                Ok(Mutation::Changed(Some(user.clone())))
            })
            .await?;

        if let Some(user) = &updated {
            tracing::info!(user_id = %user.id, mobile_phone = %user.mobile_phone, "User updated");
        }
        Ok(updated)
    }

    /// Remove the user. Returns `false` if absent. Profiles are untouched.
    pub async fn delete(&self, mobile_phone: &str) -> Result<bool, StoreError> {
        let deleted = self
            .file
            .mutate(|users| match users.iter().position(|u| u.mobile_phone == mobile_phone) {
                Some(index) => {
                    users.remove(index);
                    Ok(Mutation::Changed(true))
                }
                None => Ok(Mutation::Unchanged(false)),
            })
            .await?;

        if deleted {
            tracing::info!(mobile_phone, "User deleted");
        }
        Ok(deleted)
    }

    /// Users in file order, `skip` then at most `limit`.
    pub async fn list(&self, skip: usize, limit: usize) -> Result<Vec<User>, StoreError> {
        let users = self.file.load().await?;
        Ok(page(&users, skip, limit))
    }

    /// Return the user if `password` matches the stored hash.
    pub async fn authenticate(
        &self,
        mobile_phone: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        let Some(user) = self.get_by_phone(mobile_phone).await? else {
            return Ok(None);
        };

        let matches = verify_password_blocking(
            self.auth.clone(),
            password.to_string(),
            user.hashed_password.clone(),
        )
        .await;

        Ok(matches.then_some(user))
    }

    /// Replace the password hash. Returns `false` if no such user.
    pub async fn reset_password(
        &self,
        mobile_phone: &str,
        new_password: &str,
    ) -> Result<bool, StoreError> {
        let hashed_password = self.hash(new_password).await?;

        let reset = self
            .file
            .mutate(move |users| {
                match users.iter_mut().find(|u| u.mobile_phone == mobile_phone) {
                    Some(user) => {
                        user.hashed_password = hashed_password;
                        user.updated_at = Some(Utc::now());
                        Ok(Mutation::Changed(true))
                    }
                    None => Ok(Mutation::Unchanged(false)),
                }
            })
            .await?;

        if reset {
            tracing::info!(mobile_phone, "Password reset");
        }
        Ok(reset)
    }

    pub async fn exists(&self, mobile_phone: &str) -> Result<bool, StoreError> {
        Ok(self.get_by_phone(mobile_phone).await?.is_some())
    }
}

/// True if any user other than `users[index]` satisfies `pred`.
fn held_by_other(users: &[User], index: usize, pred: impl Fn(&User) -> bool) -> bool {
    users
        .iter()
        .enumerate()
        .any(|(i, other)| i != index && pred(other))
}
