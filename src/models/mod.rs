// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models and request schemas.

pub mod profile;
pub mod user;
pub mod validation;

pub use profile::{
    ChildInfo, Gender, ParentInfo, PetInfo, PetType, Profile, ProfileCreate, ProfileUpdate,
};
pub use user::{PasswordReset, User, UserCreate, UserResponse, UserUpdate};
