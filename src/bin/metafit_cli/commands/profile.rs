// ABOUTME: Profile commands for the metafit CLI
// ABOUTME: Merges the given fields into the current profile and sends a validated update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::Context;
use crate::helpers::display::display_user;
use metafit_client::errors::{AppError, AppResult};
use metafit_client::forms::ProfileForm;
use metafit_client::models::User;

/// Fields given on the command line; `None` keeps the current value
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub target_weight: Option<String>,
}

impl ProfileChanges {
    /// Profile editor pre-filled from `user`, overridden by the given fields
    fn into_form(self, user: &User) -> ProfileForm {
        ProfileForm {
            full_name: self.full_name.unwrap_or_else(|| user.full_name.clone()),
            age: self.age.unwrap_or_else(|| user.age.to_string()),
            weight: self.weight.unwrap_or_else(|| user.weight.to_string()),
            height: self.height.unwrap_or_else(|| user.height.to_string()),
            target_weight: self
                .target_weight
                .unwrap_or_else(|| user.target_weight.to_string()),
        }
    }
}

/// Apply profile changes
pub async fn update(ctx: &Context, changes: ProfileChanges) -> AppResult<()> {
    let current = ctx.require_user().await?;
    let patch = changes
        .into_form(&current)
        .validate()
        .map_err(AppError::from)?;

    let updated = ctx.session.update_user(&patch).await?;
    println!("Profile updated\n");
    display_user(&updated);
    Ok(())
}
