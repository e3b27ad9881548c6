// ABOUTME: Session commands for the metafit CLI
// ABOUTME: login, register, logout, and whoami on top of the session manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit

use super::Context;
use crate::helpers::display::display_user;
use metafit_client::errors::{AppError, AppResult};
use metafit_client::forms::{LoginForm, RegisterForm};
use tracing::info;

/// Log in and persist the session
pub async fn login(ctx: &Context, email: &str, password: &str) -> AppResult<()> {
    let request = LoginForm {
        email: email.to_owned(),
        password: password.to_owned(),
    }
    .validate()
    .map_err(AppError::from)?;

    let user = ctx.session.login(&request.email, &request.password).await?;
    info!(user.id = %user.id, "Logged in");
    println!("Logged in as {}", user.display_name());
    Ok(())
}

/// Register, then log into the new account
pub async fn register(ctx: &Context, form: &RegisterForm) -> AppResult<()> {
    let request = form.validate().map_err(AppError::from)?;
    let user = ctx.session.register(&request).await?;
    println!("Welcome to Metafit, {}!", user.display_name());
    Ok(())
}

/// Forget the stored session
pub async fn logout(ctx: &Context) {
    ctx.session.logout().await;
    println!("Logged out");
}

/// Print the profile behind the stored session
pub async fn whoami(ctx: &Context) -> AppResult<()> {
    let user = ctx.require_user().await?;
    display_user(&user);
    Ok(())
}
