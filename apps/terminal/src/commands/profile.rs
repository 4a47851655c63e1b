//! # Restaurant Profile Commands
//!
//! Same edit, save and cancel contract as the menu, on a single record.

use std::fmt::Write;

use quickbill_core::document::RESTAURANT_KEY;
use quickbill_core::{CoreError, Draft, RestaurantDetails, RestaurantField};
use tracing::info;

use crate::cli::join_words;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn render_profile(title: &str, profile: &RestaurantDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    for (field, value) in [
        (RestaurantField::Name, &profile.name),
        (RestaurantField::Tagline, &profile.tagline),
        (RestaurantField::Address, &profile.address),
        (RestaurantField::Gstin, &profile.gstin),
    ] {
        let _ = writeln!(out, "  {:<9}{}", field.to_string(), value);
    }
    out
}

pub fn show(state: &AppState) -> String {
    match state.restaurant.draft() {
        Ok(draft) => render_profile("PROFILE (draft, unsaved)", draft),
        Err(_) => render_profile("PROFILE", state.restaurant.live()),
    }
}

pub fn edit(state: &mut AppState) -> String {
    let draft = state.restaurant.begin_edit();
    let mut out = render_profile("PROFILE (draft, unsaved)", draft);
    out.push_str("Editing profile. `profile save` keeps the changes, `profile cancel` drops them.\n");
    out
}

/// Sets one draft field. Values are free text and may be empty.
pub fn set(state: &mut AppState, field: RestaurantField, words: &[String]) -> AppResult<String> {
    let value = join_words(words);
    state.restaurant.draft_mut()?.set(field, value.as_str());
    Ok(format!("{} set to \"{}\"\n", field, value))
}

pub async fn save(state: &mut AppState) -> AppResult<String> {
    let finalized = state.restaurant.draft()?.clone().finalize();
    state.db.save_document(RESTAURANT_KEY, &finalized).await?;

    let live = state.restaurant.commit()?;
    info!(restaurant = %live.name, "Restaurant profile saved");
    Ok(render_profile("PROFILE (saved)", live))
}

pub fn cancel(state: &mut AppState) -> AppResult<String> {
    if state.restaurant.cancel() {
        Ok("Profile changes discarded\n".to_string())
    } else {
        Err(AppError::from(CoreError::NotEditing {
            what: <RestaurantDetails as Draft>::LABEL,
        }))
    }
}
