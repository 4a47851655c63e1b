//! # Menu Commands
//!
//! Listing the catalog and editing it as a batch.
//!
//! ## Edit Lifecycle
//! ```text
//! ┌──────────┐  menu edit   ┌──────────────┐  menu save    ┌──────────────┐
//! │   Live   │─────────────►│    Draft     │──────────────►│ Live (saved) │
//! │   menu   │              │ name / price │               │  + persisted │
//! └──────────┘◄─────────────│ new / drop   │               └──────────────┘
//!              menu cancel  └──────────────┘
//! ```

use std::fmt::Write;

use quickbill_core::document::MENU_KEY;
use quickbill_core::{Draft, Menu};
use tracing::info;

use crate::cli::join_words;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Numbered listing of a menu.
pub fn render_menu(title: &str, menu: &Menu) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    if menu.is_empty() {
        let _ = writeln!(out, "  (no items)");
    }
    for (i, item) in menu.items().iter().enumerate() {
        let name = if item.name.trim().is_empty() {
            "(blank)"
        } else {
            item.name.as_str()
        };
        let _ = writeln!(out, "{:>3}. {:<24}{:>10}", i + 1, name, item.price.to_string());
    }
    out
}

/// Shows the draft while editing, otherwise the live menu.
pub fn show(state: &AppState) -> String {
    match state.menu.draft() {
        Ok(draft) => render_menu("MENU (draft, unsaved)", draft),
        Err(_) => render_menu("MENU", state.menu.live()),
    }
}

/// Starts (or restarts) a draft from the live menu.
pub fn edit(state: &mut AppState) -> String {
    let draft = state.menu.begin_edit();
    let mut out = render_menu("MENU (draft, unsaved)", draft);
    out.push_str("Editing menu. `menu save` keeps the changes, `menu cancel` drops them.\n");
    out
}

pub fn rename(state: &mut AppState, row: usize, words: &[String]) -> AppResult<String> {
    let name = join_words(words);
    state.menu.draft_mut()?.set_name(row, name.as_str())?;
    Ok(format!("Row {} renamed to {}\n", row, name))
}

pub fn reprice(state: &mut AppState, row: usize, raw: &str) -> AppResult<String> {
    let draft = state.menu.draft_mut()?;
    draft.set_price(row, raw)?;
    let price = draft
        .by_position(row)
        .map(|item| item.price.to_string())
        .unwrap_or_default();
    Ok(format!("Row {} price set to {}\n", row, price))
}

pub fn add_row(state: &mut AppState) -> AppResult<String> {
    let row = state.menu.draft_mut()?.add_blank();
    Ok(format!("Added blank row {}\n", row))
}

pub fn drop_row(state: &mut AppState, row: usize) -> AppResult<String> {
    let removed = state.menu.draft_mut()?.remove_row(row)?;
    Ok(format!("Removed row {} ({})\n", row, removed.name))
}

/// Persists the finalized draft, then makes it live.
///
/// The live menu is only replaced once the store accepted the document.
pub async fn save(state: &mut AppState) -> AppResult<String> {
    let finalized = state.menu.draft()?.clone().finalize();
    state.db.save_document(MENU_KEY, &finalized).await?;

    let live = state.menu.commit()?;
    info!(items = live.len(), "Menu saved");
    Ok(render_menu("MENU (saved)", live))
}

pub fn cancel(state: &mut AppState) -> AppResult<String> {
    if state.menu.cancel() {
        Ok("Menu changes discarded\n".to_string())
    } else {
        Err(AppError::from(quickbill_core::CoreError::NotEditing {
            what: <Menu as Draft>::LABEL,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::test_support::state_in;
    use quickbill_core::{MenuItem, Money};
    use std::path::Path;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[tokio::test]
    async fn test_save_filters_and_persists() {
        let (mut state, _events) = state_in(Path::new(".")).await;

        edit(&mut state);
        {
            let draft = state.menu.draft_mut().unwrap();
            *draft = Menu::new(vec![
                MenuItem::new("", Money::from_rupees(5)),
                MenuItem::new("Tea", Money::from_rupees(15)),
            ]);
        }
        save(&mut state).await.unwrap();

        assert_eq!(state.menu.live().len(), 1);
        let stored = state.db.inner().documents().get(MENU_KEY).await.unwrap();
        assert_eq!(stored.as_deref(), Some(r#"[{"name":"Tea","price":15}]"#));
    }

    #[tokio::test]
    async fn test_row_edits_through_commands() {
        let (mut state, _events) = state_in(Path::new(".")).await;

        edit(&mut state);
        rename(&mut state, 2, &words("Onion  Kachori")).unwrap();
        reprice(&mut state, 2, "22.5").unwrap();
        assert_eq!(add_row(&mut state).unwrap(), "Added blank row 7\n");
        save(&mut state).await.unwrap();

        let item = state.menu.live().by_position(2).unwrap();
        assert_eq!(item.name, "Onion Kachori");
        assert_eq!(item.price, Money::from_paise(2250));
        // The blank row is dropped on save.
        assert_eq!(state.menu.live().len(), 6);
    }

    #[tokio::test]
    async fn test_bad_row_is_a_validation_error() {
        let (mut state, _events) = state_in(Path::new(".")).await;
        edit(&mut state);

        let err = drop_row(&mut state, 42).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.menu.draft().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_cancel_keeps_live_menu() {
        let (mut state, _events) = state_in(Path::new(".")).await;
        edit(&mut state);
        drop_row(&mut state, 1).unwrap();

        cancel(&mut state).unwrap();
        assert_eq!(state.menu.live(), &Menu::default());
        assert!(cancel(&mut state).is_err());
        assert!(show(&state).starts_with("MENU\n"));
    }

    #[tokio::test]
    async fn test_saving_unchanged_menu_twice_stores_same_document() {
        let (mut state, _events) = state_in(Path::new(".")).await;

        edit(&mut state);
        save(&mut state).await.unwrap();
        let first = state.db.inner().documents().get(MENU_KEY).await.unwrap();

        edit(&mut state);
        save(&mut state).await.unwrap();
        let second = state.db.inner().documents().get(MENU_KEY).await.unwrap();

        assert!(first.is_some());
        assert_eq!(first, second);
        assert_eq!(state.menu.live(), &Menu::default());
    }

    #[tokio::test]
    async fn test_huge_price_is_capped_and_billable() {
        let (mut state, _events) = state_in(Path::new(".")).await;

        edit(&mut state);
        reprice(&mut state, 1, "1e300").unwrap();
        save(&mut state).await.unwrap();

        let item = state.menu.live().by_position(1).unwrap().clone();
        assert_eq!(item.price, Money::MAX_PRICE);

        state.order.add_item(&item);
        state.order.add_item(&item);
        assert_eq!(state.order.total(), Money::MAX_PRICE.multiply_quantity(2));
    }
}
