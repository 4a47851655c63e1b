//! # Edit Drafts
//!
//! Edit-then-commit-or-cancel for the menu catalog and restaurant profile.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Editable<T> lifecycle                            │
//! │                                                                         │
//! │   live ──begin_edit()──► live + draft(copy) ──commit()──► finalize(draft)│
//! │    ▲                          │                              │          │
//! │    │                          │ draft_mut() edits            │          │
//! │    │                          ▼                              ▼          │
//! │    └─────────cancel()──── draft dropped              live = finalized   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits only touch the draft. The live value changes in exactly one
//! assignment on commit, so a reader never sees a half-edited menu.

use crate::error::{CoreError, CoreResult};
use crate::types::{Menu, MenuItem, RestaurantDetails};
use crate::validation::{coerce_price, is_blank_name};

/// A value that can be edited as a batch.
pub trait Draft: Clone {
    /// Name used in "not being edited" errors.
    const LABEL: &'static str;

    /// Normalizes a draft before it replaces the live value.
    fn finalize(self) -> Self;
}

impl Draft for Menu {
    const LABEL: &'static str = "Menu";

    /// Drops blank-named rows and later rows repeating an earlier name.
    fn finalize(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.len());
        self.items_mut().retain(|item| {
            if is_blank_name(&item.name) || seen.contains(&item.name) {
                return false;
            }
            seen.push(item.name.clone());
            true
        });
        self
    }
}

impl Draft for RestaurantDetails {
    const LABEL: &'static str = "Restaurant profile";

    fn finalize(self) -> Self {
        self
    }
}

/// A live value with an optional in-progress draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editable<T> {
    live: T,
    draft: Option<T>,
}

impl<T: Draft> Editable<T> {
    /// Wraps a live value, not in edit mode.
    pub fn new(live: T) -> Self {
        Editable { live, draft: None }
    }

    /// The committed value.
    pub fn live(&self) -> &T {
        &self.live
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Starts editing with a fresh copy of the live value.
    ///
    /// Calling this while already editing restarts from the live value.
    pub fn begin_edit(&mut self) -> &mut T {
        self.draft.insert(self.live.clone())
    }

    /// The draft being edited.
    pub fn draft(&self) -> CoreResult<&T> {
        self.draft
            .as_ref()
            .ok_or(CoreError::NotEditing { what: T::LABEL })
    }

    /// Mutable access to the draft being edited.
    pub fn draft_mut(&mut self) -> CoreResult<&mut T> {
        self.draft
            .as_mut()
            .ok_or(CoreError::NotEditing { what: T::LABEL })
    }

    /// Finalizes the draft and makes it the live value.
    ///
    /// Returns the new live value so the caller can persist it.
    pub fn commit(&mut self) -> CoreResult<&T> {
        let draft = self
            .draft
            .take()
            .ok_or(CoreError::NotEditing { what: T::LABEL })?;
        self.live = draft.finalize();
        Ok(&self.live)
    }

    /// Discards the draft. Returns whether a draft existed.
    pub fn cancel(&mut self) -> bool {
        self.draft.take().is_some()
    }
}

// =============================================================================
// Menu draft operations
// =============================================================================

/// Rows are numbered from 1, as listed to the operator.
impl Menu {
    fn row_mut(&mut self, row: usize) -> CoreResult<&mut MenuItem> {
        let rows = self.len();
        match row.checked_sub(1) {
            Some(i) if i < rows => Ok(&mut self.items_mut()[i]),
            _ => Err(CoreError::MenuRowOutOfRange { row, rows }),
        }
    }

    /// Replaces the name of `row` with the raw text.
    pub fn set_name(&mut self, row: usize, name: impl Into<String>) -> CoreResult<()> {
        self.row_mut(row)?.name = name.into();
        Ok(())
    }

    /// Replaces the price of `row`, coercing the input.
    pub fn set_price(&mut self, row: usize, raw: &str) -> CoreResult<()> {
        self.row_mut(row)?.price = coerce_price(raw);
        Ok(())
    }

    /// Appends a blank row. Returns its row number.
    pub fn add_blank(&mut self) -> usize {
        self.items_mut().push(MenuItem::blank());
        self.len()
    }

    /// Removes `row` and returns it.
    pub fn remove_row(&mut self, row: usize) -> CoreResult<MenuItem> {
        let rows = self.len();
        if row == 0 || row > rows {
            return Err(CoreError::MenuRowOutOfRange { row, rows });
        }
        Ok(self.items_mut().remove(row - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::RestaurantField;

    fn tea_menu_with_blank() -> Menu {
        Menu::new(vec![
            MenuItem::new("", Money::from_rupees(5)),
            MenuItem::new("Tea", Money::from_rupees(15)),
        ])
    }

    #[test]
    fn test_commit_drops_blank_rows() {
        let mut menu = Editable::new(Menu::default());
        *menu.begin_edit() = tea_menu_with_blank();

        let saved = menu.commit().unwrap();

        assert_eq!(
            serde_json::to_string(saved).unwrap(),
            r#"[{"name":"Tea","price":15}]"#
        );
        assert!(!menu.is_editing());
    }

    #[test]
    fn test_commit_drops_whitespace_names_and_duplicates() {
        let menu = Menu::new(vec![
            MenuItem::new("Tea", Money::from_rupees(15)),
            MenuItem::new("   ", Money::from_rupees(1)),
            MenuItem::new("Tea", Money::from_rupees(99)),
            MenuItem::new("Coffee", Money::from_rupees(25)),
        ]);

        let finalized = menu.finalize();

        assert_eq!(
            finalized.items(),
            &[
                MenuItem::new("Tea", Money::from_rupees(15)),
                MenuItem::new("Coffee", Money::from_rupees(25)),
            ]
        );
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let once = tea_menu_with_blank().finalize();
        let twice = once.clone().finalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_edits_do_not_touch_live_until_commit() {
        let mut menu = Editable::new(Menu::default());
        let draft = menu.begin_edit();
        draft.set_name(1, "Veg Samosa").unwrap();
        draft.set_price(1, "22").unwrap();

        assert_eq!(menu.live().items()[0].name, "Samosa");

        menu.commit().unwrap();
        assert_eq!(
            menu.live().items()[0],
            MenuItem::new("Veg Samosa", Money::from_rupees(22))
        );
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut menu = Editable::new(Menu::default());
        let draft = menu.begin_edit();
        draft.remove_row(1).unwrap();
        draft.add_blank();

        assert!(menu.cancel());
        assert_eq!(menu.live(), &Menu::default());
        assert!(!menu.cancel());
    }

    #[test]
    fn test_price_input_is_coerced() {
        let mut menu = Menu::default();
        menu.set_price(2, "abc").unwrap();
        menu.set_price(3, "12abc").unwrap();
        assert_eq!(menu.items()[1].price, Money::zero());
        assert_eq!(menu.items()[2].price, Money::from_rupees(12));
    }

    #[test]
    fn test_out_of_range_row_is_rejected() {
        let mut menu = Menu::default();
        let before = menu.clone();

        assert!(matches!(
            menu.set_name(7, "Nope"),
            Err(CoreError::MenuRowOutOfRange { row: 7, rows: 6 })
        ));
        assert!(menu.set_price(0, "5").is_err());
        assert!(menu.remove_row(0).is_err());
        assert!(menu.remove_row(10).is_err());
        assert_eq!(menu, before);
    }

    #[test]
    fn test_add_blank_appends_empty_row() {
        let mut menu = Menu::default();
        let row = menu.add_blank();
        assert_eq!(row, 7);
        assert_eq!(menu.items()[6], MenuItem::blank());
    }

    #[test]
    fn test_operations_outside_edit_mode_fail() {
        let mut profile = Editable::new(RestaurantDetails::default());
        assert!(matches!(
            profile.draft_mut(),
            Err(CoreError::NotEditing { what: "Restaurant profile" })
        ));
        assert!(profile.commit().is_err());
    }

    #[test]
    fn test_profile_commit_keeps_fields_verbatim() {
        let mut profile = Editable::new(RestaurantDetails::default());
        profile
            .begin_edit()
            .set(RestaurantField::Name, "  Chai Point ");

        let saved = profile.commit().unwrap();
        assert_eq!(saved.name, "  Chai Point ");
    }
}
