//! # State Module
//!
//! Everything the console knows, owned by the console loop and changed only
//! through the command handlers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │   DbState    │  │ Editable<Menu>   │  │ Editable<Restaurant...>  │  │
//! │  │  documents   │  │ live + draft     │  │ live + draft             │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │    Order     │  │ watch::Receiver  │  │        Exporter          │  │
//! │  │  bill lines  │  │ <ClockReading>   │  │  in-flight flag + task   │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │                                                                         │
//! │  Single owner: no Mutex. The clock task and the export task only talk  │
//! │  back through channels.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod db;

pub use db::DbState;

use quickbill_core::document::{MENU_KEY, RESTAURANT_KEY};
use quickbill_core::{ClockReading, Editable, Menu, Order, ReceiptView, RestaurantDetails};
use tokio::sync::watch;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::export::Exporter;

/// Console application state.
pub struct AppState {
    pub db: DbState,
    pub config: AppConfig,
    pub menu: Editable<Menu>,
    pub restaurant: Editable<RestaurantDetails>,
    pub order: Order,
    pub clock: watch::Receiver<ClockReading>,
    pub exporter: Exporter,
}

impl AppState {
    /// Loads the stored menu and profile and starts with an empty order.
    pub async fn load(
        db: DbState,
        config: AppConfig,
        clock: watch::Receiver<ClockReading>,
        exporter: Exporter,
    ) -> AppResult<Self> {
        let menu: Menu = db.load_document(MENU_KEY, Menu::default).await?;
        let restaurant: RestaurantDetails = db
            .load_document(RESTAURANT_KEY, RestaurantDetails::default)
            .await?;

        info!(
            menu_items = menu.len(),
            restaurant = %restaurant.name,
            "Console state loaded"
        );

        Ok(AppState {
            db,
            config,
            menu: Editable::new(menu),
            restaurant: Editable::new(restaurant),
            order: Order::new(),
            clock,
            exporter,
        })
    }

    /// Latest clock reading.
    pub fn reading(&self) -> ClockReading {
        self.clock.borrow().clone()
    }

    /// Snapshot of the receipt for the current order and committed profile.
    pub fn receipt_view(&self) -> ReceiptView {
        ReceiptView::build(
            &self.order,
            self.restaurant.live(),
            &self.reading(),
            &self.config.receipt_meta(),
        )
    }
}
