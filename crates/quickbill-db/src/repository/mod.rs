//! # Repository Module
//!
//! Database repository implementations for QuickBill.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console command                                                        │
//! │       │                                                                 │
//! │       │  db.documents().save("menu", &menu)                             │
//! │       ▼                                                                 │
//! │  DocumentRepository                                                     │
//! │  ├── get(&self, key)                                                    │
//! │  ├── put(&self, key, value)                                             │
//! │  └── load::<T>(&self, key) / save(&self, key, &value)                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DocumentRepository`](documents::DocumentRepository) - Key-value JSON documents

pub mod documents;
