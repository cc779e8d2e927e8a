//! # Core Application Logic
//!
//! This module contains the dashboard's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No HTTP.  │
//!                    └───────────┬─────────────┘
//!                                │
//!               ┌────────────────┴────────────────┐
//!               ▼                                 ▼
//!        ┌────────────┐                    ┌────────────┐
//!        │    TUI     │                    │   remote   │
//!        │  Adapter   │                    │  (reqwest) │
//!        │ (ratatui)  │                    │            │
//!        └────────────┘                    └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the `ViewState` machine states
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`message`]: Display messages and the record transform
//! - [`config`]: Config file, env and CLI resolution
//! - [`preferences`]: The persisted theme flag

pub mod action;
pub mod config;
pub mod message;
pub mod preferences;
pub mod state;
