//! # TUI Components
//!
//! UI components for the dashboard.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Header`: Title, subtitle and theme indicator
//! - `Bubble`: A single chat bubble
//! - `Welcome`: Placeholder shown while no number is entered
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `PhoneInput`: Phone number field, reports every edit
//! - `MessagePanel`: Viewer for the current number, scroll state in `ViewerState`
//!
//! Each component file holds its state and event types, rendering, event
//! handling, and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── header.rs        (Top bar)
//! ├── phone_input.rs   (Phone number field)
//! ├── viewer.rs        (Message panel)
//! ├── bubble.rs        (Single message bubble)
//! └── welcome.rs       (Empty-state panel)
//! ```

pub mod bubble;
pub mod header;
pub mod phone_input;
pub mod viewer;
pub mod welcome;

pub use bubble::Bubble;
pub use header::Header;
pub use phone_input::{PhoneEvent, PhoneInput};
pub use viewer::{MessagePanel, ViewerState};
pub use welcome::Welcome;
