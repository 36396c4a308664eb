//! Reusable control widgets.
//!
//! Widgets render from borrowed data and keep any local UI state in a small
//! `*State` struct. They report what should happen as intents and never
//! touch dashboard state directly.

pub mod button;
pub mod dropdown;
pub mod input;
pub mod modal;

pub use button::{Button, ButtonSize, ButtonVariant};
pub use dropdown::{Dropdown, DropdownIntent, DropdownItem, DropdownMenu, DropdownState};
pub use input::{Input, InputRules};
pub use modal::{Modal, ModalElement, ModalIntent, ModalLayout, ModalState};
