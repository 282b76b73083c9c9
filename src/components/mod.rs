//! UI Components
//!
//! Leptos views over the panel controllers.

mod confirm_delete;
mod modal_host;
mod panel_tab_bar;
mod rating_input;
mod resource_card;
mod resource_form;
mod resource_panel;
mod toast_host;

pub use confirm_delete::ConfirmDelete;
pub use modal_host::ModalHost;
pub use panel_tab_bar::PanelTabBar;
pub use rating_input::RatingInput;
pub use resource_card::{ItemDetail, ResourceCard};
pub use resource_form::ResourceForm;
pub use resource_panel::ResourcePanel;
pub use toast_host::ToastHost;
