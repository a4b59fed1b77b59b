//! This crate contains all shared UI for the workspace.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}
pub mod brand_icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

pub mod views;
pub use views::SettingsPage;

mod backend;
pub use backend::{ApiBackend, BrowserNavigator};

pub mod activity_log;
pub use activity_log::{
    ActivityLog, LogLevel, Operation, OperationKind, log_activity, use_activity_log,
};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};

mod ai_panel;
pub use ai_panel::AiPanel;

mod channel_picker;
pub use channel_picker::ChannelPicker;

mod connect_buttons;
pub use connect_buttons::ConnectButtons;

mod login_form;
pub use login_form::LoginForm;

mod template_editor;
pub use template_editor::TemplateEditor;
