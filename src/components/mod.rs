pub mod lookup_form;
pub mod lookup_screen;
pub mod response_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use lookup_form::{LookupForm, LookupFormProps};
pub use lookup_screen::{LookupScreen, LookupScreenProps};
pub use response_panel::{ResponsePanel, ResponsePanelProps};
