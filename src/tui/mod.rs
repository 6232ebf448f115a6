mod form;
mod theme;
mod widgets;

pub use form::{run_form, show_notice, TuiNotifier};
pub use theme::Theme;
pub use widgets::{FormField, FormState, FormValues};
