//! UI Components

pub mod banner;
pub mod user_form;
pub mod users_table;

pub use banner::ErrorBanner;
pub use user_form::UserForm;
pub use users_table::UsersTable;
