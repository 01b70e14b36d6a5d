pub mod controller;
pub mod state;

pub use controller::ViewController;
pub use state::{Theme, UserRole, ViewAction, ViewState};
