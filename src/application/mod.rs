// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits above the services and never touches SQL directly
// - Provides the boundary between the terminal and the battle collection
// - Translates typed errors into what the user sees

pub mod console;
pub mod error_handling;
pub mod menu;
pub mod prompt;

pub use console::Console;
pub use error_handling::{retry_message, ErrorResponse, ErrorType};
pub use menu::MenuOption;
pub use prompt::Prompter;
