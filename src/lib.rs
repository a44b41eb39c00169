pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use commands::{dispatch, WizardCommand};
pub use error::{ErrorKind, WizardError};
pub use services::api_client::{HttpPromptService, PromptService};
pub use services::clipboard::{ClipboardSink, SystemClipboard};
pub use services::wizard::WizardController;
