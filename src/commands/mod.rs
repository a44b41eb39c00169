pub mod wizard;

pub use wizard::{dispatch, parse_line, ConsoleInput, WizardCommand};
