pub mod intent;
pub mod prompt;
pub mod session;
pub mod settings;
pub mod view;
pub mod workflow;

pub use intent::*;
pub use prompt::*;
pub use session::*;
pub use settings::*;
pub use view::*;
pub use workflow::*;
