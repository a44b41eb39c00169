pub mod api_client;
pub mod clipboard;
pub mod markup;
pub mod renderer;
pub mod wizard;
