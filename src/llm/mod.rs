pub mod generator;
pub mod models;
pub mod response;

pub use generator::{ChatCompletionsGenerator, StructuredGenerator};
pub use models::RequestBody;
