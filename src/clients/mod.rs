pub mod cohere_client;
pub mod openai_client;

pub use cohere_client::{ChatTransport, CohereClient};
pub use openai_client::{CompletionTransport, OpenAiClient, StructuredRequest};
