pub mod chat_service;
pub mod image_reader;
pub mod prompts;
pub mod question_splitter;
pub mod response_normalizer;

pub use chat_service::ChatInvoker;
pub use image_reader::ImageQuestionExtractor;
pub use question_splitter::QuestionSplitter;
pub use response_normalizer::normalize;
