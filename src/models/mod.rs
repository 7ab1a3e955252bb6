pub mod chat;
pub mod question;

pub use chat::{
    ChatReply, ChatRequest, ChatResponse, ChatRole, ChatTurn, Generation, HistoryEntry,
};
pub use question::{AllQuestions, Question};
