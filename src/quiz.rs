mod answers;
pub mod loader;
mod question;
mod score;

pub use answers::AnswerSheet;
pub use question::{AnswerValue, Question, QuestionType, Quiz};
pub use score::{QuestionResult, QuizResult, grade};
