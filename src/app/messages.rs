//! AppMessage enum for completions of spawned intents.

use crate::error::ClientError;
use crate::models::{EntityId, Identity, Question, Quiz};

/// The user intents the coordinator can run in the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Login,
    Register,
    FetchQuestions,
    FetchQuizzes,
    FetchQuiz,
    SaveQuestion,
    SaveQuiz,
    DeleteQuestion,
    DeleteQuiz,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Login => "login",
            Intent::Register => "register",
            Intent::FetchQuestions => "fetch_questions",
            Intent::FetchQuizzes => "fetch_quizzes",
            Intent::FetchQuiz => "fetch_quiz",
            Intent::SaveQuestion => "save_question",
            Intent::SaveQuiz => "save_quiz",
            Intent::DeleteQuestion => "delete_question",
            Intent::DeleteQuiz => "delete_quiz",
        }
    }
}

/// Messages sent when a spawned intent resolves. The caches and session
/// are already updated by the time a message arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    SignedIn(Identity),
    Registered { username: String },
    QuestionsLoaded { count: usize },
    QuizzesLoaded { count: usize },
    /// The quiz fetched into the quiz cache's focused slot
    QuizLoaded(Quiz),
    QuestionSaved(Question),
    QuizSaved(Quiz),
    QuestionDeleted(EntityId),
    QuizDeleted(EntityId),
    Failed { intent: Intent, error: ClientError },
}

impl AppMessage {
    pub fn is_failure(&self) -> bool {
        matches!(self, AppMessage::Failed { .. })
    }
}
