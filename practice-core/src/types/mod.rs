pub mod attempt;
pub mod question;
pub mod session;

pub use attempt::{PracticeAttempt, SuggestedAnswer};
pub use question::{Question, QuestionContent, SampleAnswer, SampleSource};
pub use session::{PracticeSession, RoundAdvance, SessionConfig, SessionMode, SessionStatus};
