//! # Practice Evaluator
//!
//! Client side of the AI answer-evaluation service used by practice sessions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use practice_evaluator::{AnswerEvaluator, EvaluationRequest, HttpEvaluatorClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpEvaluatorClient::new()?.with_base_url("http://localhost:8000");
//!     let evaluation = client
//!         .evaluate(EvaluationRequest {
//!             question_content: "What is a goroutine?".to_string(),
//!             user_answer: "A lightweight thread managed by the Go runtime.".to_string(),
//!             correct_answer: None,
//!             topic: "Golang".to_string(),
//!             level: "Junior".to_string(),
//!             language: "en".to_string(),
//!         })
//!         .await?;
//!
//!     println!("Score: {}", evaluation.score);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::AnswerEvaluator;
pub use error::EvaluatorError;
pub use http::HttpEvaluatorClient;
pub use types::{Evaluation, EvaluationRequest};
