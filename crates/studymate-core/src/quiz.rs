//! Quiz model and client-side scoring.
//!
//! The generation endpoint returns the quiz as a JSON document carried
//! inside a string field; [`Quiz::from_generated`] parses that payload.
//! Scoring happens client-side; only the resulting count is submitted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::InvalidInputError;

/// A generated multiple-choice quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// The questions in presentation order.
    pub questions: Vec<Question>,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// Choice key (`"A"`..`"D"`) to choice text.
    pub options: BTreeMap<String, String>,
    /// The key of the correct choice.
    pub correct_answer: String,
}

/// The user's chosen answers, keyed by question index.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: BTreeMap<usize, String>,
}

impl AnswerSheet {
    /// Create an empty answer sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the answer to a question.
    pub fn answer(&mut self, question: usize, choice: impl Into<String>) {
        self.answers.insert(question, choice.into());
    }

    /// The recorded answer for a question, if any.
    pub fn get(&self, question: usize) -> Option<&str> {
        self.answers.get(&question).map(String::as_str)
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether no question has been answered.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Quiz {
    /// Parse the generation endpoint's payload.
    ///
    /// The payload is JSON carried as a string; older backend responses
    /// occasionally retain a markdown code fence around it, which is
    /// stripped before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::GeneratedContent`] if the payload does
    /// not parse or contains no questions.
    pub fn from_generated(raw: &str) -> Result<Self> {
        let body = strip_code_fence(raw.trim());
        let quiz: Quiz =
            serde_json::from_str(body).map_err(|e| InvalidInputError::GeneratedContent {
                reason: e.to_string(),
            })?;

        if quiz.questions.is_empty() {
            return Err(InvalidInputError::GeneratedContent {
                reason: "quiz contains no questions".to_string(),
            }
            .into());
        }

        Ok(quiz)
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the quiz has no questions (never true after parsing).
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Whether every question has a recorded answer.
    ///
    /// Submission is gated on this: partial sheets are not scored.
    pub fn is_complete(&self, answers: &AnswerSheet) -> bool {
        (0..self.questions.len()).all(|i| answers.get(i).is_some())
    }

    /// Count of answers matching the correct choice key.
    pub fn score(&self, answers: &AnswerSheet) -> u32 {
        self.questions
            .iter()
            .enumerate()
            .filter(|(i, q)| answers.get(*i) == Some(q.correct_answer.as_str()))
            .count() as u32
    }
}

/// Strip a surrounding markdown code fence, if present.
pub(crate) fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    match rest.strip_suffix("```") {
        Some(body) => body.trim(),
        None => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_question_quiz() -> Quiz {
        let questions = (0..5)
            .map(|i| Question {
                question: format!("Question {i}"),
                options: BTreeMap::from([
                    ("A".to_string(), "first".to_string()),
                    ("B".to_string(), "second".to_string()),
                    ("C".to_string(), "third".to_string()),
                    ("D".to_string(), "fourth".to_string()),
                ]),
                correct_answer: "B".to_string(),
            })
            .collect();
        Quiz { questions }
    }

    #[test]
    fn four_correct_answers_score_four() {
        let quiz = five_question_quiz();
        let mut answers = AnswerSheet::new();
        for i in 0..4 {
            answers.answer(i, "B");
        }
        answers.answer(4, "C");

        assert_eq!(quiz.score(&answers), 4);
    }

    #[test]
    fn unanswered_questions_score_zero() {
        let quiz = five_question_quiz();
        assert_eq!(quiz.score(&AnswerSheet::new()), 0);
    }

    #[test]
    fn completeness_requires_every_question() {
        let quiz = five_question_quiz();
        let mut answers = AnswerSheet::new();
        for i in 0..4 {
            answers.answer(i, "A");
        }
        assert!(!quiz.is_complete(&answers));

        answers.answer(4, "A");
        assert!(quiz.is_complete(&answers));
    }

    #[test]
    fn reanswering_replaces_previous_choice() {
        let quiz = five_question_quiz();
        let mut answers = AnswerSheet::new();
        for i in 0..5 {
            answers.answer(i, "A");
        }
        assert_eq!(quiz.score(&answers), 0);

        answers.answer(2, "B");
        assert_eq!(quiz.score(&answers), 1);
        assert_eq!(answers.len(), 5);
    }

    #[test]
    fn parses_generated_payload() {
        let raw = r#"{"questions":[{"question":"What is 2+2?","options":{"A":"3","B":"4","C":"5","D":"6"},"correct_answer":"B"}]}"#;
        let quiz = Quiz::from_generated(raw).unwrap();
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, "B");
    }

    #[test]
    fn parses_fenced_payload() {
        let raw = "```json\n{\"questions\":[{\"question\":\"q\",\"options\":{\"A\":\"x\"},\"correct_answer\":\"A\"}]}\n```";
        let quiz = Quiz::from_generated(raw).unwrap();
        assert_eq!(quiz.len(), 1);
    }

    #[test]
    fn rejects_empty_question_list() {
        assert!(Quiz::from_generated(r#"{"questions":[]}"#).is_err());
    }

    #[test]
    fn rejects_non_json_payload() {
        assert!(Quiz::from_generated("Sorry, I could not generate a quiz.").is_err());
    }
}
