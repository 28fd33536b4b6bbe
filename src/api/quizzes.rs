//! Quiz endpoints (/api/quizzes/)

use anyhow::{Context, Result};
use serde_json::json;

use super::YonnaClient;
use crate::models::{ListResponse, Quiz, QuizResult};

/// List available quizzes.
pub async fn list_quizzes() -> Result<()> {
    let client = YonnaClient::new()?;
    let quizzes = client
        .get_json::<ListResponse<Quiz>>("/api/quizzes/available/")
        .await?
        .into_results();

    println!("\nAvailable Quizzes:");
    println!("{:-<60}", "");
    if quizzes.is_empty() {
        println!("  (no quizzes yet)");
        return Ok(());
    }
    for quiz in &quizzes {
        println!("{} (#{})", quiz.title, quiz.id);
        if let Some(questions) = &quiz.questions {
            println!("  Questions: {}", questions.len());
        }
    }
    Ok(())
}

/// Show one quiz with its questions and answer options.
pub async fn show_quiz(id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    let quiz: Quiz = client
        .get_json(&format!("/api/quizzes/{}/", id))
        .await?;

    println!("\n{} (#{})", quiz.title, quiz.id);
    match &quiz.questions {
        Some(questions) if !questions.is_empty() => {
            for (i, q) in questions.iter().enumerate() {
                println!("  {}. {}", i + 1, q.text);
                if let Some(answers) = &q.answers {
                    for a in answers {
                        println!("     - {}", a.text);
                    }
                }
            }
        }
        _ => println!("  (no questions)"),
    }
    Ok(())
}

/// Submit a quiz score.
pub async fn submit_attempt(quiz_id: u64, score: i64) -> Result<()> {
    let client = YonnaClient::new()?;
    client
        .send(
            super::request::ApiRequest::post("/api/quizzes/attempt/").json(json!({
                "quiz": quiz_id,
                "score": score,
            })),
        )
        .await
        .context("Quiz submission failed")?;
    println!("Recorded attempt for quiz #{} ({} pts).", quiz_id, score);
    Ok(())
}

/// Show the current user's quiz history.
pub async fn quiz_history() -> Result<()> {
    let client = YonnaClient::new()?;
    let results = client
        .get_json::<ListResponse<QuizResult>>("/api/quizzes/history/")
        .await?
        .into_results();

    println!("\nQuiz History:");
    println!("{:-<60}", "");
    if results.is_empty() {
        println!("  (no attempts yet)");
        return Ok(());
    }
    for result in &results {
        let when = result.completed_at.as_deref().unwrap_or("-");
        println!("{:<40} {:>5} pts  {}", result.quiz_title(), result.score, when);
    }
    Ok(())
}
