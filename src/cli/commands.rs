//! Handlers for the quizbank subcommands.
//!
//! Handlers write to any `Write` and read answers from any `BufRead`, so
//! they run the same against a terminal and in tests.

use std::io::{BufRead, Write};

use color_eyre::eyre::{eyre, Result};

use crate::app::QuizClient;
use crate::models::{Credentials, EntityId, QuestionRef, Quiz};
use crate::session::Access;
use crate::validation::RegistrationDraft;

pub async fn login<W: Write>(client: &QuizClient, credentials: Credentials, out: &mut W) -> Result<()> {
    let identity = client.session().login(&credentials).await?;
    let role = if identity.is_admin { " (admin)" } else { "" };
    writeln!(out, "Signed in as {}{}", identity.username, role)?;
    Ok(())
}

pub async fn register<W: Write>(
    client: &QuizClient,
    username: String,
    password: String,
    out: &mut W,
) -> Result<()> {
    let draft = RegistrationDraft::new(username, password.clone(), password);
    let credentials = draft.to_credentials()?;
    client.session().register(&credentials).await?;
    client.session().clear_register_success();
    writeln!(
        out,
        "Account {} created. Sign in with `quizbank login`.",
        credentials.username
    )?;
    Ok(())
}

pub fn logout<W: Write>(client: &QuizClient, out: &mut W) -> Result<()> {
    client.session().logout();
    writeln!(out, "Signed out")?;
    Ok(())
}

pub fn whoami<W: Write>(client: &QuizClient, out: &mut W) -> Result<()> {
    match client.session().identity() {
        Some(identity) => {
            let role = if identity.is_admin { "admin" } else { "user" };
            writeln!(out, "{} ({}, id {})", identity.username, role, identity.id)?;
        }
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

pub async fn list_quizzes<W: Write>(client: &QuizClient, out: &mut W) -> Result<()> {
    client.session().check(Access::Authenticated)?;
    let quizzes = client.quizzes().fetch_all().await?;
    if quizzes.is_empty() {
        writeln!(out, "No quizzes available")?;
    }
    for quiz in quizzes {
        writeln!(
            out,
            "{:>8}  {}  ({} questions)",
            quiz.id,
            quiz.title,
            quiz.question_count()
        )?;
        if !quiz.description.is_empty() {
            writeln!(out, "          {}", quiz.description)?;
        }
    }
    Ok(())
}

pub async fn list_questions<W: Write>(client: &QuizClient, out: &mut W) -> Result<()> {
    client.session().check(Access::Admin)?;
    let questions = client.questions().fetch_all().await?;
    writeln!(out, "{} question(s) in the bank", questions.len())?;
    for question in questions {
        writeln!(out, "{:>8}  {}", question.id, question.text)?;
        for (index, option) in question.options.iter().enumerate() {
            let mark = if index == question.correct_answer_index { '*' } else { ' ' };
            writeln!(out, "        {} {}. {}", mark, index + 1, option)?;
        }
    }
    Ok(())
}

/// Take a quiz: one prompt per question, answered by option number. A
/// blank line skips the question.
///
/// Questions the server sends as bare ids are looked up in the question
/// bank, which is fetched first when the cache does not hold them.
pub async fn take_quiz<R: BufRead, W: Write>(
    client: &QuizClient,
    quiz_id: &str,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    client.session().check(Access::Authenticated)?;
    let id = EntityId::from(quiz_id);
    let quiz = client.quizzes().fetch_one(&id).await?;
    if has_uncached_refs(client, &quiz) {
        if let Err(e) = client.questions().fetch_all().await {
            tracing::warn!(error = %e, "Could not load the question bank");
        }
    }

    let result = run_attempt(client, quiz, input, out);
    client.quizzes().clear_focused();
    result
}

/// Whether `quiz` references questions by id that the question cache does
/// not hold.
fn has_uncached_refs(client: &QuizClient, quiz: &Quiz) -> bool {
    quiz.questions.iter().any(|q| match q {
        QuestionRef::ById(id) => client.questions().get(id).is_none(),
        QuestionRef::Inline(_) => false,
    })
}

fn run_attempt<R: BufRead, W: Write>(
    client: &QuizClient,
    quiz: Quiz,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if !quiz.is_startable() {
        writeln!(out, "{} has no questions yet", quiz.title)?;
        return Ok(());
    }

    let mut attempt = client.start_attempt(quiz);
    if attempt.questions().all(|(_, question)| question.is_none()) {
        return Err(eyre!(
            "None of the questions in {} could be loaded",
            attempt.quiz().title
        ));
    }
    writeln!(out, "{}", attempt.quiz().title)?;

    let prompts: Vec<(EntityId, Option<Vec<String>>, String)> = attempt
        .questions()
        .map(|(id, question)| {
            (
                id.clone(),
                question.map(|q| q.options.clone()),
                question.map(|q| q.text.clone()).unwrap_or_default(),
            )
        })
        .collect();

    for (number, (id, options, text)) in prompts.iter().enumerate() {
        writeln!(out)?;
        let Some(options) = options else {
            writeln!(out, "{}. (question {} is unavailable)", number + 1, id)?;
            continue;
        };
        writeln!(out, "{}. {}", number + 1, text)?;
        for (index, option) in options.iter().enumerate() {
            writeln!(out, "   {}) {}", index + 1, option)?;
        }

        loop {
            write!(out, "Answer [1-{}, blank to skip]: ", options.len())?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            match line.parse::<usize>() {
                Ok(choice) if choice >= 1 && attempt.select(id, choice - 1) => break,
                _ => writeln!(out, "Enter a number between 1 and {}", options.len())?,
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Answered {} of {}", attempt.answered_count(), attempt.total())?;
    let Some(result) = attempt.submit() else {
        return Err(eyre!("No answers given, nothing to grade"));
    };

    writeln!(out, "Score: {}  {}", result, result.band().message())?;
    for (number, outcome) in result.outcomes.iter().enumerate() {
        let verdict = match (outcome.is_correct, outcome.selected) {
            (true, _) => "correct".to_string(),
            (false, None) => "skipped".to_string(),
            (false, Some(_)) => match outcome.correct_index {
                Some(correct) => format!("wrong, answer was {}", correct + 1),
                None => "wrong".to_string(),
            },
        };
        writeln!(out, "  {}. {}", number + 1, verdict)?;
    }
    Ok(())
}
