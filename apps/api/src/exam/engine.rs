//! Exam lifecycle: question delivery, one-time scoring, result lookup.
//!
//! Every operation takes the store by reference; there is no process-wide
//! state. A candidate moves through `registered → questions delivered
//! (repeatable, same order each time) → submitted (terminal)`; the
//! duplicate-submission check inside [`submit`] is the sole enforcement of
//! the terminal state.

use crate::errors::AppError;
use crate::exam::scoring::{tally_answers, QUESTIONS_PER_SECTION};
use crate::exam::shuffle::{seed_for_email, shuffle_with_seed};
use crate::models::{next_id, ExamResult, Question, SubmittedAnswer};
use crate::store::JsonStore;

/// Questions for one candidate in one section.
///
/// Filters the bank by section (case-insensitive, trimmed), shuffles the
/// matches deterministically by the candidate's email, and truncates to 20.
/// Repeated calls return the same ordering. An unknown section yields an
/// empty list, not an error.
pub fn deliver_questions(
    store: &JsonStore,
    section: &str,
    email: &str,
) -> Result<Vec<Question>, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("Email parameter is required".into()));
    }

    let section = section.trim();
    let mut questions: Vec<Question> = store
        .load::<Question>()
        .into_iter()
        .filter(|q| q.section.trim().eq_ignore_ascii_case(section))
        .collect();

    if questions.is_empty() {
        return Ok(Vec::new());
    }

    shuffle_with_seed(&mut questions, seed_for_email(email));
    questions.truncate(QUESTIONS_PER_SECTION);
    Ok(questions)
}

/// Scores a submission and records the result.
///
/// Each candidate may submit exactly once: the duplicate check and the
/// append run under the results-collection lock, so two concurrent
/// submissions for the same email cannot both get through. A persistence
/// failure on the final write is logged inside the store and the computed
/// result is still returned (fire-and-forget write contract).
pub fn submit(
    store: &JsonStore,
    candidate_email: &str,
    answers: &[SubmittedAnswer],
) -> Result<ExamResult, AppError> {
    let email = candidate_email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Invalid submission data.".into()));
    }

    let questions = store.load::<Question>();
    let lowered = email.to_lowercase();

    store.update(|results: &mut Vec<ExamResult>| {
        if results
            .iter()
            .any(|r| r.candidate_email.to_lowercase() == lowered)
        {
            return Err(AppError::Conflict("Exam already submitted.".into()));
        }

        let tally = tally_answers(&questions, answers);
        let result = ExamResult {
            id: next_id(results.iter().map(|r| r.id)),
            candidate_email: email.to_string(),
            aptitude_correct: tally.aptitude,
            reasoning_correct: tally.reasoning,
            communication_correct: tally.communication,
            total_correct: tally.total(),
            percentage: tally.percentage(),
        };
        results.push(result.clone());
        Ok(result)
    })
}

/// All results matching an optional case-insensitive email substring and an
/// optional minimum percentage (default 0), in insertion order.
pub fn search_results(
    store: &JsonStore,
    email_filter: Option<&str>,
    min_percentage: Option<f64>,
) -> Vec<ExamResult> {
    let needle = email_filter.map(str::to_lowercase);
    let threshold = min_percentage.unwrap_or(0.0);

    store
        .load::<ExamResult>()
        .into_iter()
        .filter(|r| {
            let email_ok = needle
                .as_deref()
                .map_or(true, |n| r.candidate_email.to_lowercase().contains(n));
            email_ok && r.percentage >= threshold
        })
        .collect()
}

/// The single result for an email (case-insensitive exact match).
pub fn result_by_email(store: &JsonStore, email: &str) -> Result<ExamResult, AppError> {
    let wanted = email.trim().to_lowercase();
    store
        .load::<ExamResult>()
        .into_iter()
        .find(|r| r.candidate_email.to_lowercase() == wanted)
        .ok_or_else(|| AppError::NotFound("Result not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionId;
    use tempfile::{tempdir, TempDir};

    fn test_store() -> (TempDir, JsonStore) {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn question(id: u64, section: &str) -> Question {
        Question {
            id,
            section: section.to_string(),
            question: format!("Question {id}"),
            option_a: "alpha".into(),
            option_b: "beta".into(),
            option_c: "gamma".into(),
            option_d: "delta".into(),
            correct_option: "A".into(),
        }
    }

    fn seed_bank(store: &JsonStore, counts: &[(&str, u64)]) {
        let mut bank = Vec::new();
        let mut id = 0;
        for (section, n) in counts {
            for _ in 0..*n {
                id += 1;
                bank.push(question(id, section));
            }
        }
        store.save(&bank).unwrap();
    }

    fn correct_answers(ids: std::ops::RangeInclusive<u64>) -> Vec<SubmittedAnswer> {
        ids.map(|id| SubmittedAnswer {
            question_id: QuestionId::Number(id),
            selected_option: "A".into(),
        })
        .collect()
    }

    fn wrong_answers(ids: std::ops::RangeInclusive<u64>) -> Vec<SubmittedAnswer> {
        ids.map(|id| SubmittedAnswer {
            question_id: QuestionId::Number(id),
            selected_option: "B".into(),
        })
        .collect()
    }

    #[test]
    fn test_deliver_requires_email() {
        let (_dir, store) = test_store();
        assert!(matches!(
            deliver_questions(&store, "aptitude", "  "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_deliver_unknown_section_is_empty() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 5)]);
        let delivered = deliver_questions(&store, "history", "a@x.com").unwrap();
        assert!(delivered.is_empty());
    }

    #[test]
    fn test_deliver_truncates_to_twenty() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 35)]);
        let delivered = deliver_questions(&store, "aptitude", "a@x.com").unwrap();
        assert_eq!(delivered.len(), 20);
    }

    #[test]
    fn test_deliver_small_section_returns_all() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 5)]);
        let delivered = deliver_questions(&store, "APTITUDE ", "a@x.com").unwrap();
        assert_eq!(delivered.len(), 5);
    }

    #[test]
    fn test_deliver_is_idempotent_per_email() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 35)]);

        let first = deliver_questions(&store, "aptitude", "a@x.com").unwrap();
        let second = deliver_questions(&store, "aptitude", "A@X.COM ").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_deliver_differs_between_candidates() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 35)]);

        let a: Vec<u64> = deliver_questions(&store, "aptitude", "a@x.com")
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        let b: Vec<u64> = deliver_questions(&store, "aptitude", "b@x.com")
            .unwrap()
            .iter()
            .map(|q| q.id)
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_submit_scores_the_worked_example() {
        // 20 aptitude + 20 reasoning fully correct, 20 communication wrong.
        let (_dir, store) = test_store();
        seed_bank(
            &store,
            &[("Aptitude", 20), ("Reasoning", 20), ("Communication", 20)],
        );

        let mut answers = correct_answers(1..=40);
        answers.extend(wrong_answers(41..=60));

        let result = submit(&store, "a@x.com", &answers).unwrap();
        assert_eq!(result.aptitude_correct, 20);
        assert_eq!(result.reasoning_correct, 20);
        assert_eq!(result.communication_correct, 0);
        assert_eq!(result.total_correct, 40);
        assert_eq!(result.percentage, 66.67);
        assert_eq!(result.id, 1);

        // And the result was durably recorded.
        assert_eq!(store.load::<ExamResult>(), vec![result]);
    }

    #[test]
    fn test_submit_rejects_second_attempt() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 20)]);

        submit(&store, "a@x.com", &correct_answers(1..=20)).unwrap();
        let second = submit(&store, " A@x.COM ", &wrong_answers(1..=20));

        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(store.load::<ExamResult>().len(), 1);
    }

    #[test]
    fn test_concurrent_submissions_yield_single_result() {
        // The duplicate check and the append run under the results lock, so
        // racing submissions for one email must produce exactly one record.
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 20)]);
        let store = std::sync::Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    submit(&store, "race@x.com", &correct_answers(1..=20)).is_ok()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(store.load::<ExamResult>().len(), 1);
    }

    #[test]
    fn test_submit_requires_email() {
        let (_dir, store) = test_store();
        assert!(matches!(
            submit(&store, "", &[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_search_filters_by_threshold_in_order() {
        let (_dir, store) = test_store();
        seed_bank(
            &store,
            &[("Aptitude", 20), ("Reasoning", 20), ("Communication", 20)],
        );

        // 27/60 = 45.0, 40/60 = 66.67, 54/60 = 90.0
        submit(&store, "a@x.com", &correct_answers(1..=27)).unwrap();
        submit(&store, "b@x.com", &correct_answers(1..=40)).unwrap();
        submit(&store, "c@x.com", &correct_answers(1..=54)).unwrap();

        let hits = search_results(&store, None, Some(60.0));
        let emails: Vec<&str> = hits.iter().map(|r| r.candidate_email.as_str()).collect();
        assert_eq!(emails, vec!["b@x.com", "c@x.com"]);
    }

    #[test]
    fn test_search_filters_by_email_substring() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 20)]);
        submit(&store, "alice@corp.com", &correct_answers(1..=5)).unwrap();
        submit(&store, "bob@corp.com", &correct_answers(1..=5)).unwrap();

        let hits = search_results(&store, Some("ALICE"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].candidate_email, "alice@corp.com");

        assert_eq!(search_results(&store, None, None).len(), 2);
    }

    #[test]
    fn test_result_by_email_exact_match() {
        let (_dir, store) = test_store();
        seed_bank(&store, &[("Aptitude", 20)]);
        submit(&store, "a@x.com", &correct_answers(1..=20)).unwrap();

        let found = result_by_email(&store, " A@X.COM").unwrap();
        assert_eq!(found.candidate_email, "a@x.com");

        assert!(matches!(
            result_by_email(&store, "nobody@x.com"),
            Err(AppError::NotFound(_))
        ));
    }
}
