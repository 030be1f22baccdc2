//! Submission scoring: section bucketing, per-section tallies, percentage.

use crate::models::{Question, SubmittedAnswer};

/// How many questions of each section a candidate receives.
pub const QUESTIONS_PER_SECTION: usize = 20;

/// A full exam is scored out of 60: 20 questions in each of three sections.
pub const TOTAL_SCORED_QUESTIONS: u32 = 60;

/// The three scored exam sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Aptitude,
    Reasoning,
    Communication,
}

impl Section {
    /// Buckets a free-text section label by case-insensitive substring
    /// match. Existing question banks carry labels like "Aptitude Test" or
    /// "VERBAL REASONING", so exact matching would drop them; a label that
    /// matches none of the three buckets scores nowhere.
    // TODO: make `Question::section` this enum once the seed data is normalized.
    pub fn classify(label: &str) -> Option<Section> {
        let upper = label.to_uppercase();
        if upper.contains("APTITUDE") {
            Some(Section::Aptitude)
        } else if upper.contains("REASONING") {
            Some(Section::Reasoning)
        } else if upper.contains("COMMUNICATION") {
            Some(Section::Communication)
        } else {
            None
        }
    }
}

/// Per-section correct-answer counts for one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionTally {
    pub aptitude: u32,
    pub reasoning: u32,
    pub communication: u32,
}

impl SectionTally {
    pub fn total(&self) -> u32 {
        self.aptitude + self.reasoning + self.communication
    }

    /// Score out of 60 as a percentage, rounded to two decimal places.
    pub fn percentage(&self) -> f64 {
        let raw = f64::from(self.total()) / f64::from(TOTAL_SCORED_QUESTIONS) * 100.0;
        (raw * 100.0).round() / 100.0
    }

    fn bump(&mut self, section: Section) {
        match section {
            Section::Aptitude => self.aptitude += 1,
            Section::Reasoning => self.reasoning += 1,
            Section::Communication => self.communication += 1,
        }
    }
}

/// Tallies correct answers per section.
///
/// Answers referencing unknown question ids are skipped, as are correct
/// answers to questions whose section label fits no bucket — a stray label
/// must not fail the whole submission.
pub fn tally_answers(questions: &[Question], answers: &[SubmittedAnswer]) -> SectionTally {
    let mut tally = SectionTally::default();
    for answer in answers {
        let Some(question) = questions.iter().find(|q| answer.question_id.matches(q.id)) else {
            continue;
        };
        if !is_correct(question, &answer.selected_option) {
            continue;
        }
        if let Some(section) = Section::classify(&question.section) {
            tally.bump(section);
        }
    }
    tally
}

fn is_correct(question: &Question, selected: &str) -> bool {
    let correct = question.correct_option.trim();
    let selected = selected.trim();
    !correct.is_empty() && !selected.is_empty() && correct.eq_ignore_ascii_case(selected)
}
