//! Answer keys: question number to correct choice.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ExamError;

/// One of the five answer options on a YDS question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Choice {
    A,
    B,
    C,
    D,
    E,
}

impl Choice {
    /// All choices in index order.
    pub const ALL: [Choice; 5] = [Choice::A, Choice::B, Choice::C, Choice::D, Choice::E];

    /// Returns the canonical index (A=0 .. E=4).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Returns the choice for a canonical index.
    pub fn from_index(index: u8) -> Result<Self, ExamError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| ExamError::InvalidChoice(index.to_string()))
    }

    /// Returns the choice for a letter, ignoring case.
    pub fn from_letter(letter: char) -> Result<Self, ExamError> {
        match letter.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            'E' => Ok(Self::E),
            _ => Err(ExamError::InvalidChoice(letter.to_string())),
        }
    }

    pub fn letter(self) -> char {
        (b'A' + self.index()) as char
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Choice {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return Self::from_index(index);
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => Err(ExamError::InvalidChoice(s.to_string())),
        }
    }
}

/// Deneme-1 key as choice indices, question 1 first.
const DENEME1_INDICES: [u8; 80] = [
    3, 1, 2, 0, 4, 0, 1, 2, 0, 1, //
    0, 4, 2, 1, 3, 0, 4, 0, 3, 0, //
    1, 3, 1, 3, 4, 2, 1, 2, 1, 0, //
    3, 0, 4, 1, 2, 0, 1, 3, 0, 3, //
    4, 2, 1, 1, 2, 2, 0, 4, 0, 3, //
    1, 0, 3, 2, 4, 1, 2, 4, 1, 4, //
    3, 2, 0, 4, 3, 0, 2, 4, 4, 3, //
    0, 3, 1, 1, 0, 0, 3, 2, 4, 3, //
];

/// Mapping from question number (1-based) to its correct choice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerKey {
    answers: BTreeMap<u32, Choice>,
}

impl AnswerKey {
    /// The built-in key for YDS Deneme-1 (80 questions).
    pub fn deneme1() -> Self {
        let answers = DENEME1_INDICES
            .iter()
            .enumerate()
            .map(|(i, &index)| (i as u32 + 1, Choice::ALL[index as usize]))
            .collect();
        Self { answers }
    }

    /// Builds a key from question number to choice index.
    pub fn from_indices<I>(entries: I) -> Result<Self, ExamError>
    where
        I: IntoIterator<Item = (u32, u8)>,
    {
        let mut answers = BTreeMap::new();
        for (question, index) in entries {
            if question == 0 {
                return Err(ExamError::InvalidAnswerKey(
                    "question numbers start at 1".to_string(),
                ));
            }
            let choice = Choice::from_index(index)?;
            if answers.insert(question, choice).is_some() {
                return Err(ExamError::InvalidAnswerKey(format!(
                    "question {} listed more than once",
                    question
                )));
            }
        }
        Ok(Self { answers })
    }

    /// Builds a key from a letter string, one letter per question in order.
    ///
    /// Whitespace and commas between letters are ignored, so both
    /// `"DBCAE"` and `"D, B, C, A, E"` describe questions 1..=5.
    pub fn from_letters(letters: &str) -> Result<Self, ExamError> {
        let answers = letters
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .enumerate()
            .map(|(i, c)| Choice::from_letter(c).map(|choice| (i as u32 + 1, choice)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { answers })
    }

    /// Checks that the key holds exactly one answer per question `1..=total_questions`.
    pub fn validate(&self, total_questions: u32) -> Result<(), ExamError> {
        if let Some((&question, _)) = self
            .answers
            .iter()
            .find(|&(&q, _)| q == 0 || q > total_questions)
        {
            return Err(ExamError::InvalidAnswerKey(format!(
                "question {} is outside 1..={}",
                question, total_questions
            )));
        }
        if self.answers.len() != total_questions as usize {
            let missing: Vec<String> = (1..=total_questions)
                .filter(|q| !self.answers.contains_key(q))
                .take(5)
                .map(|q| q.to_string())
                .collect();
            return Err(ExamError::InvalidAnswerKey(format!(
                "expected {} answers, found {} (missing: {})",
                total_questions,
                self.answers.len(),
                missing.join(", ")
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Returns the correct choice for a question, if the key has one.
    pub fn get(&self, question: u32) -> Option<Choice> {
        self.answers.get(&question).copied()
    }

    /// Iterates answers in question order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Choice)> + '_ {
        self.answers.iter().map(|(&q, &c)| (q, c))
    }

    /// Counts how many questions have each choice as the correct answer.
    pub fn distribution(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for choice in self.answers.values() {
            counts[choice.index() as usize] += 1;
        }
        counts
    }
}
