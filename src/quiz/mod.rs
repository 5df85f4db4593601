use crate::error::QuizError;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

pub mod rules;

pub use rules::{evaluate, Recommendation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuizKey {
    SkinType,
    Concern,
    Climate,
    Sun,
    Sleep,
    Diet,
    Allergies,
    Age,
}

impl QuizKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkinType => "skinType",
            Self::Concern => "concern",
            Self::Climate => "climate",
            Self::Sun => "sun",
            Self::Sleep => "sleep",
            Self::Diet => "diet",
            Self::Allergies => "allergies",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for QuizKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: QuizKey,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

pub const QUESTION_COUNT: usize = 8;

pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        key: QuizKey::SkinType,
        prompt: "What is your skin type?",
        options: &["Normal", "Oily", "Dry", "Combination", "Sensitive"],
    },
    Question {
        key: QuizKey::Concern,
        prompt: "What is your main skin concern?",
        options: &["Acne", "Wrinkles", "Dark Spots", "Redness", "Dryness", "None"],
    },
    Question {
        key: QuizKey::Climate,
        prompt: "What is the climate where you live?",
        options: &["Humid", "Dry", "Cold", "Hot", "Temperate"],
    },
    Question {
        key: QuizKey::Sun,
        prompt: "How much time do you spend in the sun?",
        options: &["A lot", "Some", "Very little"],
    },
    Question {
        key: QuizKey::Sleep,
        prompt: "How would you describe your sleep?",
        options: &["Good", "Average", "Poor"],
    },
    Question {
        key: QuizKey::Diet,
        prompt: "How would you describe your diet?",
        options: &["Balanced", "Needs improvement"],
    },
    Question {
        key: QuizKey::Allergies,
        prompt: "Do you have any known allergies?",
        options: &["No", "Fragrance", "Nuts", "Other"],
    },
    Question {
        key: QuizKey::Age,
        prompt: "What is your age range?",
        options: &["Under 18", "18-25", "26-35", "36-50", "51+"],
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAnswers {
    values: BTreeMap<QuizKey, String>,
}

impl QuizAnswers {
    pub fn get(&self, key: QuizKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn record(&mut self, key: QuizKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(QuizKey, &str)]) -> Self {
        let mut answers = Self::default();
        for (key, value) in pairs {
            answers.record(*key, value);
        }
        answers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Question(usize),
    Results,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    phase: QuizPhase,
    answers: QuizAnswers,
    recommendation: Option<Recommendation>,
}

impl Quiz {
    pub fn start() -> Self {
        Self {
            phase: QuizPhase::Question(0),
            answers: QuizAnswers::default(),
            recommendation: None,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::start();
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    pub fn step(&self) -> usize {
        match self.phase {
            QuizPhase::Question(index) => index,
            QuizPhase::Results => QUESTION_COUNT,
        }
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.phase {
            QuizPhase::Question(index) => QUESTIONS.get(index),
            QuizPhase::Results => None,
        }
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    pub fn answer(&mut self, option: &str) -> Result<Option<&Recommendation>, QuizError> {
        let QuizPhase::Question(index) = self.phase else {
            return Err(QuizError::Finished);
        };
        let question = &QUESTIONS[index];
        if !question.options.contains(&option) {
            return Err(QuizError::UnknownOption {
                key: question.key.as_str(),
                option: option.to_string(),
            });
        }

        self.answers.record(question.key, option);
        debug!("quiz answer {}={option}", question.key);

        if index + 1 < QUESTION_COUNT {
            self.phase = QuizPhase::Question(index + 1);
            return Ok(None);
        }

        self.phase = QuizPhase::Results;
        self.recommendation = Some(evaluate(&self.answers));
        Ok(self.recommendation.as_ref())
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::start()
    }
}
