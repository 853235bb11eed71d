//! Keyword tally over review snippets.

use serde::{Deserialize, Serialize};

/// Words that count as a positive mention. English and Portuguese, since
/// many analyzed sites are Brazilian.
pub(crate) const POSITIVE: &[&str] = &[
    "excellent",
    "great",
    "amazing",
    "wonderful",
    "perfect",
    "recommend",
    "recommended",
    "love",
    "best",
    "excelente",
    "ótimo",
    "ótima",
    "maravilhoso",
    "maravilhosa",
    "recomendo",
    "perfeito",
    "perfeita",
];

pub(crate) const NEGATIVE: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "disappointing",
    "problem",
    "unsatisfied",
    "worst",
    "ruim",
    "péssimo",
    "péssima",
    "decepcionante",
    "problema",
    "insatisfeito",
    "insatisfeita",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
}

impl SentimentTally {
    /// Majority vote: positive only when positive mentions outnumber negative ones.
    #[must_use]
    pub fn verdict(&self) -> Sentiment {
        if self.positive > self.negative {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }
}

/// Count keyword mentions across review texts.
///
/// Keywords match anywhere in the lowercased review, so inflected forms
/// (`excelentes`, `problemas`) count. Each keyword counts at most once per
/// review, and a keyword found only inside a longer matched keyword of the
/// same lexicon (`problem` in `problema`) is not counted again.
pub fn tally<'a, I>(reviews: I) -> SentimentTally
where
    I: IntoIterator<Item = &'a str>,
{
    reviews
        .into_iter()
        .fold(SentimentTally::default(), |mut acc, review| {
            let text = review.to_lowercase();
            acc.positive += mentions(POSITIVE, &text);
            acc.negative += mentions(NEGATIVE, &text);
            acc
        })
}

fn mentions(lexicon: &[&str], text: &str) -> usize {
    let matched: Vec<&str> = lexicon
        .iter()
        .copied()
        .filter(|kw| text.contains(kw))
        .collect();
    matched
        .iter()
        .filter(|kw| {
            !matched
                .iter()
                .any(|other| other.len() > kw.len() && other.contains(**kw))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reviews_is_neutral() {
        let t = tally(std::iter::empty());
        assert_eq!(t, SentimentTally::default());
        assert_eq!(t.verdict(), Sentiment::Neutral);
    }

    #[test]
    fn positive_majority_is_positive() {
        let t = tally(["Excellent stay, I recommend it!", "Lugar ótimo"]);
        assert_eq!(t.positive, 3);
        assert_eq!(t.negative, 0);
        assert_eq!(t.verdict(), Sentiment::Positive);
    }

    #[test]
    fn tie_is_neutral() {
        let t = tally(["great food", "terrible service"]);
        assert_eq!(t.positive, 1);
        assert_eq!(t.negative, 1);
        assert_eq!(t.verdict(), Sentiment::Neutral);
    }

    #[test]
    fn negative_majority_is_neutral() {
        let t = tally(["atendimento ruim, problema no quarto"]);
        assert_eq!(t.negative, 2);
        assert_eq!(t.verdict(), Sentiment::Neutral);
    }

    #[test]
    fn keyword_counts_once_per_review() {
        let t = tally(["great great great"]);
        assert_eq!(t.positive, 1);
    }

    #[test]
    fn punctuation_is_stripped() {
        let t = tally(["Perfeito!!!"]);
        assert_eq!(t.positive, 1);
    }

    #[test]
    fn inflected_forms_count() {
        let t = tally(["Produtos excelentes, equipe recomendada", "Sem problemas"]);
        assert_eq!(t.positive, 1);
        assert_eq!(t.negative, 1);

        let t = tally(["Quartos péssimos", "Clientes insatisfeitos", "Recommended!"]);
        assert_eq!(t.negative, 2);
        assert_eq!(t.positive, 1);
    }

    #[test]
    fn longer_keyword_absorbs_its_stem() {
        let t = tally(["um problema sério"]);
        assert_eq!(t.negative, 1);
    }

    #[test]
    fn unknown_text_counts_nothing() {
        let t = tally(["the quick brown fox"]);
        assert_eq!(t, SentimentTally::default());
    }
}
