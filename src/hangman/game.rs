use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MAX_WRONG_GUESSES: usize = 6;

/// Why a guess was not accepted. Rejected guesses never cost a life.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Please enter a single letter only!")]
    NotALetter,

    #[error("You already guessed '{0}'!")]
    AlreadyGuessed(char),
}

/// Result of an accepted guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit(char),
    Miss(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

/// State of a single round
#[derive(Debug, Clone)]
pub struct Game {
    word: String,
    guessed: BTreeSet<char>,
    wrong_guesses: usize,
    max_wrong_guesses: usize,
}

impl Game {
    /// Start a round. The word is lowercased.
    pub fn new(word: &str, max_wrong_guesses: usize) -> Self {
        Self {
            word: word.trim().to_lowercase(),
            guessed: BTreeSet::new(),
            wrong_guesses: 0,
            max_wrong_guesses,
        }
    }

    /// Apply one guess typed by the player
    pub fn guess(&mut self, input: &str) -> Result<GuessOutcome, GuessError> {
        let normalized = input.trim().to_lowercase();
        let mut chars = normalized.chars();

        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => c,
            _ => return Err(GuessError::NotALetter),
        };

        if !self.guessed.insert(letter) {
            return Err(GuessError::AlreadyGuessed(letter));
        }

        if self.word.contains(letter) {
            debug!(%letter, "correct guess");
            Ok(GuessOutcome::Hit(letter))
        } else {
            self.wrong_guesses += 1;
            debug!(%letter, wrong = self.wrong_guesses, "wrong guess");
            Ok(GuessOutcome::Miss(letter))
        }
    }

    /// Word with unguessed letters hidden, e.g. `p _ t h _ n`
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn status(&self) -> Status {
        if self.word.chars().all(|c| self.guessed.contains(&c)) {
            Status::Won
        } else if self.wrong_guesses >= self.max_wrong_guesses {
            Status::Lost
        } else {
            Status::InProgress
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Guessed letters in alphabetical order
    pub fn guessed(&self) -> impl Iterator<Item = char> + '_ {
        self.guessed.iter().copied()
    }

    pub fn wrong_guesses(&self) -> usize {
        self.wrong_guesses
    }

    pub fn remaining(&self) -> usize {
        self.max_wrong_guesses.saturating_sub(self.wrong_guesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_reveal_letters() {
        let mut game = Game::new("Python", DEFAULT_MAX_WRONG_GUESSES);

        assert_eq!(game.masked_word(), "_ _ _ _ _ _");
        assert_eq!(game.guess("P"), Ok(GuessOutcome::Hit('p')));
        assert_eq!(game.guess(" o "), Ok(GuessOutcome::Hit('o')));
        assert_eq!(game.masked_word(), "p _ _ _ o _");
        assert_eq!(game.wrong_guesses(), 0);
    }

    #[test]
    fn test_rejected_guesses_cost_nothing() {
        let mut game = Game::new("monitor", DEFAULT_MAX_WRONG_GUESSES);

        assert_eq!(game.guess("ab"), Err(GuessError::NotALetter));
        assert_eq!(game.guess("7"), Err(GuessError::NotALetter));
        assert_eq!(game.guess(""), Err(GuessError::NotALetter));

        game.guess("z").unwrap();
        assert_eq!(game.guess("Z"), Err(GuessError::AlreadyGuessed('z')));
        assert_eq!(game.wrong_guesses(), 1);
        assert_eq!(game.remaining(), 5);
    }

    #[test]
    fn test_win() {
        let mut game = Game::new("code", DEFAULT_MAX_WRONG_GUESSES);
        for letter in ["c", "o", "d"] {
            game.guess(letter).unwrap();
            assert_eq!(game.status(), Status::InProgress);
        }
        game.guess("e").unwrap();
        assert_eq!(game.status(), Status::Won);
    }

    #[test]
    fn test_loss_after_max_misses() {
        let mut game = Game::new("keyboard", 3);
        for letter in ["x", "z", "q"] {
            assert_eq!(game.status(), Status::InProgress);
            assert!(matches!(game.guess(letter), Ok(GuessOutcome::Miss(_))));
        }
        assert_eq!(game.status(), Status::Lost);
        assert_eq!(game.remaining(), 0);
    }

    #[test]
    fn test_guessed_letters_sorted() {
        let mut game = Game::new("computer", DEFAULT_MAX_WRONG_GUESSES);
        for letter in ["t", "a", "m"] {
            game.guess(letter).unwrap();
        }
        assert_eq!(game.guessed().collect::<String>(), "amt");
    }
}
