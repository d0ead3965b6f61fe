use crate::hangman::art;
use crate::hangman::game::{Game, GuessOutcome, Status};
use crate::hangman::DEFAULT_WORDS;
use crate::utils::Console;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Plays rounds of the word game until the player stops
pub struct HangmanSession<R, W, G> {
    console: Console<R, W>,
    rng: G,
    words: Vec<String>,
    max_wrong_guesses: usize,
}

impl<R: BufRead, W: Write, G: Rng> HangmanSession<R, W, G> {
    /// Words that are not purely alphabetic are dropped; an empty list falls
    /// back to the built-in words.
    pub fn new(console: Console<R, W>, rng: G, words: Vec<String>, max_wrong_guesses: usize) -> Self {
        let (mut words, rejected): (Vec<String>, Vec<String>) = words
            .into_iter()
            .map(|w| w.trim().to_lowercase())
            .partition(|w| !w.is_empty() && w.chars().all(char::is_alphabetic));

        if !rejected.is_empty() {
            warn!(?rejected, "ignoring words that are not purely alphabetic");
        }
        if words.is_empty() {
            words = DEFAULT_WORDS.iter().map(|w| w.to_string()).collect();
        }

        Self {
            console,
            rng,
            words,
            max_wrong_guesses,
        }
    }

    /// Play rounds until the player declines another or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let word = self
                .words
                .choose(&mut self.rng)
                .cloned()
                .unwrap_or_else(|| DEFAULT_WORDS[0].to_string());

            if !self.play_round(Game::new(&word, self.max_wrong_guesses))? {
                return Ok(());
            }

            let again = self
                .console
                .prompt("\nDo you want to play again? (y/n): ")?
                .map(|a| a.trim().to_lowercase());

            if !matches!(again.as_deref(), Some("y" | "yes")) {
                return writeln!(self.console.out(), "Thanks for playing Hangman! 👋");
            }
            writeln!(self.console.out(), "\n{}\n", "=".repeat(50))?;
        }
    }

    /// Play one round. Returns false if input ran out mid-round.
    pub fn play_round(&mut self, mut game: Game) -> io::Result<bool> {
        info!(letters = game.word().len(), "new round");

        let out = self.console.out();
        writeln!(out, "🎮 Welcome to Hangman Game! 🎮")?;
        writeln!(out, "Guess the word one letter at a time!")?;
        writeln!(out, "The word has {} letters.", game.word().chars().count())?;
        writeln!(out)?;

        loop {
            let out = self.console.out();
            writeln!(out, "{}", art::stage(game.wrong_guesses()))?;

            match game.status() {
                Status::Won => {
                    writeln!(out, "Word: {}", game.masked_word())?;
                    writeln!(out, "🎉 Congratulations! You guessed the word!")?;
                    writeln!(out, "The word was: {}", game.word().to_uppercase())?;
                    info!(word = game.word(), "round won");
                    return Ok(true);
                }
                Status::Lost => {
                    writeln!(out, "💀 Game Over! You've been hanged!")?;
                    writeln!(out, "The word was: {}", game.word().to_uppercase())?;
                    info!(word = game.word(), "round lost");
                    return Ok(true);
                }
                Status::InProgress => {}
            }

            let guessed: Vec<String> = game.guessed().map(String::from).collect();
            writeln!(out, "Word: {}", game.masked_word())?;
            writeln!(
                out,
                "Guessed letters: {}",
                if guessed.is_empty() { "None".to_string() } else { guessed.join(", ") }
            )?;
            writeln!(out, "Wrong guesses remaining: {}", game.remaining())?;
            writeln!(out)?;

            let Some(input) = self.console.prompt("Enter a letter: ")? else {
                return Ok(false);
            };

            let out = self.console.out();
            match game.guess(&input) {
                Ok(GuessOutcome::Hit(letter)) => {
                    writeln!(out, "✅ Good guess! '{letter}' is in the word!")?
                }
                Ok(GuessOutcome::Miss(letter)) => {
                    writeln!(out, "❌ Sorry, '{letter}' is not in the word!")?
                }
                Err(e) => {
                    writeln!(out, "❌ {e}")?;
                    continue;
                }
            }
            writeln!(out, "{}", "-".repeat(40))?;
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
