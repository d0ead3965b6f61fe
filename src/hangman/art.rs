/// Gallows drawings, one per wrong-guess count (0 through 6)
pub const STAGES: [&str; 7] = [
    r"
   ------
   |    |
   |
   |
   |
   |
--------
",
    r"
   ------
   |    |
   |    O
   |
   |
   |
--------
",
    r"
   ------
   |    |
   |    O
   |    |
   |
   |
--------
",
    r"
   ------
   |    |
   |    O
   |   /|
   |
   |
--------
",
    r"
   ------
   |    |
   |    O
   |   /|\
   |
   |
--------
",
    r"
   ------
   |    |
   |    O
   |   /|\
   |   /
   |
--------
",
    r"
   ------
   |    |
   |    O
   |   /|\
   |   / \
   |
--------
",
];

/// Drawing for `wrong_guesses`, clamped to the final stage
pub fn stage(wrong_guesses: usize) -> &'static str {
    STAGES[wrong_guesses.min(STAGES.len() - 1)]
}
