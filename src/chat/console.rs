use crate::chat::Responder;
use crate::utils::Console;
use rand::Rng;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Scripted inputs for the demo conversation
pub const DEMO_INPUTS: [&str; 8] = [
    "Hello",
    "How are you?",
    "What's your name?",
    "How old are you?",
    "What can you do?",
    "Tell me about programming",
    "Thank you",
    "Goodbye",
];

/// Interactive chat session over a [`Responder`]
pub struct ChatSession<'a, R, W, G> {
    responder: &'a Responder,
    console: Console<R, W>,
    rng: G,
}

impl<'a, R: BufRead, W: Write, G: Rng> ChatSession<'a, R, W, G> {
    pub fn new(responder: &'a Responder, console: Console<R, W>, rng: G) -> Self {
        Self {
            responder,
            console,
            rng,
        }
    }

    /// Start menu: chat straight away, or show the demo first
    pub fn run(&mut self) -> io::Result<()> {
        let out = self.console.out();
        writeln!(out, "Choose an option:")?;
        writeln!(out, "1. Start chatting")?;
        writeln!(out, "2. See demo conversation")?;

        let choice = self.console.prompt("\nEnter your choice (1 or 2): ")?;

        match choice.as_deref().map(str::trim) {
            None => {}
            Some("2") => {
                self.demo()?;
                let answer = self
                    .console
                    .prompt("Would you like to start chatting now? (y/n): ")?
                    .map(|a| a.trim().to_lowercase());
                if matches!(answer.as_deref(), Some("y" | "yes")) {
                    self.chat()?;
                }
            }
            Some(_) => self.chat()?,
        }

        writeln!(self.console.out(), "\nThanks for using the chatbot! 🤖✨")
    }

    /// Converse until the user says goodbye or input ends
    pub fn chat(&mut self) -> io::Result<()> {
        let name = self.responder.name();
        let out = self.console.out();
        writeln!(out, "🤖 {}", "=".repeat(50))?;
        writeln!(out, "   Welcome to {name} - Your Friendly Chatbot!")?;
        writeln!(out, "   Type 'bye', 'quit', or 'exit' to end the conversation")?;
        writeln!(out, "{}", "=".repeat(50))?;
        writeln!(out)?;
        writeln!(
            out,
            "{name}: Hello! I'm {name}, your friendly chatbot! How can I help you today?"
        )?;

        while let Some(line) = self.console.prompt("\nYou: ")? {
            let line = line.trim();

            if line.is_empty() {
                writeln!(self.console.out(), "{name}: Please say something! I'm here to chat!")?;
                continue;
            }

            debug!(category = ?self.responder.category(line), "chat input");
            let reply = self.responder.respond(line, &mut self.rng);
            writeln!(self.console.out(), "\n{name}: {reply}")?;

            if self.responder.is_goodbye(line) {
                break;
            }
        }

        Ok(())
    }

    /// Print a canned conversation showing each kind of reply
    pub fn demo(&mut self) -> io::Result<()> {
        let name = self.responder.name();
        let out = self.console.out();
        writeln!(out, "\n🎯 DEMO MODE - Sample Conversation:")?;
        writeln!(out, "{}", "-".repeat(40))?;

        for input in DEMO_INPUTS {
            let reply = self.responder.respond(input, &mut self.rng);
            let out = self.console.out();
            writeln!(out, "You: {input}")?;
            writeln!(out, "{name}: {reply}")?;
            writeln!(out)?;
        }
        Ok(())
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
