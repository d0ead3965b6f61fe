use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// Placeholder replaced with the bot's name when the table is built
const NAME: &str = "{name}";

/// (category, pattern, replies). Checked in order, first match wins.
const RULES: &[(&str, &str, &[&str])] = &[
    (
        "greetings",
        r"\b(hello|hi|hey|greetings|good morning|good afternoon|good evening)\b",
        &[
            "Hello! I'm {name}, your friendly chatbot! 👋",
            "Hi there! Nice to meet you! I'm {name}.",
            "Hey! How can I help you today?",
            "Hello! Welcome! How are you doing?",
        ],
    ),
    (
        "how_are_you",
        r"\b(how are you|how do you do|how's it going|what's up)\b",
        &[
            "I'm doing great, thank you for asking! How about you?",
            "I'm fantastic! Thanks for asking. How are you?",
            "I'm doing well! Ready to chat with you!",
            "All good here! How's your day going?",
        ],
    ),
    (
        "name",
        r"\b(what is your name|your name|who are you|what are you called)\b",
        &[
            "I'm {name}, a simple pattern-matching chatbot!",
            "My name is {name}! I'm here to chat with you.",
            "I'm {name}, your friendly terminal companion!",
            "Call me {name}! I'm a basic chatbot.",
        ],
    ),
    (
        "age",
        r"\b(how old are you|your age|age)\b",
        &[
            "I'm just a few lines of code old! 😄",
            "Age is just a number for bots like me!",
            "I was born when my first line of code compiled!",
            "I'm timeless in the digital world!",
        ],
    ),
    (
        "help",
        r"\b(help|what can you do|capabilities|commands)\b",
        &[
            "I can chat with you about basic topics! Try asking me about my name, how I'm doing, or just say hello!",
            "I'm a simple chatbot. I can respond to greetings, answer basic questions about myself, and have a friendly conversation!",
            "I can help with basic conversation! Ask me how I'm doing, what my name is, or just chat casually!",
            "My capabilities include: greeting you, answering basic questions, and being a friendly chat companion!",
        ],
    ),
    (
        "goodbye",
        r"\b(bye|goodbye|see you|farewell|exit|quit|leave)\b",
        &[
            "Goodbye! It was nice chatting with you! 👋",
            "See you later! Have a great day!",
            "Farewell! Thanks for the chat!",
            "Bye! Come back anytime for a chat!",
        ],
    ),
    (
        "thanks",
        r"\b(thank you|thanks|thank|appreciate)\b",
        &[
            "You're welcome! Happy to help! 😊",
            "No problem at all!",
            "You're very welcome!",
            "Glad I could help! Anytime!",
        ],
    ),
    (
        "weather",
        r"\b(weather|temperature|hot|cold|sunny|rainy|cloudy)\b",
        &[
            "I can't check the actual weather, but I hope it's nice where you are!",
            "I don't have access to weather data, but I hope you're having good weather!",
            "Weather talk! I wish I could check the forecast for you!",
            "I'm just a simple bot and can't check weather, but I hope it's pleasant outside!",
        ],
    ),
    (
        "programming",
        r"\b(programming|code|coding|python|rust|software|developer)\b",
        &[
            "Programming is awesome! I'm a small Rust program myself!",
            "I love programming talk! A handful of regexes is all it takes to make me.",
            "Coding is great! I'm a simple example of what you can build in an afternoon!",
            "Programming rocks! I'm proof that even simple code can create something interactive!",
        ],
    ),
];

const DEFAULT_REPLIES: &[&str] = &[
    "I'm not sure I understand. Could you rephrase that?",
    "That's interesting! Tell me more.",
    "I'm still learning. Can you ask me something else?",
    "Hmm, I don't quite get that. Try asking me how I'm doing or what my name is!",
    "I'm a simple bot, so I might not understand everything. What else would you like to chat about?",
    "Could you try asking me something different? I'm better with basic conversation!",
    "That's beyond my simple capabilities! Try greeting me or asking about my name!",
];

const GOODBYE_PATTERN: &str = r"\b(bye|goodbye|exit|quit|leave|end)\b";

/// One category of the response table
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: &'static str,
    pattern: Regex,
    replies: Vec<String>,
}

/// Pattern-matching responder: a fixed, ordered table of regexes, each with
/// canned replies, plus a pool of fallbacks.
#[derive(Debug, Clone)]
pub struct Responder {
    name: String,
    rules: Vec<Rule>,
    defaults: Vec<String>,
    goodbye: Regex,
}

impl Responder {
    pub fn new(name: &str) -> Result<Self, regex::Error> {
        let rules = RULES
            .iter()
            .map(|&(category, pattern, replies)| {
                Ok(Rule {
                    category,
                    pattern: Regex::new(pattern)?,
                    replies: replies.iter().map(|r| r.replace(NAME, name)).collect(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            name: name.to_string(),
            rules,
            defaults: DEFAULT_REPLIES.iter().map(|r| r.to_string()).collect(),
            goodbye: Regex::new(GOODBYE_PATTERN)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn clean(input: &str) -> String {
        input.trim().to_lowercase()
    }

    /// First category whose pattern matches, if any
    pub fn category(&self, input: &str) -> Option<&'static str> {
        self.rule_for(&Self::clean(input)).map(|rule| rule.category)
    }

    fn rule_for(&self, cleaned: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.pattern.is_match(cleaned))
    }

    /// Pick a reply for `input`, falling back to a default reply
    pub fn respond<G: Rng + ?Sized>(&self, input: &str, rng: &mut G) -> &str {
        let pool = match self.rule_for(&Self::clean(input)) {
            Some(rule) => &rule.replies,
            None => &self.defaults,
        };

        pool.choose(rng).map(String::as_str).unwrap_or_default()
    }

    /// Does the user want to end the conversation?
    pub fn is_goodbye(&self, input: &str) -> bool {
        self.goodbye.is_match(&Self::clean(input))
    }

    pub fn replies_for(&self, category: &str) -> Option<&[String]> {
        self.rules
            .iter()
            .find(|rule| rule.category == category)
            .map(|rule| rule.replies.as_slice())
    }

    pub fn default_replies(&self) -> &[String] {
        &self.defaults
    }
}
