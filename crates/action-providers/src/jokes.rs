use command_router::{ActionError, JokeSource, Result};
use rand::seq::SliceRandom;

/// Short, neutral programmer jokes shipped with the assistant
pub const BUNDLED_JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are only 10 kinds of people in this world: those who know binary and those who don't.",
    "A SQL query walks into a bar, walks up to two tables and asks: can I join you?",
    "Why did the developer go broke? Because they used up all their cache.",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem.",
    "I would tell you a UDP joke, but you might not get it.",
    "Debugging is like being the detective in a crime movie where you are also the murderer.",
    "Why do Java developers wear glasses? Because they don't C sharp.",
    "The best thing about a boolean is that even if you are wrong, you are only off by a bit.",
    "A programmer's partner says: go to the store and get a loaf of bread, and if they have eggs, get a dozen. The programmer comes back with twelve loaves.",
    "Knock knock. Race condition. Who's there?",
    "It works on my machine. Then we'll ship your machine.",
];

/// Picks uniformly at random from a fixed list
#[derive(Debug, Clone)]
pub struct JokeCatalog {
    jokes: Vec<String>,
}

impl JokeCatalog {
    pub fn new(jokes: Vec<String>) -> Self {
        Self { jokes }
    }

    pub fn len(&self) -> usize {
        self.jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty()
    }
}

impl Default for JokeCatalog {
    fn default() -> Self {
        Self::new(BUNDLED_JOKES.iter().map(|j| j.to_string()).collect())
    }
}

impl JokeSource for JokeCatalog {
    fn joke(&self) -> Result<String> {
        self.jokes
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| ActionError::Provider("joke catalog is empty".into()))
    }
}
