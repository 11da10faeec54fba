use regex::Regex;
use std::sync::LazyLock;

pub(crate) const MIN_LENGTH: usize = 12;

pub(crate) const STRONG_MESSAGE: &str = "Password is strong!";

/// Rejected when found anywhere in the password, ignoring case.
pub(crate) const DICTIONARY_WORDS: &[&str] = &[
    "password", "admin", "welcome", "qwerty", "user", "login", "abc123", "anisha", "anish",
    "maharjan",
];

/// Rejected when the whole password equals one of these, ignoring case.
pub(crate) const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "123456789",
    "qwerty",
    "password",
    "111111",
    "123123",
    "12345678",
    "abc123",
    "password1",
    "iloveyou",
    "000000",
    "admin",
];

struct CharacterRule {
    regex: Regex,
    message: &'static str,
}

static CHARACTER_RULES: LazyLock<Vec<CharacterRule>> = LazyLock::new(|| {
    [
        ("[A-Z]", "Password must contain at least one uppercase letter."),
        ("[a-z]", "Password must contain at least one lowercase letter."),
        ("[0-9]", "Password must contain at least one digit."),
        ("[^A-Za-z0-9]", "Password must contain at least one special character."),
    ]
    .into_iter()
    // All four are literals; test_all_character_rules_compile pins the count.
    .filter_map(|(pattern, message)| {
        Regex::new(pattern)
            .ok()
            .map(|regex| CharacterRule { regex, message })
    })
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strength {
    Strong,
    /// Every rule the password broke, in check order.
    Weak(Vec<String>),
}

impl Strength {
    pub fn is_strong(&self) -> bool {
        matches!(self, Self::Strong)
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Strong => vec![STRONG_MESSAGE.to_string()],
            Self::Weak(errors) => errors.clone(),
        }
    }
}

/// Run every check against `password`. Only the dictionary check stops
/// early, reporting the first word it finds.
pub fn check_strength(password: &str) -> Strength {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_LENGTH {
        errors.push(format!(
            "Password must be at least {MIN_LENGTH} characters long."
        ));
    }

    for rule in CHARACTER_RULES.iter() {
        if !rule.regex.is_match(password) {
            errors.push(rule.message.to_string());
        }
    }

    let lower = password.to_lowercase();
    if let Some(word) = DICTIONARY_WORDS.iter().find(|w| lower.contains(*w)) {
        errors.push(format!("Password contains dictionary word: '{word}'"));
    }

    if COMMON_PASSWORDS.contains(&lower.as_str()) {
        errors.push("Password is too common and guessable.".to_string());
    }

    if errors.is_empty() {
        Strength::Strong
    } else {
        Strength::Weak(errors)
    }
}
