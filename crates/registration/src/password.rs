//! Password strength policy.
//!
//! Five independent requirements; a password is acceptable only when all of
//! them hold. Each predicate is public so the sign-up form can render a live
//! checklist while the user types.

use serde::Serialize;

use vetforum_core::ValueObject;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the "special character" requirement.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A single password requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordRequirement {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        PasswordRequirement::MinLength,
        PasswordRequirement::Uppercase,
        PasswordRequirement::Lowercase,
        PasswordRequirement::Digit,
        PasswordRequirement::Special,
    ];

    pub fn description(self) -> &'static str {
        match self {
            PasswordRequirement::MinLength => "at least 8 characters",
            PasswordRequirement::Uppercase => "an uppercase letter",
            PasswordRequirement::Lowercase => "a lowercase letter",
            PasswordRequirement::Digit => "a digit",
            PasswordRequirement::Special => "a special character",
        }
    }
}

impl core::fmt::Display for PasswordRequirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of every requirement for one password. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl ValueObject for PasswordStrength {}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: has_min_length(password),
            uppercase: has_uppercase(password),
            lowercase: has_lowercase(password),
            digit: has_digit(password),
            special: has_special(password),
        }
    }

    pub fn holds(&self, requirement: PasswordRequirement) -> bool {
        match requirement {
            PasswordRequirement::MinLength => self.min_length,
            PasswordRequirement::Uppercase => self.uppercase,
            PasswordRequirement::Lowercase => self.lowercase,
            PasswordRequirement::Digit => self.digit,
            PasswordRequirement::Special => self.special,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.min_length && self.uppercase && self.lowercase && self.digit && self.special
    }

    /// Failing requirements, in checklist order.
    pub fn unmet(&self) -> Vec<PasswordRequirement> {
        PasswordRequirement::ALL
            .into_iter()
            .filter(|r| !self.holds(*r))
            .collect()
    }
}

pub fn has_min_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

/// True iff all five requirements hold.
pub fn validate_password(password: &str) -> bool {
    PasswordStrength::evaluate(password).is_satisfied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strong_password_passes_every_requirement() {
        let s = PasswordStrength::evaluate("Abcdef1!");
        assert!(s.is_satisfied());
        assert!(s.unmet().is_empty());
        assert!(validate_password("Abcdef1!"));
    }

    #[test]
    fn missing_upper_and_special_are_reported_individually() {
        let s = PasswordStrength::evaluate("lowercase123");
        assert!(!validate_password("lowercase123"));
        assert!(s.min_length);
        assert!(s.lowercase);
        assert!(s.digit);
        assert!(!s.uppercase);
        assert!(!s.special);
        assert_eq!(
            s.unmet(),
            vec![PasswordRequirement::Uppercase, PasswordRequirement::Special]
        );
    }

    #[test]
    fn each_single_missing_requirement_fails_the_policy() {
        let cases = [
            ("Abcde1!", PasswordRequirement::MinLength),
            ("abcdef1!", PasswordRequirement::Uppercase),
            ("ABCDEF1!", PasswordRequirement::Lowercase),
            ("Abcdefg!", PasswordRequirement::Digit),
            ("Abcdefg1", PasswordRequirement::Special),
        ];
        for (password, missing) in cases {
            let s = PasswordStrength::evaluate(password);
            assert!(!s.is_satisfied(), "{password}");
            assert_eq!(s.unmet(), vec![missing], "{password}");
            assert!(!s.holds(missing));
        }
    }

    #[test]
    fn only_listed_symbols_count_as_special() {
        assert!(!has_special("Abcdefg1_-+="));
        for c in SPECIAL_CHARACTERS.chars() {
            assert!(has_special(&format!("Abcdefg1{c}")), "{c}");
        }
    }

    #[test]
    fn letter_classes_are_ascii_only() {
        assert!(!has_uppercase("ÉÀÇ"));
        assert!(!has_lowercase("éàç"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(!has_min_length("ééééééé"));
        assert!(has_min_length("éééééééé"));
    }

    proptest! {
        #[test]
        fn aggregate_is_conjunction_of_predicates(password in ".{0,16}") {
            let s = PasswordStrength::evaluate(&password);
            let all = PasswordRequirement::ALL.iter().all(|r| s.holds(*r));
            prop_assert_eq!(validate_password(&password), all);
        }
    }
}
