//! Escalation ladder used when candidate codes collide.

use std::fmt;
use std::str::FromStr;

/// Longest code the ladder may request.
pub const MAX_CODE_LENGTH: usize = 64;

/// Errors produced while building or parsing an [`AllocationPolicy`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Allocation ladder must contain at least one rung")]
    Empty,

    #[error("Rung '{0}' must be written as <length>:<attempts>")]
    Malformed(String),

    #[error("Code length must be between 1 and 64, got {0}")]
    InvalidLength(usize),

    #[error("Attempt count must be at least 1")]
    ZeroAttempts,

    #[error("Ladder allows too many attempts in total")]
    TooManyAttempts,
}

/// A single step of the ladder: try `attempts` candidates of `length` symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    pub length: usize,
    pub attempts: u32,
}

impl Rung {
    pub const fn new(length: usize, attempts: u32) -> Self {
        Self { length, attempts }
    }
}

/// Ordered sequence of rungs walked by the allocator as collisions persist.
///
/// The default ladder is 5 attempts at length 6, 3 at length 8 and a single
/// attempt at length 10. The text form accepted by [`FromStr`] is
/// `"6:5,8:3,10:1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPolicy {
    rungs: Vec<Rung>,
}

impl AllocationPolicy {
    /// Builds a policy, rejecting empty ladders and zero-sized rungs.
    ///
    /// The attempt counts of all rungs must sum to at most `u32::MAX`.
    pub fn new(rungs: Vec<Rung>) -> Result<Self, PolicyError> {
        if rungs.is_empty() {
            return Err(PolicyError::Empty);
        }

        let mut total: u32 = 0;
        for rung in &rungs {
            if rung.length == 0 || rung.length > MAX_CODE_LENGTH {
                return Err(PolicyError::InvalidLength(rung.length));
            }
            if rung.attempts == 0 {
                return Err(PolicyError::ZeroAttempts);
            }
            total = total
                .checked_add(rung.attempts)
                .ok_or(PolicyError::TooManyAttempts)?;
        }

        Ok(Self { rungs })
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    /// Number of candidates generated before the ladder is exhausted.
    pub fn total_attempts(&self) -> u32 {
        self.rungs.iter().map(|r| r.attempts).sum()
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            rungs: vec![Rung::new(6, 5), Rung::new(8, 3), Rung::new(10, 1)],
        }
    }
}

impl FromStr for AllocationPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rungs = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| -> Result<Rung, PolicyError> {
                let (length, attempts) = part
                    .split_once(':')
                    .ok_or_else(|| PolicyError::Malformed(part.to_string()))?;
                let length = length
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| PolicyError::Malformed(part.to_string()))?;
                let attempts = attempts
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| PolicyError::Malformed(part.to_string()))?;
                Ok(Rung::new(length, attempts))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(rungs)
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .rungs
            .iter()
            .map(|r| format!("{}:{}", r.length, r.attempts))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
