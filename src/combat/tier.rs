use std::fmt;

use serde::Serialize;

/// Coarse view of a single attribute value. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Low,
    Mid,
    High,
}

pub const HIGH_THRESHOLD: u8 = 66;
pub const MID_THRESHOLD: u8 = 33;

/// Strict thresholds: 33 is LOW, 34 MID, 66 MID, 67 HIGH.
pub fn classify(value: u8) -> Tier {
    if value > HIGH_THRESHOLD {
        Tier::High
    } else if value > MID_THRESHOLD {
        Tier::Mid
    } else {
        Tier::Low
    }
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Mid => "MID",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_use_strict_inequalities() {
        assert_eq!(classify(0), Tier::Low);
        assert_eq!(classify(33), Tier::Low);
        assert_eq!(classify(34), Tier::Mid);
        assert_eq!(classify(66), Tier::Mid);
        assert_eq!(classify(67), Tier::High);
        assert_eq!(classify(100), Tier::High);
    }

    #[test]
    fn labels_are_uppercase() {
        assert_eq!(Tier::High.to_string(), "HIGH");
        assert_eq!(serde_json::to_string(&Tier::Mid).unwrap(), "\"MID\"");
    }
}
