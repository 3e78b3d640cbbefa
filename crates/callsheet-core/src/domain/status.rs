use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of the most recent call attempt to a hotel.
///
/// Any status may be relabeled to any other; the cyclic order returned by
/// [`ResponseStatus::next`] only exists for keyboard cycling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseStatus {
    #[default]
    NoAnswer,
    Answered,
    CallBack,
    SwitchedOff,
}

impl ResponseStatus {
    pub const ALL: [ResponseStatus; 4] = [
        ResponseStatus::NoAnswer,
        ResponseStatus::Answered,
        ResponseStatus::CallBack,
        ResponseStatus::SwitchedOff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::NoAnswer => "no-answer",
            ResponseStatus::Answered => "answered",
            ResponseStatus::CallBack => "call-back",
            ResponseStatus::SwitchedOff => "switched-off",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseStatus::NoAnswer => "No Answer",
            ResponseStatus::Answered => "Answered",
            ResponseStatus::CallBack => "Call back in 2-3 minutes",
            ResponseStatus::SwitchedOff => "Switched Off",
        }
    }

    pub fn next(self) -> Self {
        let pos = self.position();
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let pos = self.position();
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Maps the dashboard's 1-based shortcut digits onto statuses.
    pub fn from_shortcut(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        if index == 0 {
            return None;
        }
        Self::ALL.get(index - 1).copied()
    }

    fn position(self) -> usize {
        match self {
            ResponseStatus::NoAnswer => 0,
            ResponseStatus::Answered => 1,
            ResponseStatus::CallBack => 2,
            ResponseStatus::SwitchedOff => 3,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "no-answer" => Ok(ResponseStatus::NoAnswer),
            "answered" => Ok(ResponseStatus::Answered),
            "call-back" => Ok(ResponseStatus::CallBack),
            "switched-off" => Ok(ResponseStatus::SwitchedOff),
            _ => Err(CoreError::InvalidResponseStatus(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResponseStatus;

    #[test]
    fn status_cycle_wraps_both_ways() {
        assert_eq!(ResponseStatus::SwitchedOff.next(), ResponseStatus::NoAnswer);
        assert_eq!(ResponseStatus::NoAnswer.prev(), ResponseStatus::SwitchedOff);
        let mut status = ResponseStatus::NoAnswer;
        for _ in 0..ResponseStatus::ALL.len() {
            status = status.next();
        }
        assert_eq!(status, ResponseStatus::NoAnswer);
    }

    #[test]
    fn status_parses_wire_names_loosely() {
        assert_eq!(
            "call-back".parse::<ResponseStatus>().unwrap(),
            ResponseStatus::CallBack
        );
        assert_eq!(
            " Switched_Off ".parse::<ResponseStatus>().unwrap(),
            ResponseStatus::SwitchedOff
        );
        assert!("busy".parse::<ResponseStatus>().is_err());
    }

    #[test]
    fn status_shortcuts_are_one_based() {
        assert_eq!(
            ResponseStatus::from_shortcut('1'),
            Some(ResponseStatus::NoAnswer)
        );
        assert_eq!(
            ResponseStatus::from_shortcut('4'),
            Some(ResponseStatus::SwitchedOff)
        );
        assert_eq!(ResponseStatus::from_shortcut('0'), None);
        assert_eq!(ResponseStatus::from_shortcut('5'), None);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&ResponseStatus::NoAnswer).unwrap();
        assert_eq!(json, "\"no-answer\"");
    }
}
