use chrono::NaiveDate;
use datewheel::WheelKind;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requests that reach the window from outside the GTK event loop (control socket, CLI,
/// config watcher).
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    JumpToToday,
    Select(NaiveDate),
    Navigate(i32),
    SwitchKind(WheelKind),
    ConfigReload,
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Command '{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("Invalid date: {0}")]
    Date(#[from] chrono::ParseError),
    #[error("Invalid wheel kind: {0}")]
    Kind(#[from] strum::ParseError),
}

impl FromStr for AppEvent {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let arg = parts.next();

        match cmd.to_ascii_lowercase().as_str() {
            "today" => Ok(Self::JumpToToday),
            "next" => Ok(Self::Navigate(1)),
            "prev" => Ok(Self::Navigate(-1)),
            "reload" => Ok(Self::ConfigReload),
            "select" => {
                let date = arg.ok_or(CommandError::MissingArgument("select"))?;
                Ok(Self::Select(date.parse()?))
            }
            "kind" => {
                let kind = arg.ok_or(CommandError::MissingArgument("kind"))?;
                Ok(Self::SwitchKind(kind.parse()?))
            }
            "week" => Ok(Self::SwitchKind(WheelKind::Week)),
            "month" => Ok(Self::SwitchKind(WheelKind::Month)),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Renders the event in the socket line protocol.
impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JumpToToday => write!(f, "today"),
            Self::Select(date) => write!(f, "select {}", date.format("%Y-%m-%d")),
            Self::Navigate(steps) if *steps < 0 => write!(f, "prev"),
            Self::Navigate(_) => write!(f, "next"),
            Self::SwitchKind(WheelKind::Week) => write!(f, "week"),
            Self::SwitchKind(WheelKind::Month) => write!(f, "month"),
            Self::ConfigReload => write!(f, "reload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("today", AppEvent::JumpToToday),
            ("  NEXT ", AppEvent::Navigate(1)),
            ("prev", AppEvent::Navigate(-1)),
            (
                "select 2026-10-20",
                AppEvent::Select(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()),
            ),
            ("kind month", AppEvent::SwitchKind(WheelKind::Month)),
            ("week", AppEvent::SwitchKind(WheelKind::Week)),
            ("reload", AppEvent::ConfigReload),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<AppEvent>().unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "select".parse::<AppEvent>(),
            Err(CommandError::MissingArgument("select"))
        ));
        assert!(matches!(
            "select 20-10-2026x".parse::<AppEvent>(),
            Err(CommandError::Date(_))
        ));
        assert!(matches!(
            "kind year".parse::<AppEvent>(),
            Err(CommandError::Kind(_))
        ));
        assert!(matches!(
            "show".parse::<AppEvent>(),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!("".parse::<AppEvent>(), Err(CommandError::Unknown(_))));
    }

    #[test]
    fn test_display_matches_protocol() {
        let select = AppEvent::Select(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(select.to_string(), "select 2026-01-05");
        assert_eq!(AppEvent::Navigate(-3).to_string(), "prev");
        assert_eq!(
            AppEvent::SwitchKind(WheelKind::Month).to_string(),
            "month"
        );
    }
}
