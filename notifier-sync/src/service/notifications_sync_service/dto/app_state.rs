use strum::{AsRefStr, EnumString};

///
/// Lifecycle state of the host application
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AppState {
    #[default]
    Active,
    Inactive,
    Background,
}

impl AppState {
    ///
    /// `true` when application came back to the foreground
    ///
    pub fn is_resumed_from(self, previous: AppState) -> bool {
        self == AppState::Active && previous != AppState::Active
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn is_resumed_from() {
        assert!(AppState::Active.is_resumed_from(AppState::Background));
        assert!(AppState::Active.is_resumed_from(AppState::Inactive));
        assert!(!AppState::Active.is_resumed_from(AppState::Active));
        assert!(!AppState::Background.is_resumed_from(AppState::Inactive));
        assert!(!AppState::Inactive.is_resumed_from(AppState::Active));
    }

    #[test]
    fn parse() {
        assert_eq!(AppState::from_str("background").unwrap(), AppState::Background);
        assert_eq!(AppState::Inactive.as_ref(), "inactive");
        assert!(AppState::from_str("sleeping").is_err());
    }
}
