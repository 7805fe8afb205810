use amparo_core::models::risk::RiskLevel;

/// App screens that may host an ad slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Directory,
    Chat,
    Sos,
    Assessments,
    Appointments,
}

impl Screen {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Screen::Home),
            "directory" => Some(Screen::Directory),
            "chat" => Some(Screen::Chat),
            "sos" => Some(Screen::Sos),
            "assessments" => Some(Screen::Assessments),
            "appointments" => Some(Screen::Appointments),
            _ => None,
        }
    }
}

/// Ads are never shown on sensitive screens or to anyone at `Medium` risk or
/// above; otherwise only on home and directory.
pub fn should_show_ads(screen: Screen, level: RiskLevel) -> bool {
    if matches!(screen, Screen::Chat | Screen::Sos | Screen::Assessments) {
        return false;
    }
    if level >= RiskLevel::Medium {
        return false;
    }
    matches!(screen, Screen::Home | Screen::Directory)
}
