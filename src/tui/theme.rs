use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub normal: Style,
    pub selected: Style,
    pub sensitive: Style,
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub help: Style,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        if name == "light" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn dark() -> Self {
        Self {
            normal: Style::default().fg(Color::White),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sensitive: Style::default().fg(Color::Magenta),
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Green),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            help: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Self {
            normal: Style::default().fg(Color::Black),
            selected: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sensitive: Style::default().fg(Color::Magenta),
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::DarkGray),
            error: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            help: Style::default().fg(Color::Gray),
        }
    }
}
