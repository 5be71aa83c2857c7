use colored::Colorize;

pub struct Theme {
    pub translation: fn(&str) -> String,
    pub service: fn(&str) -> String,
    pub lang: fn(&str) -> String,
    pub note: fn(&str) -> String,
    pub error: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "classic" | "" => Self::classic(),
            "ocean" => Self::ocean(),
            "mono" => Self::mono(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::classic() // Fallback to default
            }
        }
    }

    fn classic() -> Self {
        Self {
            translation: |s| s.bright_white().bold().to_string(),
            service: |s| s.cyan().to_string(),
            lang: |s| s.green().italic().to_string(),
            note: |s| s.yellow().dimmed().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }

    fn ocean() -> Self {
        Self {
            translation: |s| s.bright_blue().bold().to_string(),
            service: |s| s.bright_cyan().italic().to_string(),
            lang: |s| s.blue().to_string(),
            note: |s| s.bright_black().italic().to_string(),
            error: |s| s.magenta().bold().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            translation: |s| s.to_string(),
            service: |s| s.to_string(),
            lang: |s| s.to_string(),
            note: |s| s.to_string(),
            error: |s| s.to_string(),
        }
    }
}
