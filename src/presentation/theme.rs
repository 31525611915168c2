use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub meta: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub para: fn(&str) -> String,
    pub value: fn(&str) -> String,
    pub status: fn(&str) -> String,
    pub error: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "kanto" => Self::kanto(),
            "gameboy" => Self::gameboy(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp()
            }
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            meta: |s| s.normal().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            label: |s| s.cyan().to_string(),
            idx: |s| s.bright_white().to_string(),
            para: |s| s.white().to_string(),
            value: |s| s.yellow().to_string(),
            status: |s| s.bright_white().dimmed().italic().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }

    fn kanto() -> Self {
        Self {
            title: |s| s.red().italic().bold().underline().to_string(),
            meta: |s| s.cyan().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            label: |s| s.green().italic().to_string(),
            idx: |s| s.bright_white().to_string(),
            para: |s| s.white().to_string(),
            value: |s| s.bright_white().to_string(),
            status: |s| s.bright_yellow().dimmed().italic().to_string(),
            error: |s| s.red().italic().to_string(),
        }
    }

    fn gameboy() -> Self {
        Self {
            title: |s| s.green().bold().underline().to_string(),
            meta: |s| s.bright_green().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            label: |s| s.bright_green().bold().to_string(),
            idx: |s| s.green().to_string(),
            para: |s| s.bright_green().to_string(),
            value: |s| s.bright_green().bold().to_string(),
            status: |s| s.green().dimmed().italic().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }
}
