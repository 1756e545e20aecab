// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use studybuddy_core::{Language, StudyBuddy, Theme};

#[derive(Debug, Clone, Copy)]
pub struct CmdPrefTheme {
    pub value: Option<Theme>,
}

impl CmdPrefTheme {
    pub const NAME: &str = "theme";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show or set the colour theme")
            .arg(arg!(value: [THEME] "New theme").value_parser(value_parser!(Theme)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            value: matches.get_one("value").copied(),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        if let Some(theme) = self.value {
            tracing::debug!(%theme, "setting theme...");
            app.set_theme(theme).await?;
        }
        println!("{}", app.theme());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdPrefLanguage {
    pub value: Option<Language>,
}

impl CmdPrefLanguage {
    pub const NAME: &str = "language";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("lang")
            .about("Show or set the interface language")
            .arg(arg!(value: [LANGUAGE] "New language").value_parser(value_parser!(Language)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            value: matches.get_one("value").copied(),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        if let Some(language) = self.value {
            tracing::debug!(%language, "setting language...");
            app.set_language(language).await?;
        }
        println!("{}", app.language());
        Ok(())
    }
}
