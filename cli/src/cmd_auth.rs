// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use studybuddy_core::{NewProfile, SignUpOutcome, StudyBuddy};

use crate::cmd_profile::print_profile;
use crate::prompt::{prompt_new_password, prompt_password};
use crate::util::ArgOutputFormat;

#[derive(Debug, Clone)]
pub struct CmdAuthSignUp {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub degree_course: Option<String>,
}

impl CmdAuthSignUp {
    pub const NAME: &str = "signup";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("register")
            .about("Create an account")
            .arg(arg!(<EMAIL> "Email address to sign in with"))
            .arg(arg!(--name <NAME> "First name").required(true))
            .arg(arg!(--surname <SURNAME> "Last name").required(true))
            .arg(arg!(--"degree-course" <COURSE> "Your degree course"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned();
        Self {
            email: get("EMAIL").unwrap_or_default(),
            name: get("name").unwrap_or_default(),
            surname: get("surname").unwrap_or_default(),
            degree_course: get("degree-course"),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(email = %self.email, "signing up...");
        let password = prompt_new_password()?;
        let profile = NewProfile {
            name: self.name,
            surname: self.surname,
            degree_course: self.degree_course,
        };

        match app.sign_up(&self.email, &password, &profile).await? {
            SignUpOutcome::SignedIn(profile) => {
                let name = profile.full_name();
                println!("{} signed in as {name}", "Welcome!".green());
            }
            SignUpOutcome::ConfirmationRequired => {
                let email = self.email.as_str().bold();
                println!("Account created. Confirm the link sent to {email}.");
                println!("Then run `studybuddy auth login`.");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdAuthLogin {
    pub email: String,
}

impl CmdAuthLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("signin")
            .about("Sign in with email and password")
            .arg(arg!(<EMAIL> "Email address of the account"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            email: matches.get_one::<String>("EMAIL").cloned().unwrap_or_default(),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(email = %self.email, "signing in...");
        let password = prompt_password()?;
        let session = app.sign_in(&self.email, &password).await?;
        let email = session.user.email.as_deref().unwrap_or(&self.email);
        println!("Signed in as {}", email.bold());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdAuthLogout;

impl CmdAuthLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("signout")
            .about("Sign out and forget the local session")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdAuthLogout
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        if app.session().is_none() {
            println!("Not signed in.");
            return Ok(());
        }
        app.sign_out().await?;
        println!("Signed out.");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdAuthWhoami {
    pub output_format: ArgOutputFormat,
}

impl CmdAuthWhoami {
    pub const NAME: &str = "whoami";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the signed-in user")
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        let profile = app.profile().await?;
        print_profile(&profile, self.output_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signup() {
        let cmd = Command::new("test").subcommand(CmdAuthSignUp::command());
        let matches = cmd
            .try_get_matches_from([
                "test",
                "signup",
                "mario.rossi@studio.unibo.it",
                "--name",
                "Mario",
                "--surname",
                "Rossi",
                "--degree-course",
                "Informatica",
            ])
            .unwrap();
        let sub_matches = matches.subcommand_matches("signup").unwrap();
        let parsed = CmdAuthSignUp::from(sub_matches);
        assert_eq!(parsed.email, "mario.rossi@studio.unibo.it");
        assert_eq!(parsed.name, "Mario");
        assert_eq!(parsed.surname, "Rossi");
        assert_eq!(parsed.degree_course.as_deref(), Some("Informatica"));
    }

    #[test]
    fn test_signup_requires_names() {
        let cmd = Command::new("test").subcommand(CmdAuthSignUp::command());
        let result = cmd.try_get_matches_from(["test", "signup", "a@b.it", "--name", "Mario"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_login() {
        let cmd = Command::new("test").subcommand(CmdAuthLogin::command());
        let args = ["test", "signin", "a@b.it"];
        let matches = cmd.try_get_matches_from(args).unwrap();
        let sub_matches = matches.subcommand_matches("login").unwrap();
        assert_eq!(CmdAuthLogin::from(sub_matches).email, "a@b.it");
    }
}
