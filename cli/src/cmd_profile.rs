// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf};

use clap::{Arg, ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use studybuddy_core::{ProfilePatch, StudyBuddy, UserProfile};

use crate::util::ArgOutputFormat;

pub fn print_profile(profile: &UserProfile, format: ArgOutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        ArgOutputFormat::Json => println!("{}", serde_json::to_string_pretty(profile)?),
        ArgOutputFormat::Table => {
            println!("{}", profile.full_name().as_str().bold());
            println!("{:<8} {}", "Email", profile.email);
            if let Some(course) = &profile.degree_course {
                println!("{:<8} {}", "Course", course);
            }
            if let Some(url) = &profile.image_url {
                println!("{:<8} {}", "Photo", url);
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct CmdProfileShow {
    pub output_format: ArgOutputFormat,
}

impl CmdProfileShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show your profile")
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

#[derive(Debug, Clone)]
pub struct CmdProfileEdit {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub degree_course: Option<String>,
    pub output_format: ArgOutputFormat,
}

impl CmdProfileEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Change your name or degree course")
            .arg(arg!(--name <NAME> "First name"))
            .arg(arg!(--surname <SURNAME> "Last name"))
            .arg(arg_degree_course())
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned();
        Self {
            name: get("name"),
            surname: get("surname"),
            degree_course: get("degree-course"),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub fn patch(&self) -> ProfilePatch {
        ProfilePatch {
            name: self.name.clone(),
            surname: self.surname.clone(),
            degree_course: self
                .degree_course
                .as_ref()
                .map(|c| (!c.trim().is_empty()).then(|| c.trim().to_string())),
            image_url: None,
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        let patch = self.patch();
        tracing::debug!(?patch, "updating profile...");
        let profile = app.update_profile(&patch).await?;
        print_profile(&profile, self.output_format)
    }
}

#[derive(Debug, Clone)]
pub struct CmdPhotoUpload {
    pub path: PathBuf,
}

impl CmdPhotoUpload {
    pub const NAME: &str = "upload";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Upload a JPEG as your profile photo")
            .arg(
                arg!(<PATH> "Path of the photo")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            path: matches.get_one::<PathBuf>("PATH").cloned().unwrap_or_default(),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(path = %self.path.display(), "uploading profile photo...");
        let profile = app.upload_profile_image(&self.path).await?;
        match profile.image_url {
            Some(url) => println!("Photo uploaded: {url}"),
            None => println!("Photo uploaded."),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdPhotoRemove;

impl CmdPhotoRemove {
    pub const NAME: &str = "remove";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete your profile photo")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdPhotoRemove
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        app.remove_profile_image().await?;
        println!("Photo removed.");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdPhotoUrl;

impl CmdPhotoUrl {
    pub const NAME: &str = "url";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Print the public URL of your profile photo")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        CmdPhotoUrl
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        println!("{}", app.profile_image_url()?);
        Ok(())
    }
}

fn arg_degree_course() -> Arg {
    arg!(--"degree-course" <COURSE> "Degree course, empty to clear")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_patch_clears_empty_course() {
        let cmd = Command::new("test").subcommand(CmdProfileEdit::command());
        let matches = cmd
            .try_get_matches_from(["test", "edit", "--name", "Lucia", "--degree-course", ""])
            .unwrap();
        let parsed = CmdProfileEdit::from(matches.subcommand_matches("edit").unwrap());
        let patch = parsed.patch();
        assert_eq!(patch.name.as_deref(), Some("Lucia"));
        assert_eq!(patch.surname, None);
        assert_eq!(patch.degree_course, Some(None));
    }

    #[test]
    fn test_parse_photo_upload() {
        let cmd = Command::new("test").subcommand(CmdPhotoUpload::command());
        let matches = cmd
            .try_get_matches_from(["test", "upload", "/tmp/me.jpg"])
            .unwrap();
        let parsed = CmdPhotoUpload::from(matches.subcommand_matches("upload").unwrap());
        assert_eq!(parsed.path, PathBuf::from("/tmp/me.jpg"));
    }
}
