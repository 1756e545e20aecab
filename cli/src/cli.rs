// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use studybuddy_core::{APP_NAME, StudyBuddy};
use tracing_subscriber::EnvFilter;

use crate::cmd_auth::{CmdAuthLogin, CmdAuthLogout, CmdAuthSignUp, CmdAuthWhoami};
use crate::cmd_dashboard::CmdDashboard;
use crate::cmd_exam::{
    CmdExamDelete, CmdExamEdit, CmdExamGrade, CmdExamList, CmdExamNew, CmdExamStats,
};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_library::{CmdLibraryCheckIn, CmdLibraryFavorite, CmdLibraryList, LibraryFilter};
use crate::cmd_pref::{CmdPrefLanguage, CmdPrefTheme};
use crate::cmd_profile::{
    CmdPhotoRemove, CmdPhotoUpload, CmdPhotoUrl, CmdProfileEdit, CmdProfileShow,
};
use crate::cmd_study::{CmdStudyList, CmdStudyStart, CmdStudyStop};
use crate::cmd_todo::{
    CmdTodoDelete, CmdTodoDone, CmdTodoEdit, CmdTodoList, CmdTodoNew, CmdTodoUndo,
};
use crate::config::parse_config;

/// Run the `StudyBuddy` command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Exams, to-dos, study sessions and the libraries you visit.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to dashboard
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/studybuddy/config.toml on Linux and \
MacOS, %APPDATA%/studybuddy/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdDashboard::command())
            .subcommand(
                Command::new("auth")
                    .about("Sign up, sign in and out")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdAuthSignUp::command())
                    .subcommand(CmdAuthLogin::command())
                    .subcommand(CmdAuthLogout::command())
                    .subcommand(CmdAuthWhoami::command()),
            )
            .subcommand(
                Command::new("exam")
                    .alias("e")
                    .about("Manage your exams")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdExamList::command())
                    .subcommand(CmdExamNew::command())
                    .subcommand(CmdExamEdit::command())
                    .subcommand(CmdExamGrade::command())
                    .subcommand(CmdExamDelete::command())
                    .subcommand(CmdExamStats::command()),
            )
            .subcommand(
                Command::new("todo")
                    .alias("t")
                    .about("Manage your to-do list")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTodoList::command())
                    .subcommand(CmdTodoNew::command())
                    .subcommand(CmdTodoEdit::command())
                    .subcommand(CmdTodoDone::command())
                    .subcommand(CmdTodoUndo::command())
                    .subcommand(CmdTodoDelete::command()),
            )
            .subcommand(
                Command::new("library")
                    .alias("lib")
                    .about("Browse libraries and record your visits")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdLibraryList::command())
                    .subcommand(CmdLibraryList::command_favorites())
                    .subcommand(CmdLibraryFavorite::command_add())
                    .subcommand(CmdLibraryFavorite::command_remove())
                    .subcommand(CmdLibraryList::command_visited())
                    .subcommand(CmdLibraryCheckIn::command()),
            )
            .subcommand(
                Command::new("study")
                    .alias("s")
                    .about("Track your study sessions")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdStudyStart::command())
                    .subcommand(CmdStudyStop::command())
                    .subcommand(CmdStudyList::command()),
            )
            .subcommand(
                Command::new("pref")
                    .about("Show or change preferences")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdPrefTheme::command())
                    .subcommand(CmdPrefLanguage::command()),
            )
            .subcommand(
                Command::new("profile")
                    .about("Show or edit your profile")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdProfileShow::command())
                    .subcommand(CmdProfileEdit::command())
                    .subcommand(
                        Command::new("photo")
                            .about("Manage your profile photo")
                            .arg_required_else_help(true)
                            .subcommand_required(true)
                            .subcommand(CmdPhotoUpload::command())
                            .subcommand(CmdPhotoRemove::command())
                            .subcommand(CmdPhotoUrl::command()),
                    ),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDashboard::NAME, matches)) => Dashboard(CmdDashboard::from(matches)),
            Some(("auth", matches)) => match matches.subcommand() {
                Some((CmdAuthSignUp::NAME, m)) => AuthSignUp(CmdAuthSignUp::from(m)),
                Some((CmdAuthLogin::NAME, m)) => AuthLogin(CmdAuthLogin::from(m)),
                Some((CmdAuthLogout::NAME, m)) => AuthLogout(CmdAuthLogout::from(m)),
                Some((CmdAuthWhoami::NAME, m)) => AuthWhoami(CmdAuthWhoami::from(m)),
                _ => unreachable!(),
            },
            Some(("exam", matches)) => match matches.subcommand() {
                Some((CmdExamList::NAME, m)) => ExamList(CmdExamList::from(m)),
                Some((CmdExamNew::NAME, m)) => ExamNew(CmdExamNew::from(m)),
                Some((CmdExamEdit::NAME, m)) => ExamEdit(CmdExamEdit::from(m)),
                Some((CmdExamGrade::NAME, m)) => ExamGrade(CmdExamGrade::from(m)),
                Some((CmdExamDelete::NAME, m)) => ExamDelete(CmdExamDelete::from(m)),
                Some((CmdExamStats::NAME, m)) => ExamStats(CmdExamStats::from(m)),
                _ => unreachable!(),
            },
            Some(("todo", matches)) => match matches.subcommand() {
                Some((CmdTodoList::NAME, m)) => TodoList(CmdTodoList::from(m)),
                Some((CmdTodoNew::NAME, m)) => TodoNew(CmdTodoNew::from(m)),
                Some((CmdTodoEdit::NAME, m)) => TodoEdit(CmdTodoEdit::from(m)),
                Some((CmdTodoDone::NAME, m)) => TodoDone(CmdTodoDone::from(m)),
                Some((CmdTodoUndo::NAME, m)) => TodoUndo(CmdTodoUndo::from(m)),
                Some((CmdTodoDelete::NAME, m)) => TodoDelete(CmdTodoDelete::from(m)),
                _ => unreachable!(),
            },
            Some(("library", matches)) => match matches.subcommand() {
                Some((CmdLibraryList::NAME, m)) => {
                    LibraryList(CmdLibraryList::from(m, LibraryFilter::All))
                }
                Some((CmdLibraryList::NAME_FAVORITES, m)) => {
                    LibraryList(CmdLibraryList::from(m, LibraryFilter::Favorites))
                }
                Some((CmdLibraryList::NAME_VISITED, m)) => {
                    LibraryList(CmdLibraryList::from(m, LibraryFilter::Visited))
                }
                Some((CmdLibraryFavorite::NAME_ADD, m)) => {
                    LibraryFavorite(CmdLibraryFavorite::from(m, true))
                }
                Some((CmdLibraryFavorite::NAME_REMOVE, m)) => {
                    LibraryFavorite(CmdLibraryFavorite::from(m, false))
                }
                Some((CmdLibraryCheckIn::NAME, m)) => LibraryCheckIn(CmdLibraryCheckIn::from(m)),
                _ => unreachable!(),
            },
            Some(("study", matches)) => match matches.subcommand() {
                Some((CmdStudyStart::NAME, m)) => StudyStart(CmdStudyStart::from(m)),
                Some((CmdStudyStop::NAME, m)) => StudyStop(CmdStudyStop::from(m)),
                Some((CmdStudyList::NAME, m)) => StudyList(CmdStudyList::from(m)),
                _ => unreachable!(),
            },
            Some(("pref", matches)) => match matches.subcommand() {
                Some((CmdPrefTheme::NAME, m)) => PrefTheme(CmdPrefTheme::from(m)),
                Some((CmdPrefLanguage::NAME, m)) => PrefLanguage(CmdPrefLanguage::from(m)),
                _ => unreachable!(),
            },
            Some(("profile", matches)) => match matches.subcommand() {
                Some((CmdProfileShow::NAME, m)) => ProfileShow(CmdProfileShow::from(m)),
                Some((CmdProfileEdit::NAME, m)) => ProfileEdit(CmdProfileEdit::from(m)),
                Some(("photo", matches)) => match matches.subcommand() {
                    Some((CmdPhotoUpload::NAME, m)) => PhotoUpload(CmdPhotoUpload::from(m)),
                    Some((CmdPhotoRemove::NAME, m)) => PhotoRemove(CmdPhotoRemove::from(m)),
                    Some((CmdPhotoUrl::NAME, m)) => PhotoUrl(CmdPhotoUrl::from(m)),
                    _ => unreachable!(),
                },
                _ => unreachable!(),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Dashboard(CmdDashboard),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the dashboard
    Dashboard(CmdDashboard),

    /// Create an account
    AuthSignUp(CmdAuthSignUp),

    /// Sign in
    AuthLogin(CmdAuthLogin),

    /// Sign out
    AuthLogout(CmdAuthLogout),

    /// Show the signed-in user
    AuthWhoami(CmdAuthWhoami),

    /// List exams
    ExamList(CmdExamList),

    /// Add an exam
    ExamNew(CmdExamNew),

    /// Edit an exam
    ExamEdit(CmdExamEdit),

    /// Record or clear a grade
    ExamGrade(CmdExamGrade),

    /// Delete exams
    ExamDelete(CmdExamDelete),

    /// Show exam statistics
    ExamStats(CmdExamStats),

    /// List to-dos
    TodoList(CmdTodoList),

    /// Add a to-do
    TodoNew(CmdTodoNew),

    /// Edit a to-do
    TodoEdit(CmdTodoEdit),

    /// Mark to-dos as done
    TodoDone(CmdTodoDone),

    /// Mark to-dos as not done
    TodoUndo(CmdTodoUndo),

    /// Delete to-dos
    TodoDelete(CmdTodoDelete),

    /// List libraries, all or filtered
    LibraryList(CmdLibraryList),

    /// Add or remove a favourite
    LibraryFavorite(CmdLibraryFavorite),

    /// Record visits to nearby libraries
    LibraryCheckIn(CmdLibraryCheckIn),

    /// Start a study session
    StudyStart(CmdStudyStart),

    /// Stop the running study session
    StudyStop(CmdStudyStop),

    /// List study sessions
    StudyList(CmdStudyList),

    /// Show or set the theme
    PrefTheme(CmdPrefTheme),

    /// Show or set the language
    PrefLanguage(CmdPrefLanguage),

    /// Show the profile
    ProfileShow(CmdProfileShow),

    /// Edit the profile
    ProfileEdit(CmdProfileEdit),

    /// Upload a profile photo
    PhotoUpload(CmdPhotoUpload),

    /// Remove the profile photo
    PhotoRemove(CmdPhotoRemove),

    /// Print the profile photo URL
    PhotoUrl(CmdPhotoUrl),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Dashboard(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            AuthSignUp(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            AuthLogin(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            AuthLogout(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            AuthWhoami(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            ExamList(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            ExamNew(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            ExamEdit(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            ExamGrade(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            ExamDelete(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            ExamStats(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoList(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoNew(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoEdit(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoDone(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoUndo(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            TodoDelete(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            LibraryList(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            LibraryFavorite(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            LibraryCheckIn(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            StudyStart(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            StudyStop(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            StudyList(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            PrefTheme(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            PrefLanguage(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfileShow(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            ProfileEdit(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            PhotoUpload(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            PhotoRemove(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            PhotoUrl(a)        => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut StudyBuddy) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let mut app = StudyBuddy::new(core_config).await?;

        let result = f(&mut app).await;
        app.close().await;
        result
    }
}
