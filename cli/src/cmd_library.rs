// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use studybuddy_core::{
    Coordinate, FixedLocationProvider, Library, LibraryId, LocationOutcome, LocationProvider,
    Remedy, StudyBuddy, UnavailableLocationProvider, VisitCheck, location_acquirer,
};

use crate::library_formatter::{LibraryEntry, LibraryFormatter};
use crate::util::ArgOutputFormat;

/// Which libraries a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryFilter {
    All,
    Favorites,
    Visited,
}

#[derive(Debug, Clone, Copy)]
pub struct CmdLibraryList {
    pub filter: LibraryFilter,
    pub at: Option<Coordinate>,
    pub output_format: ArgOutputFormat,
}

impl CmdLibraryList {
    pub const NAME: &str = "list";
    pub const NAME_FAVORITES: &str = "favorites";
    pub const NAME_VISITED: &str = "visited";

    pub fn command() -> Command {
        Self::command_with(Self::NAME, "List the libraries").alias("ls")
    }

    pub fn command_favorites() -> Command {
        Self::command_with(Self::NAME_FAVORITES, "List your favourite libraries")
    }

    pub fn command_visited() -> Command {
        Self::command_with(Self::NAME_VISITED, "List the libraries you have visited")
    }

    fn command_with(name: &'static str, about: &'static str) -> Command {
        Command::new(name)
            .about(about)
            .arg(arg_at().help("Sort by distance from LAT,LON"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches, filter: LibraryFilter) -> Self {
        Self {
            filter,
            at: get_at(matches),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing libraries...");
        let libraries = app.libraries().await?;
        let favorites = app.favorites().await?;
        let visited = app.visited().await?;

        let position = self.at.or(app.config().location.fixed);
        let here = position.as_ref();
        let mut entries = LibraryEntry::collect(&libraries, &favorites, &visited, here);
        entries.retain(|e| match self.filter {
            LibraryFilter::All => true,
            LibraryFilter::Favorites => e.favorite,
            LibraryFilter::Visited => e.visited,
        });
        entries.sort_by(|a, b| {
            let (a, b) = (a.distance_m.unwrap_or(0.0), b.distance_m.unwrap_or(0.0));
            a.total_cmp(&b)
        });

        let mut formatter = LibraryFormatter::new().with_output_format(self.output_format);
        if position.is_some() {
            formatter = formatter.with_distance();
        }
        print!("{}", formatter.format(&entries));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdLibraryFavorite {
    pub id: LibraryId,
    pub favorite: bool,
}

impl CmdLibraryFavorite {
    pub const NAME_ADD: &str = "favorite";
    pub const NAME_REMOVE: &str = "unfavorite";

    pub fn command_add() -> Command {
        Command::new(Self::NAME_ADD)
            .alias("fav")
            .about("Add a library to your favourites")
            .arg(arg_id())
    }

    pub fn command_remove() -> Command {
        Command::new(Self::NAME_REMOVE)
            .alias("unfav")
            .about("Remove a library from your favourites")
            .arg(arg_id())
    }

    pub fn from(matches: &ArgMatches, favorite: bool) -> Self {
        Self {
            id: matches.get_one("id").copied().unwrap_or_default(),
            favorite,
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "updating favourites...");
        if self.favorite {
            app.add_favorite(self.id).await?;
            println!("Library {} added to favourites", self.id);
        } else {
            app.remove_favorite(self.id).await?;
            println!("Library {} removed from favourites", self.id);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdLibraryCheckIn {
    pub at: Option<Coordinate>,
}

impl CmdLibraryCheckIn {
    pub const NAME: &str = "check-in";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("checkin")
            .about("Record a visit to every library close to your position")
            .arg(arg_at().help("Current position as LAT,LON"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            at: get_at(matches),
        }
    }

    pub async fn run(self, app: &mut StudyBuddy) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking in...");
        let (check, remedy) = match self.at.or(app.config().location.fixed) {
            Some(position) => check_in(app, FixedLocationProvider::new(position)).await?,
            None => check_in(app, UnavailableLocationProvider).await?,
        };

        match &check.outcome {
            LocationOutcome::Ready(position) => {
                println!("Position {position}");
            }
            LocationOutcome::Disabled => {
                println!(
                    "{} location is not available. Pass --at LAT,LON or set core.location.fixed",
                    "Warning:".yellow()
                );
                return Ok(());
            }
            LocationOutcome::PermissionMissing => {
                println!("{} {}", "Warning:".yellow(), remedy_message(remedy));
                return Ok(());
            }
            LocationOutcome::ProviderError(reason) => {
                println!("{} no position: {reason}", "Warning:".yellow());
                return Ok(());
            }
        }

        if check.report.is_empty() {
            let radius = app.config().visit_radius_m;
            println!("No new library within {radius:.0} m");
            return Ok(());
        }

        let libraries = app.libraries().await?;
        print!("{}", format_report(&check, &libraries));
        Ok(())
    }
}

async fn check_in<P: LocationProvider>(
    app: &StudyBuddy,
    provider: P,
) -> Result<(VisitCheck, Remedy), Box<dyn Error>> {
    let mut acquirer = location_acquirer(app.config(), provider);
    let check = app.check_visits(&mut acquirer).await?;
    Ok((check, acquirer.permission().remedy()))
}

fn remedy_message(remedy: Remedy) -> &'static str {
    match remedy {
        Remedy::None => "location permission granted",
        Remedy::Prompt => "location permission is needed, allow it when asked",
        Remedy::OpenSettings => "location permission was refused, enable it in the system settings",
    }
}

fn format_report(check: &VisitCheck, libraries: &[Library]) -> String {
    let name = |id: LibraryId| {
        libraries
            .iter()
            .find(|l| l.id == id)
            .map_or_else(|| format!("#{id}"), |l| l.name.clone())
    };

    let mut out = String::new();
    for mark in &check.report.marked {
        out.push_str(&format!(
            "{} {} ({:.0} m)\n",
            "Visited".green(),
            name(mark.library_id),
            mark.distance_m
        ));
    }
    for (id, err) in &check.report.failed {
        out.push_str(&format!("{} {}: {err}\n", "Failed".red(), name(*id)));
    }
    out
}

fn arg_id() -> Arg {
    arg!(id: <ID> "Id of the library").value_parser(value_parser!(LibraryId))
}

fn arg_at() -> Arg {
    Arg::new("at")
        .long("at")
        .value_name("LAT,LON")
        .value_parser(value_parser!(Coordinate))
}

fn get_at(matches: &ArgMatches) -> Option<Coordinate> {
    matches.get_one("at").copied()
}
