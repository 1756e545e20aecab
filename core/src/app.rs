// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::path::Path;

use jiff::Timestamp;
use studybuddy_backend::{BackendClient, BackendError, Session};
use tokio::sync::watch;

use crate::localdb::{LocalDb, StudySessionRecord};
use crate::location::{LocationAcquirer, LocationOutcome, LocationProvider, Remedy};
use crate::photo::ProfileImageStore;
use crate::preferences::{Language, PreferenceStore, Theme};
use crate::proximity::ProximityDetector;
use crate::remote::Repositories;
use crate::stats::ExamStats;
use crate::visits::{VisitReport, VisitTracker};
use crate::{
    Config, Error, Exam, ExamDraft, ExamId, ExamPatch, Library, LibraryId, NewProfile, Pager,
    ProfilePatch, StudySession, Todo, TodoDraft, TodoId, TodoPatch, UserProfile, VisitedSet,
};

/// Result of a sign-up.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// The account is active and signed in; its profile row was created.
    SignedIn(UserProfile),
    /// The email address must be confirmed before signing in.
    ConfirmationRequired,
}

/// Result of a visit check: where the device was, and what was marked.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitCheck {
    pub outcome: LocationOutcome,
    pub report: VisitReport,
}

/// `StudyBuddy` application core.
#[derive(Debug)]
pub struct StudyBuddy {
    config: Config,
    db: LocalDb,
    client: BackendClient,
    session: Option<Session>,
    theme: PreferenceStore<Theme>,
    language: PreferenceStore<Language>,
}

impl StudyBuddy {
    /// Creates a new instance with the given configuration, restoring the
    /// previous session if there is one.
    pub async fn new(mut config: Config) -> Result<Self, Error> {
        config.normalize()?;
        prepare(&config).await?;

        let db = LocalDb::open(config.db_path().as_deref()).await?;
        let client = BackendClient::new(config.backend.clone())?;
        let theme = PreferenceStore::open(db.preferences.clone()).await?;
        let language = PreferenceStore::open(db.preferences.clone()).await?;

        let mut that = Self {
            config,
            db,
            client,
            session: None,
            theme,
            language,
        };
        that.restore_session().await?;
        Ok(that)
    }

    async fn restore_session(&mut self) -> Result<(), Error> {
        let Some(session) = self.db.auth.get().await? else {
            return Ok(());
        };

        if !session.is_expired(Timestamp::now()) {
            self.session = Some(session);
            return Ok(());
        }

        match self.client.refresh_session(&session).await {
            Ok(fresh) => {
                self.db.auth.save(&fresh).await?;
                self.session = Some(fresh);
            }
            Err(err) => {
                tracing::warn!(%err, "failed to refresh the stored session, signing out");
                self.db.auth.clear().await?;
            }
        }
        Ok(())
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The signed-in session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn require_session(&self) -> Result<&Session, Error> {
        self.session.as_ref().ok_or(Error::NotSignedIn)
    }

    fn repositories(&self) -> Result<Repositories, Error> {
        let session = self.require_session()?;
        let client = self.client.with_session(session);
        Ok(Repositories::new(client, session.user.id))
    }

    /// Registers an account and, when the service signs it in right away,
    /// creates its profile row.
    #[tracing::instrument(skip(self, password, profile))]
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        profile: &NewProfile,
    ) -> Result<SignUpOutcome, Error> {
        let signed_up = self
            .client
            .sign_up(email, password)
            .await
            .map_err(|e| match e {
                BackendError::UserAlreadyExists => Error::UserAlreadyExists,
                e => Error::Backend(e),
            })?;

        let Some(session) = signed_up.session else {
            tracing::info!(user_id = %signed_up.user.id, "sign-up awaits email confirmation");
            return Ok(SignUpOutcome::ConfirmationRequired);
        };

        self.db.auth.save(&session).await?;
        self.session = Some(session);
        let profile = self.repositories()?.users.create(email, profile).await?;
        Ok(SignUpOutcome::SignedIn(profile))
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session, Error> {
        let session = self.client.sign_in(email, password).await?;
        self.db.auth.save(&session).await?;
        Ok(self.session.insert(session))
    }

    /// Signs out. The local session is dropped even if the server cannot be
    /// reached.
    pub async fn sign_out(&mut self) -> Result<(), Error> {
        if let Some(session) = self.session.take()
            && let Err(err) = self.client.sign_out(&session).await
        {
            tracing::warn!(%err, "failed to revoke session on the server");
        }
        self.db.auth.clear().await?;
        Ok(())
    }

    pub async fn profile(&self) -> Result<UserProfile, Error> {
        self.repositories()?.users.get().await
    }

    pub async fn update_profile(&self, patch: &ProfilePatch) -> Result<UserProfile, Error> {
        self.repositories()?.users.update(patch).await
    }

    pub async fn exams(&self) -> Result<Vec<Exam>, Error> {
        self.repositories()?.exams.list().await
    }

    pub async fn exam(&self, id: ExamId) -> Result<Exam, Error> {
        self.repositories()?.exams.get(id).await
    }

    pub async fn new_exam(&self, draft: &ExamDraft) -> Result<Exam, Error> {
        self.repositories()?.exams.create(draft).await
    }

    pub async fn update_exam(&self, id: ExamId, patch: &ExamPatch) -> Result<Exam, Error> {
        self.repositories()?.exams.update(id, patch).await
    }

    pub async fn delete_exam(&self, id: ExamId) -> Result<(), Error> {
        self.repositories()?.exams.delete(id).await
    }

    pub async fn exam_stats(&self) -> Result<ExamStats, Error> {
        let exams = self.exams().await?;
        Ok(ExamStats::from_exams(&exams))
    }

    pub async fn todos(&self, include_done: bool) -> Result<Vec<Todo>, Error> {
        self.repositories()?.todos.list(include_done).await
    }

    pub async fn new_todo(&self, draft: &TodoDraft) -> Result<Todo, Error> {
        self.repositories()?.todos.create(draft).await
    }

    pub async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> Result<Todo, Error> {
        self.repositories()?.todos.update(id, patch).await
    }

    pub async fn set_todo_done(&self, id: TodoId, done: bool) -> Result<Todo, Error> {
        self.repositories()?.todos.set_done(id, done).await
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<(), Error> {
        self.repositories()?.todos.delete(id).await
    }

    pub async fn libraries(&self) -> Result<Vec<Library>, Error> {
        self.repositories()?.libraries.list().await
    }

    /// Ids of the favourite libraries.
    pub async fn favorites(&self) -> Result<BTreeSet<LibraryId>, Error> {
        self.repositories()?.favorites.list().await
    }

    pub async fn add_favorite(&self, library_id: LibraryId) -> Result<(), Error> {
        let repos = self.repositories()?;
        repos.libraries.get(library_id).await?;
        repos.favorites.add(library_id).await
    }

    pub async fn remove_favorite(&self, library_id: LibraryId) -> Result<(), Error> {
        self.repositories()?.favorites.remove(library_id).await
    }

    fn visit_tracker(&self) -> Result<VisitTracker, Error> {
        let detector = ProximityDetector::with_radius(self.config.visit_radius_m)?;
        let remote = self.repositories()?.visited;
        let cache = self.db.visited.clone();
        Ok(VisitTracker::new(detector, remote, cache))
    }

    /// Libraries the user has visited, refreshing the local cache.
    pub async fn visited(&self) -> Result<VisitedSet, Error> {
        self.visit_tracker()?.load().await
    }

    /// Acquires the position and marks every library in range as visited.
    ///
    /// A missing permission that may still be asked for is requested once,
    /// and the fix retried if it is granted. A failed acquisition is not an
    /// error: the outcome is returned with an empty report.
    pub async fn check_visits<P: LocationProvider>(
        &self,
        acquirer: &mut LocationAcquirer<P>,
    ) -> Result<VisitCheck, Error> {
        let tracker = self.visit_tracker()?;
        let mut outcome = acquirer.acquire().await;
        if outcome == LocationOutcome::PermissionMissing
            && acquirer.permission().remedy() == Remedy::Prompt
        {
            let permission = acquirer.request_permission().await;
            tracing::info!(?permission, "asked for location permission");
            if permission.is_granted() {
                outcome = acquirer.acquire().await;
            }
        }
        let Some(position) = outcome.coordinate() else {
            return Ok(VisitCheck {
                outcome,
                report: VisitReport::default(),
            });
        };

        let libraries = self.libraries().await?;
        let mut visited = tracker.load().await?;
        let report = tracker
            .evaluate(Some(position), &libraries, &mut visited)
            .await;
        Ok(VisitCheck { outcome, report })
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn watch_theme(&self) -> watch::Receiver<Theme> {
        self.theme.watch()
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), Error> {
        self.theme.set(theme).await
    }

    pub fn language(&self) -> Language {
        self.language.get()
    }

    pub fn watch_language(&self) -> watch::Receiver<Language> {
        self.language.watch()
    }

    pub async fn set_language(&self, language: Language) -> Result<(), Error> {
        self.language.set(language).await
    }

    fn profile_images(&self) -> Result<ProfileImageStore, Error> {
        let session = self.require_session()?;
        let client = self.client.with_session(session);
        Ok(ProfileImageStore::new(client, session.user.id))
    }

    /// Uploads the photo at `path` and links it from the profile.
    pub async fn upload_profile_image(&self, path: &Path) -> Result<UserProfile, Error> {
        let url = self.profile_images()?.upload(path).await?;
        self.repositories()?.users.set_image_url(Some(url)).await
    }

    pub async fn remove_profile_image(&self) -> Result<UserProfile, Error> {
        self.profile_images()?.remove().await?;
        self.repositories()?.users.set_image_url(None).await
    }

    /// Public URL the profile photo is served from.
    pub fn profile_image_url(&self) -> Result<String, Error> {
        Ok(self.profile_images()?.public_url())
    }

    /// Starts a study session, optionally for an exam of the user.
    pub async fn start_session(
        &self,
        exam_id: Option<ExamId>,
        note: Option<&str>,
    ) -> Result<StudySession, Error> {
        let user_id = self.require_session()?.user.id;
        if let Some(running) = self.running_session().await? {
            return Err(Error::SessionAlreadyRunning(running.started_at));
        }
        if let Some(id) = exam_id {
            self.exam(id).await?;
        }

        let record = self
            .db
            .study_sessions
            .start(user_id, exam_id, note, Timestamp::now())
            .await?;
        let id = record.id();
        record
            .into_session()
            .ok_or_else(|| Error::not_found("study session", id))
    }

    pub async fn running_session(&self) -> Result<Option<StudySession>, Error> {
        let user_id = self.require_session()?.user.id;
        let record = self.db.study_sessions.running(user_id).await?;
        Ok(record.and_then(StudySessionRecord::into_session))
    }

    /// Stops the running study session.
    pub async fn stop_session(&self) -> Result<StudySession, Error> {
        let user_id = self.require_session()?.user.id;
        let running = self
            .db
            .study_sessions
            .running(user_id)
            .await?
            .ok_or_else(|| Error::not_found("study session", "running"))?;
        let id = running.id();
        self.db
            .study_sessions
            .stop(id, Timestamp::now())
            .await?
            .and_then(StudySessionRecord::into_session)
            .ok_or_else(|| Error::not_found("study session", id))
    }

    pub async fn list_sessions(&self, pager: &Pager) -> Result<Vec<StudySession>, Error> {
        let user_id = self.require_session()?.user.id;
        let records = self.db.study_sessions.list(user_id, pager).await?;
        let sessions = records
            .into_iter()
            .filter_map(StudySessionRecord::into_session)
            .collect();
        Ok(sessions)
    }

    /// Close the instance, releasing the database.
    pub async fn close(self) {
        self.db.close().await;
    }
}

async fn prepare(config: &Config) -> Result<(), Error> {
    if let Some(parent) = config.db_path().as_deref().and_then(Path::parent) {
        tracing::info!(path = %parent.display(), "ensuring state directory exists");
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Builds an acquirer with the configured timeout.
pub fn location_acquirer<P: LocationProvider>(
    config: &Config,
    provider: P,
) -> LocationAcquirer<P> {
    LocationAcquirer::new(provider).with_timeout(config.location.timeout())
}
