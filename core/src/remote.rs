// SPDX-FileCopyrightText: 2025-2026 StudyBuddy contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Repositories over the tables of the remote data service, each scoped to
//! the signed-in user.

mod exams;
mod favorites;
mod libraries;
mod todos;
mod users;
mod visited;

use studybuddy_backend::BackendClient;
use uuid::Uuid;

pub use crate::remote::exams::ExamRepository;
pub use crate::remote::favorites::FavoriteRepository;
pub use crate::remote::libraries::LibraryRepository;
pub use crate::remote::todos::TodoRepository;
pub use crate::remote::users::UserRepository;
pub use crate::remote::visited::VisitedRepository;

/// Row of the `favorite_libraries` and `visited_libraries` link tables.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
struct LibraryLink {
    user_id: Uuid,
    library_id: crate::LibraryId,
}

const LINK_CONFLICT: &str = "user_id,library_id";

/// All repositories for one authorized client and user.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub exams: ExamRepository,
    pub todos: TodoRepository,
    pub libraries: LibraryRepository,
    pub favorites: FavoriteRepository,
    pub visited: VisitedRepository,
    pub users: UserRepository,
}

impl Repositories {
    pub fn new(client: BackendClient, user_id: Uuid) -> Self {
        Repositories {
            exams: ExamRepository::new(client.clone(), user_id),
            todos: TodoRepository::new(client.clone(), user_id),
            libraries: LibraryRepository::new(client.clone()),
            favorites: FavoriteRepository::new(client.clone(), user_id),
            visited: VisitedRepository::new(client.clone(), user_id),
            users: UserRepository::new(client, user_id),
        }
    }
}
