use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub address: String,
}

impl User {
    fn matches(&self, needle: &str) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.status,
            &self.phone_number,
            &self.date_of_birth,
            &self.address,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub address: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
}

impl UserPatch {
    fn apply(self, user: &mut User) {
        let fields = [
            (self.first_name, &mut user.first_name),
            (self.last_name, &mut user.last_name),
            (self.email, &mut user.email),
            (self.status, &mut user.status),
            (self.phone_number, &mut user.phone_number),
            (self.date_of_birth, &mut user.date_of_birth),
            (self.address, &mut user.address),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

#[derive(Default)]
pub struct Store {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<User>> {
    let store = db.read().await;
    let needle = params.search.unwrap_or_default().to_lowercase();
    let users: Vec<User> = store
        .users
        .values()
        .filter(|user| needle.is_empty() || user.matches(&needle))
        .cloned()
        .collect();
    info!(search = %needle, count = users.len(), "listed users");
    Json(users)
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<NewUser>,
) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let user = User {
        id: store.next_id,
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        status: input.status,
        phone_number: input.phone_number,
        date_of_birth: input.date_of_birth,
        address: input.address,
    };
    store.users.insert(user.id, user.clone());
    info!(id = user.id, "created user");
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UserPatch>,
) -> Result<Json<User>, StatusCode> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    input.apply(user);
    info!(id, "updated user");
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| {
            info!(id, "deleted user");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}
