//! Shared setup for the HTTP tests: the full app on in-memory storage with a
//! recording email sender.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};
use chrono::{Duration, NaiveDate, Utc};
use hb_api::app::{AppState, Repositories};
use hb_core::services::city::CityInput;
use hb_core::services::hotel::NewHotel;
use hb_core::services::room::NewRoom;
use hb_core::services::verification::{InMemoryOtpStore, MockOtpSender};
use hb_core::services::{OtpSenderFactory, ServiceCache};
use hb_core::{Actor, Hotel, Room, RoomType, User, UserRole};
use hb_shared::AppConfig;
use serde_json::Value;
use uuid::Uuid;

pub const PASSWORD: &str = "Sup3rSecret";

pub struct TestContext {
    pub config: AppConfig,
    pub state: web::Data<AppState>,
    pub repos: Repositories,
    pub email: Arc<MockOtpSender>,
}

/// A stored, verified account and a valid access token for it
pub struct Account {
    pub user: User,
    pub token: String,
}

impl Account {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.user.id, self.user.role)
    }
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.bcrypt_cost = 4;

        let repos = Repositories::in_memory();
        let email = Arc::new(MockOtpSender::email());
        let senders = OtpSenderFactory::new().with_sender(email.clone());

        let state = AppState::build(
            repos.clone(),
            ServiceCache::in_memory(60),
            Arc::new(InMemoryOtpStore::new()),
            senders,
            &config,
        );

        Self {
            config,
            state: web::Data::new(state),
            repos,
            email,
        }
    }

    pub async fn account(&self, role: UserRole) -> Account {
        let hash = self.state.auth.hasher().hash(PASSWORD).await.unwrap();
        let mut user = User::new(
            format!("{}@example.com", Uuid::new_v4().simple()),
            hash,
            "Grace".to_string(),
            "Hopper".to_string(),
            None,
        );
        user.verify_email();
        user.set_role(role);

        let user = self.repos.users.create(user).await.unwrap();
        let tokens = self.state.tokens.generate_tokens(&user).await.unwrap();
        Account {
            user,
            token: tokens.access_token,
        }
    }

    /// A hotel in a fresh city with one double room at 120.00 a night
    pub async fn hotel_with_room(&self, admin: &Account) -> (Hotel, Room) {
        let actor = admin.actor();
        let city = self
            .state
            .cities
            .create(
                &actor,
                CityInput {
                    name: format!("City {}", Uuid::new_v4().simple()),
                    country: "Portugal".to_string(),
                },
            )
            .await
            .unwrap();
        let hotel = self
            .state
            .hotels
            .create(
                &actor,
                NewHotel {
                    city_id: city.id,
                    name: "Harbour View".to_string(),
                    address: "1 Quay Street".to_string(),
                    description: None,
                    star_rating: 4,
                },
            )
            .await
            .unwrap();
        let room = self
            .state
            .rooms
            .create(
                &actor,
                NewRoom {
                    hotel_id: hotel.id,
                    room_number: "101".to_string(),
                    room_type: RoomType::Double,
                    capacity: 2,
                    nightly_rate_cents: 12_000,
                },
            )
            .await
            .unwrap();
        (hotel, room)
    }
}

/// `days` from today
pub fn day(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

/// Response body as JSON; `Null` for empty bodies such as 204 and 304
pub async fn body_json<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let bytes = test::read_body(resp).await;
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

pub fn etag<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("etag")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap()
}
