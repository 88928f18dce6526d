//! Fully wired services over the in-memory repositories

use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::Booking;
use crate::domain::entities::city::City;
use crate::domain::entities::hotel::Hotel;
use crate::domain::entities::room::{Room, RoomType};
use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::{Actor, StayDates};
use crate::repositories::*;
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::booking::{BookingService, NewBooking};
use crate::services::cache::ServiceCache;
use crate::services::city::CityService;
use crate::services::hotel::HotelService;
use crate::services::review::ReviewService;
use crate::services::room::RoomService;
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::user::UserService;
use crate::services::verification::{
    InMemoryOtpStore, MockOtpSender, OtpSenderFactory, VerificationConfig, VerificationService,
};

pub const TEST_PASSWORD: &str = "s3cretpass";

pub fn days_from_today(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub struct TestContext {
    pub user_repo: Arc<MockUserRepository>,
    pub booking_repo: Arc<MockBookingRepository>,
    pub review_repo: Arc<MockReviewRepository>,
    pub token_repo: Arc<MockTokenRepository>,
    pub email_sender: Arc<MockOtpSender>,
    pub whatsapp_sender: Arc<MockOtpSender>,
    pub tokens: Arc<TokenService>,
    pub auth: AuthService,
    pub users: UserService,
    pub cities: CityService,
    pub hotels: HotelService,
    pub rooms: RoomService,
    pub bookings: BookingService,
    pub reviews: ReviewService,
}

impl TestContext {
    pub fn new() -> Self {
        let user_repo = Arc::new(MockUserRepository::new());
        let city_repo = Arc::new(MockCityRepository::new());
        let hotel_repo = Arc::new(MockHotelRepository::new());
        let room_repo = Arc::new(MockRoomRepository::new());
        let booking_repo = Arc::new(MockBookingRepository::new());
        let review_repo = Arc::new(MockReviewRepository::new());
        let token_repo = Arc::new(MockTokenRepository::new());
        let cache = ServiceCache::in_memory(300);

        let tokens = Arc::new(TokenService::new(
            token_repo.clone(),
            TokenServiceConfig::default(),
        ));

        let email_sender = Arc::new(MockOtpSender::email());
        let whatsapp_sender = Arc::new(MockOtpSender::whatsapp());
        let verification = Arc::new(VerificationService::new(
            Arc::new(InMemoryOtpStore::new()),
            OtpSenderFactory::new()
                .with_sender(email_sender.clone())
                .with_sender(whatsapp_sender.clone()),
            VerificationConfig::default(),
        ));

        let auth = AuthService::new(
            user_repo.clone(),
            tokens.clone(),
            verification,
            cache.clone(),
            AuthServiceConfig {
                bcrypt_cost: 4,
                ..AuthServiceConfig::default()
            },
        );

        Self {
            users: UserService::new(
                user_repo.clone(),
                booking_repo.clone(),
                review_repo.clone(),
                tokens.clone(),
                cache.clone(),
            ),
            cities: CityService::new(city_repo.clone(), hotel_repo.clone(), cache.clone()),
            hotels: HotelService::new(
                hotel_repo.clone(),
                city_repo,
                room_repo.clone(),
                review_repo.clone(),
                cache.clone(),
            ),
            rooms: RoomService::new(
                room_repo.clone(),
                hotel_repo.clone(),
                booking_repo.clone(),
                cache.clone(),
            ),
            bookings: BookingService::new(booking_repo.clone(), room_repo, cache.clone()),
            reviews: ReviewService::new(review_repo.clone(), hotel_repo, cache),
            user_repo,
            booking_repo,
            review_repo,
            token_repo,
            email_sender,
            whatsapp_sender,
            tokens,
            auth,
        }
    }

    pub fn admin(&self) -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Admin)
    }

    pub fn manager(&self) -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Manager)
    }

    /// A guest with no stored account
    pub fn guest(&self) -> Actor {
        Actor::new(Uuid::new_v4(), UserRole::Guest)
    }

    /// Stored, verified guest account with [`TEST_PASSWORD`]
    pub async fn seed_verified_guest(&self) -> Actor {
        let user = self.seed_user(&format!("{}@example.com", Uuid::new_v4()), true).await;
        Actor::new(user.id, user.role)
    }

    pub async fn seed_user(&self, email: &str, verified: bool) -> User {
        let hash = self.auth.hasher().hash(TEST_PASSWORD).await.unwrap();
        let mut user = User::new(
            email.to_string(),
            hash,
            "Ada".to_string(),
            "Lovelace".to_string(),
            Some("+14155552671".to_string()),
        );
        if verified {
            user.verify_email();
        }
        self.user_repo.create(user).await.unwrap()
    }

    pub async fn seed_city(&self) -> City {
        self.cities
            .create(
                &self.admin(),
                crate::services::city::CityInput {
                    name: format!("City {}", Uuid::new_v4()),
                    country: "Portugal".to_string(),
                },
            )
            .await
            .unwrap()
    }

    pub async fn seed_hotel(&self) -> Hotel {
        let city = self.seed_city().await;
        self.hotels
            .create(
                &self.admin(),
                crate::services::hotel::NewHotel {
                    city_id: city.id,
                    name: "Grand".to_string(),
                    address: "1 Main St".to_string(),
                    description: None,
                    star_rating: 4,
                },
            )
            .await
            .unwrap()
    }

    /// Double room, two guests, 100.00 a night
    pub async fn seed_room(&self) -> Room {
        let hotel = self.seed_hotel().await;
        self.rooms
            .create(
                &self.admin(),
                crate::services::room::NewRoom {
                    hotel_id: hotel.id,
                    room_number: "101".to_string(),
                    room_type: RoomType::Double,
                    capacity: 2,
                    nightly_rate_cents: 10_000,
                },
            )
            .await
            .unwrap()
    }

    /// Book `[today + from, today + to)` for one guest
    pub async fn book(&self, actor: &Actor, room_id: Uuid, from: i64, to: i64) -> Booking {
        self.bookings
            .create(
                actor,
                NewBooking {
                    room_id,
                    check_in: days_from_today(from),
                    check_out: days_from_today(to),
                    guests: 1,
                },
            )
            .await
            .unwrap()
    }

    /// Booking whose stay started yesterday, inserted past the date checks
    pub async fn seed_past_booking(&self, actor: &Actor, room_id: Uuid) -> Booking {
        let stay = StayDates::new(days_from_today(-1), days_from_today(2)).unwrap();
        self.booking_repo
            .create(Booking::new(actor.user_id, room_id, stay, 1, 30_000))
            .await
            .unwrap()
    }
}
