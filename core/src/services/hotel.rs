//! Hotels and their lifecycle

use hb_shared::utils::validation::length_between;
use hb_shared::Pagination;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::hotel::{Hotel, MAX_STAR_RATING, MIN_STAR_RATING};
use crate::domain::value_objects::{Actor, VersionCheck};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{CityRepository, HotelRepository, ReviewRepository, RoomRepository};
use crate::services::cache::{hotel_key, hotel_rooms_key, ServiceCache, REVIEWS_PREFIX};

const MAX_NAME_LENGTH: usize = 200;
const MAX_ADDRESS_LENGTH: usize = 500;
const MAX_DESCRIPTION_LENGTH: usize = 5000;

#[derive(Debug, Clone)]
pub struct NewHotel {
    pub city_id: Uuid,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub star_rating: u8,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct HotelChanges {
    pub city_id: Option<Uuid>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub star_rating: Option<u8>,
}

pub struct HotelService {
    hotels: Arc<dyn HotelRepository>,
    cities: Arc<dyn CityRepository>,
    rooms: Arc<dyn RoomRepository>,
    reviews: Arc<dyn ReviewRepository>,
    cache: ServiceCache,
}

impl HotelService {
    pub fn new(
        hotels: Arc<dyn HotelRepository>,
        cities: Arc<dyn CityRepository>,
        rooms: Arc<dyn RoomRepository>,
        reviews: Arc<dyn ReviewRepository>,
        cache: ServiceCache,
    ) -> Self {
        Self {
            hotels,
            cities,
            rooms,
            reviews,
            cache,
        }
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Hotel> {
        let key = hotel_key(id);
        if let Some(hotel) = self.cache.get_json::<Hotel>(&key).await {
            return Ok(hotel);
        }
        let hotel = self
            .hotels
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel"))?;
        self.cache.set_json(&key, &hotel).await;
        Ok(hotel)
    }

    pub async fn list(
        &self,
        city_id: Option<Uuid>,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Hotel>, u64)> {
        self.hotels.list(city_id, pagination).await
    }

    /// Hotels of one city; 404 when the city does not exist
    pub async fn list_by_city(
        &self,
        city_id: Uuid,
        pagination: &Pagination,
    ) -> DomainResult<(Vec<Hotel>, u64)> {
        if self.cities.find_by_id(city_id).await?.is_none() {
            return Err(DomainError::not_found("City"));
        }
        self.hotels.list(Some(city_id), pagination).await
    }

    pub async fn create(&self, actor: &Actor, input: NewHotel) -> DomainResult<Hotel> {
        actor.require_catalog_manager()?;
        self.require_city(input.city_id).await?;

        let hotel = Hotel::new(
            input.city_id,
            input.name.trim().to_string(),
            input.address.trim().to_string(),
            normalize_description(input.description),
            input.star_rating,
        );
        validate(&hotel)?;

        let hotel = self.hotels.create(hotel).await?;
        tracing::info!(hotel_id = %hotel.id, actor = %actor.user_id, "Hotel created");
        Ok(hotel)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: HotelChanges,
        precondition: Option<VersionCheck>,
    ) -> DomainResult<Hotel> {
        actor.require_catalog_manager()?;

        let current = self
            .hotels
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel"))?;
        VersionCheck::verify_optional(precondition, current.version)?;

        let mut hotel = current.clone();
        if let Some(city_id) = changes.city_id {
            if city_id != hotel.city_id {
                self.require_city(city_id).await?;
            }
            hotel.city_id = city_id;
        }
        if let Some(name) = changes.name {
            hotel.name = name.trim().to_string();
        }
        if let Some(address) = changes.address {
            hotel.address = address.trim().to_string();
        }
        if let Some(description) = changes.description {
            hotel.description = normalize_description(Some(description));
        }
        if let Some(star_rating) = changes.star_rating {
            hotel.star_rating = star_rating;
        }
        validate(&hotel)?;

        let hotel = self.hotels.update(hotel, current.version).await?;
        self.cache.invalidate(&[hotel_key(id)]).await;
        Ok(hotel)
    }

    /// Hotels with rooms cannot be deleted; their reviews go with them
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> DomainResult<()> {
        actor.require_catalog_manager()?;

        if self.hotels.find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Hotel"));
        }
        let rooms = self.rooms.count_by_hotel(id).await?;
        if rooms > 0 {
            return Err(DomainError::conflict(format!(
                "Hotel still has {} room(s)",
                rooms
            )));
        }

        let reviews = self.reviews.delete_by_hotel(id).await?;
        self.hotels.delete(id).await?;
        self.cache
            .invalidate(&[hotel_key(id), hotel_rooms_key(id)])
            .await;
        if reviews > 0 {
            self.cache.invalidate_prefix(REVIEWS_PREFIX).await;
        }
        tracing::info!(hotel_id = %id, reviews_removed = reviews, actor = %actor.user_id, "Hotel deleted");
        Ok(())
    }

    async fn require_city(&self, city_id: Uuid) -> DomainResult<()> {
        match self.cities.find_by_id(city_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("City")),
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn validate(hotel: &Hotel) -> DomainResult<()> {
    for (field, value, max) in [
        ("name", &hotel.name, MAX_NAME_LENGTH),
        ("address", &hotel.address, MAX_ADDRESS_LENGTH),
    ] {
        if value.is_empty() {
            return Err(ValidationError::RequiredField {
                field: field.to_string(),
            }
            .into());
        }
        if !length_between(value, 1, max) {
            return Err(ValidationError::InvalidLength {
                field: field.to_string(),
                max,
                actual: value.chars().count(),
            }
            .into());
        }
    }
    if let Some(description) = &hotel.description {
        if !length_between(description, 1, MAX_DESCRIPTION_LENGTH) {
            return Err(ValidationError::InvalidLength {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LENGTH,
                actual: description.chars().count(),
            }
            .into());
        }
    }
    if !Hotel::is_valid_star_rating(hotel.star_rating) {
        return Err(ValidationError::OutOfRange {
            field: "star_rating".to_string(),
            min: MIN_STAR_RATING.to_string(),
            max: MAX_STAR_RATING.to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestContext;

    #[tokio::test]
    async fn test_create_requires_existing_city() {
        let ctx = TestContext::new();
        let result = ctx
            .hotels
            .create(
                &ctx.admin(),
                NewHotel {
                    city_id: Uuid::new_v4(),
                    name: "Grand".to_string(),
                    address: "1 Main St".to_string(),
                    description: None,
                    star_rating: 4,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_star_rating_range() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let result = ctx
            .hotels
            .update(
                &ctx.manager(),
                hotel.id,
                HotelChanges {
                    star_rating: Some(6),
                    ..HotelChanges::default()
                },
                None,
            )
            .await;
        assert!(matches!(
            result,
            Err(DomainError::ValidationErr(ValidationError::OutOfRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_update_with_version_check() {
        let ctx = TestContext::new();
        let manager = ctx.manager();
        let hotel = ctx.seed_hotel().await;
        assert_eq!(hotel.version, 1);

        let updated = ctx
            .hotels
            .update(
                &manager,
                hotel.id,
                HotelChanges {
                    name: Some("Grand Plaza".to_string()),
                    ..HotelChanges::default()
                },
                Some(VersionCheck::Exact(1)),
            )
            .await
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(ctx.hotels.get(hotel.id).await.unwrap().name, "Grand Plaza");

        let stale = ctx
            .hotels
            .update(
                &manager,
                hotel.id,
                HotelChanges {
                    name: Some("Stale".to_string()),
                    ..HotelChanges::default()
                },
                Some(VersionCheck::Exact(1)),
            )
            .await;
        assert!(matches!(
            stale,
            Err(DomainError::PreconditionFailed {
                expected: 1,
                actual: 2
            })
        ));

        ctx.hotels
            .update(
                &manager,
                hotel.id,
                HotelChanges {
                    description: Some("Near the river".to_string()),
                    ..HotelChanges::default()
                },
                Some(VersionCheck::Any),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_guest_cannot_update() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let result = ctx
            .hotels
            .update(&ctx.guest(), hotel.id, HotelChanges::default(), None)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_hotel_with_rooms_conflicts() {
        let ctx = TestContext::new();
        let room = ctx.seed_room().await;

        let result = ctx.hotels.delete(&ctx.admin(), room.hotel_id).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_delete_hotel_removes_reviews() {
        let ctx = TestContext::new();
        let hotel = ctx.seed_hotel().await;
        let guest = ctx.guest();
        ctx.reviews
            .create(
                &guest,
                crate::services::review::NewReview {
                    hotel_id: hotel.id,
                    rating: 5,
                    comment: None,
                },
            )
            .await
            .unwrap();

        ctx.hotels.delete(&ctx.admin(), hotel.id).await.unwrap();
        assert!(ctx
            .review_repo
            .find_by_user_and_hotel(guest.user_id, hotel.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_by_unknown_city() {
        let ctx = TestContext::new();
        let result = ctx
            .hotels
            .list_by_city(Uuid::new_v4(), &Pagination::default())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
