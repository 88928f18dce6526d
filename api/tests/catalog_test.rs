//! Cities, hotels and rooms: role checks and conditional requests

mod common;

use actix_web::{http::StatusCode, test};
use hb_api::create_app;
use hb_core::UserRole;
use serde_json::json;

use common::{body_json, day, etag, TestContext};

#[actix_web::test]
async fn test_only_catalog_managers_write_cities() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let guest = ctx.account(UserRole::Guest).await;
    let manager = ctx.account(UserRole::Manager).await;
    let city = json!({ "name": "Lisbon", "country": "Portugal" });

    let req = test::TestRequest::post()
        .uri("/api/v1/cities")
        .set_json(&city)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/cities")
        .insert_header(guest.bearer())
        .set_json(&city)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/cities")
        .insert_header(manager.bearer())
        .set_json(&city)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["data"]["name"], "Lisbon");

    // Same place twice
    let req = test::TestRequest::post()
        .uri("/api/v1/cities")
        .insert_header(manager.bearer())
        .set_json(json!({ "name": "lisbon", "country": "PORTUGAL" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    // Reads are public
    let req = test::TestRequest::get().uri("/api/v1/cities").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_hotel_conditional_get_and_update() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let admin = ctx.account(UserRole::Admin).await;
    let (hotel, _) = ctx.hotel_with_room(&admin).await;
    let uri = format!("/api/v1/hotels/{}", hotel.id);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let first_tag = etag(&resp);
    assert_eq!(first_tag, format!("\"{}\"", hotel.version));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("If-None-Match", first_tag.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(etag(&resp), first_tag);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(admin.bearer())
        .insert_header(("If-Match", first_tag.as_str()))
        .set_json(json!({ "name": "Harbour View Grand" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second_tag = etag(&resp);
    assert_ne!(second_tag, first_tag);
    assert_eq!(body_json(resp).await["data"]["name"], "Harbour View Grand");

    // The first tag is stale now
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(admin.bearer())
        .insert_header(("If-Match", first_tag.as_str()))
        .set_json(json!({ "star_rating": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "precondition_failed");
    assert_eq!(
        body["details"]["current_version"],
        json!(second_tag.trim_matches('"').parse::<i64>().unwrap())
    );

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(admin.bearer())
        .insert_header(("If-Match", "version-two"))
        .set_json(json!({ "star_rating": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "invalid_if_match");

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(admin.bearer())
        .insert_header(("If-Match", "*"))
        .set_json(json!({ "star_rating": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["star_rating"], 5);

    // No header: last writer wins
    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(admin.bearer())
        .set_json(json!({ "description": "Rooms facing the river" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_hotel_validation_and_listing() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let admin = ctx.account(UserRole::Admin).await;
    let (hotel, room) = ctx.hotel_with_room(&admin).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/hotels")
        .insert_header(admin.bearer())
        .set_json(json!({
            "city_id": hotel.city_id,
            "name": "Too Many Stars",
            "address": "2 Quay Street",
            "star_rating": 6
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["details"]["star_rating"].is_array());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/hotels?city_id={}", hotel.city_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = body_json(resp).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["data"][0]["id"], json!(hotel.id));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/cities/{}/hotels", hotel.city_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/hotels/{}/rooms", hotel.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = body_json(resp).await;
    assert_eq!(body["data"][0]["id"], json!(room.id));

    // City still has a hotel, hotel still has a room
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/cities/{}", hotel.city_id))
        .insert_header(admin.bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/hotels/{}", hotel.id))
        .insert_header(admin.bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/rooms/{}", room.id))
        .insert_header(admin.bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rooms/{}", room.id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_room_availability_quotes_price() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let admin = ctx.account(UserRole::Admin).await;
    let (_, room) = ctx.hotel_with_room(&admin).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/rooms/{}/availability?check_in={}&check_out={}",
            room.id,
            day(10),
            day(13)
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["available"], true);
    assert_eq!(body["data"]["nights"], 3);
    assert_eq!(body["data"]["total_price_cents"], 36_000);

    // check_out before check_in
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/rooms/{}/availability?check_in={}&check_out={}",
            room.id,
            day(13),
            day(10)
        ))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rooms/{}/availability?check_in=soon", room.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "invalid_query");
}
