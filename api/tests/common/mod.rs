use std::sync::{Arc, Mutex};

use adapter::keycloak::KeycloakTokenVerifier;
use async_trait::async_trait;
use axum_test::TestServer;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::model::{
    booking::{BookingPolicy, BusinessHours},
    reservation::{
        event::{CreateReservation, DeleteReservation},
        Location, Reservation, TimeSlot,
    },
    time::BookingClock,
};
use kernel::repository::{health::HealthCheckRepository, reservation::ReservationRepository};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub const CLIENT_ID: &str = "locatiereserveren-webapp";
const SECRET: &[u8] = b"integration-test-secret";

#[derive(Default)]
pub struct InMemoryReservationRepository {
    rows: Mutex<Vec<Reservation>>,
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by_key(|r| r.slot.start);
        Ok(rows)
    }

    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.location == event.location && r.slot.overlaps(&event.slot))
        {
            return Err(AppError::Conflict("already reserved".into()));
        }
        let reservation = Reservation {
            title: event.title,
            contact_person: event.contact_person,
            email: event.email,
            location: event.location,
            slot: event.slot,
        };
        rows.push(reservation.clone());
        Ok(reservation)
    }

    async fn find(&self, location: Location, slot: TimeSlot) -> AppResult<Option<Reservation>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.location == location && r.slot == slot)
            .cloned())
    }

    async fn delete(&self, event: DeleteReservation) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| {
            !(r.location == event.location
                && r.slot == event.slot
                && r.contact_person == event.contact_person)
        });
        if rows.len() == before {
            return Err(AppError::EntityNotFound("reservation not found".into()));
        }
        Ok(())
    }
}

pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheckRepository for StaticHealth {
    async fn check_db(&self) -> bool {
        self.0
    }
}

pub fn verifier() -> KeycloakTokenVerifier {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;
    KeycloakTokenVerifier::with_key(DecodingKey::from_secret(SECRET), validation, CLIENT_ID)
}

pub fn mint_token(claims: serde_json::Value) -> String {
    let mut claims = claims;
    claims["exp"] = serde_json::json!(chrono::Utc::now().timestamp() + 300);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

pub fn registry_with(db_healthy: bool) -> AppRegistry {
    let policy = BookingPolicy::new(
        BookingClock::new(chrono_tz::Europe::Amsterdam),
        BusinessHours::new(9, 18).unwrap(),
    );
    AppRegistry::from_parts(
        Arc::new(StaticHealth(db_healthy)),
        Arc::new(InMemoryReservationRepository::default()),
        Arc::new(verifier()),
        policy,
    )
}

pub fn test_server() -> TestServer {
    server_for(registry_with(true))
}

pub fn server_for(registry: AppRegistry) -> TestServer {
    let app = api::route::routes().with_state(registry);
    TestServer::new(app).unwrap()
}
