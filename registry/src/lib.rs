use std::sync::Arc;

use adapter::keycloak::KeycloakTokenVerifier;
use adapter::repository::reservation::ReservationRepositoryImpl;
use adapter::{database::ConnectionPool, repository::health::HealthCheckRepositoryImpl};
use kernel::model::booking::BookingPolicy;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::reservation::ReservationRepository;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    token_verifier: Arc<KeycloakTokenVerifier>,
    booking_policy: BookingPolicy,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: &AppConfig) -> anyhow::Result<Self> {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let token_verifier = Arc::new(KeycloakTokenVerifier::new(&app_config.keycloak)?);
        let booking_policy = BookingPolicy::from_config(&app_config.booking)?;
        Ok(Self::from_parts(
            health_check_repository,
            reservation_repository,
            token_verifier,
            booking_policy,
        ))
    }

    // データベースを使わない実装に差し替える場合に使う
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        token_verifier: Arc<KeycloakTokenVerifier>,
        booking_policy: BookingPolicy,
    ) -> Self {
        Self {
            health_check_repository,
            reservation_repository,
            token_verifier,
            booking_policy,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn token_verifier(&self) -> Arc<KeycloakTokenVerifier> {
        self.token_verifier.clone()
    }

    pub fn booking_policy(&self) -> &BookingPolicy {
        &self.booking_policy
    }
}
