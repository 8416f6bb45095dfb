pub mod database;
pub mod keycloak;
pub mod repository;
