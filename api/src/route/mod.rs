pub mod health;
pub mod reservation;

use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(reservation::build_reservation_routers())
}
