use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, register_reservation, show_location_list, show_reservation_list,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route(
            "/reservations",
            get(show_reservation_list)
                .post(register_reservation)
                .delete(cancel_reservation),
        )
        .route("/locations", get(show_location_list));

    Router::new().nest("/api", routers)
}
