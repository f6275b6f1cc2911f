use maud::{html, Markup};

/// Routes advertised on the landing page, with example dates filled in.
pub const AVAILABLE_ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/start/2010-01-01",
    "/api/v1.0/start/2010-01-01/end/2017-08-23",
];

pub fn welcome_page() -> Markup {
    html! {
        "Welcome to the Hawaiian climate API!" br;
        "Available Routes:" br;
        @for (i, route) in AVAILABLE_ROUTES.iter().enumerate() {
            (route)
            @if i + 1 < AVAILABLE_ROUTES.len() {
                br;
            }
        }
    }
}
