mod climate_routes;
