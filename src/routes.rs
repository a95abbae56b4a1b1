// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/health";
pub const DATASETS: &str = "/datasets";
pub const VALID_VALUES: &str = "/valid_values";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
