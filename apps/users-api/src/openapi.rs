//! OpenAPI documentation configuration

use utoipa::{Modify, OpenApi};

/// Service-level document; the users paths are merged in at the root.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "REST API for user accounts backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    modifiers(&UsersPaths)
)]
pub struct ApiDoc;

struct UsersPaths;

impl Modify for UsersPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_users::ApiDoc::openapi());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_paths_are_at_the_root() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Users API");
        assert!(doc.paths.paths.contains_key("/"));
        assert!(doc.paths.paths.contains_key("/{id}"));
    }
}
