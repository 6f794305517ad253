use super::handlers::{health, login, logout, me, refresh, register};
use utoipa::openapi::{
    security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Components, Contact, InfoBuilder, License, OpenApiBuilder, Tag,
};
use utoipa_axum::{router::OpenApiRouter, routes};

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let (_router, openapi) = api_router().split_for_parts();
    openapi
}

/// Router that is both served and documented.
///
/// Every endpoint goes through `.routes(routes!(...))` so the served surface
/// and the generated document never drift apart.
pub(crate) fn api_router() -> OpenApiRouter {
    let mut router = OpenApiRouter::with_openapi(cargo_openapi())
        .routes(routes!(health::health))
        .routes(routes!(register::register))
        .routes(routes!(login::login))
        .routes(routes!(refresh::refresh))
        .routes(routes!(logout::logout))
        .routes(routes!(me::me));

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Registration, login and token rotation".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Liveness and identity store reachability".to_string());

    let openapi = router.get_openapi_mut();
    openapi.tags = Some(vec![auth_tag, health_tag]);
    openapi
        .components
        .get_or_insert_with(Components::new)
        .add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );

    router
}

fn cargo_openapi() -> utoipa::openapi::OpenApi {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();

    OpenApiBuilder::new().info(info).build()
}

fn cargo_contact() -> Option<Contact> {
    // Cargo joins authors with `;`; only the first one is published.
    let primary = env!("CARGO_PKG_AUTHORS").split(';').next().map(str::trim)?;
    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|trimmed| !trimmed.is_empty())
}

/// Split `Name <email>` into its parts.
fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    match author.split_once('<') {
        Some((name, rest)) => (
            optional_str(name),
            optional_str(rest.trim_end().trim_end_matches('>')),
        ),
        None => (optional_str(author), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_comes_from_cargo_metadata() {
        let spec = openapi();
        assert_eq!(spec.info.title, "tollgate");
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            spec.info.description.as_deref(),
            Some("Access and refresh token issuance and rotation")
        );

        let contact = spec.info.contact.unwrap_or_default();
        assert_eq!(contact.name.as_deref(), Some("Team Tollgate"));
        assert_eq!(contact.email.as_deref(), Some("team@tollgate.dev"));

        let license = spec.info.license;
        assert_eq!(license.map(|l| l.name), Some("BSD-3-Clause".to_string()));
    }

    #[test]
    fn documents_every_route() {
        let spec = openapi();
        for path in [
            "/health",
            "/v1/auth/register",
            "/v1/auth/login",
            "/v1/auth/refresh",
            "/v1/auth/logout",
            "/v1/auth/me",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }

        let tags = spec.tags.unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "health"));

        let components = spec.components.unwrap_or_default();
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[test]
    fn parse_author_variants() {
        assert_eq!(
            parse_author("Team Tollgate <team@tollgate.dev>"),
            (Some("Team Tollgate"), Some("team@tollgate.dev"))
        );
        assert_eq!(parse_author("Solo"), (Some("Solo"), None));
        assert_eq!(parse_author("<only@mail.dev>"), (None, Some("only@mail.dev")));
        assert_eq!(parse_author(""), (None, None));
    }
}
