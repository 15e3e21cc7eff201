use crate::config::{Config, ServerConfig};
use crate::error::{CbeError, Result};
use crate::ids::IdBuilder;
use crate::lookup::{
    EntityKey, EntityKind, EntitySource, Resolver, StoreSource, TripleStore, UpstreamSource,
};
use crate::mapping::MapperRegistry;
use crate::vocab::PREFIXES;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use hyper::Server;
use oxrdf::Triple;
use oxrdfio::{RdfFormat, RdfSerializer};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    resolver: Arc<Resolver>,
    redirect_org: String,
    redirect_site: String,
}

impl AppState {
    pub fn new(resolver: Resolver, config: &ServerConfig) -> Self {
        Self {
            resolver: Arc::new(resolver),
            redirect_org: config.redirect_org.clone(),
            redirect_site: config.redirect_site.clone(),
        }
    }

    /// Pre-loaded store first when configured, then the public search pages
    pub fn from_config(config: &Config) -> Result<Self> {
        let ids = IdBuilder::new(config.vocab.clone());
        let registry = Arc::new(MapperRegistry::new(ids.clone()));
        let mut sources: Vec<Arc<dyn EntitySource>> = Vec::new();

        if let Some(path) = &config.server.store {
            let store = TripleStore::load(path)?;
            sources.push(Arc::new(StoreSource::new(Arc::new(store), ids)));
        }
        sources.push(Arc::new(UpstreamSource::new(&config.server, registry)?));

        Ok(Self::new(Resolver::new(sources), &config.server))
    }

    fn html_page(&self, key: &EntityKey) -> String {
        let base = match key.kind() {
            EntityKind::Organization => &self.redirect_org,
            EntityKind::Site => &self.redirect_site,
        };
        format!("{}{}", base, key.digits())
    }
}

/// What the client asked for in its `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negotiated {
    Html,
    Rdf(RdfFormat),
}

/// First supported media type in the `Accept` header; N-Triples otherwise
pub fn negotiate(accept: Option<&str>) -> Negotiated {
    let accept = accept.unwrap_or_default();
    for media_type in accept.split(',') {
        let media_type = media_type.split(';').next().unwrap_or_default().trim();
        match media_type {
            "text/html" | "application/xhtml+xml" => return Negotiated::Html,
            "application/n-triples" | "text/plain" | "*/*" => {
                return Negotiated::Rdf(RdfFormat::NTriples)
            }
            "text/turtle" | "application/x-turtle" => return Negotiated::Rdf(RdfFormat::Turtle),
            "application/rdf+xml" => return Negotiated::Rdf(RdfFormat::RdfXml),
            _ => {}
        }
    }
    Negotiated::Rdf(RdfFormat::NTriples)
}

fn serialize(triples: &[Triple], format: RdfFormat) -> Result<Vec<u8>> {
    let mut serializer = RdfSerializer::from_format(format);
    if format != RdfFormat::NTriples {
        for (prefix, namespace) in PREFIXES {
            serializer = serializer.with_prefix(*prefix, *namespace)?;
        }
    }
    let mut writer = serializer.for_writer(Vec::new());
    for triple in triples {
        writer.serialize_triple(triple)?;
    }
    Ok(writer.finish()?)
}

fn accept(headers: &HeaderMap) -> Negotiated {
    negotiate(headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()))
}

fn bad_request(e: CbeError) -> Response {
    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
}

async fn describe(state: AppState, kind: EntityKind, id: String, headers: HeaderMap) -> Response {
    let key = match EntityKey::parse(kind, &id) {
        Ok(key) => key,
        Err(e) => return bad_request(e),
    };
    let format = match accept(&headers) {
        Negotiated::Html => return Redirect::to(&state.html_page(&key)).into_response(),
        Negotiated::Rdf(format) => format,
    };

    match state.resolver.resolve(&key).await {
        Ok(Some(triples)) => match serialize(&triples, format) {
            Ok(body) => ([(header::CONTENT_TYPE, format.media_type())], body).into_response(),
            Err(e) => {
                error!("Serializing {} failed: {}", key.digits(), e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Ok(None) => (StatusCode::NOT_FOUND, format!("Not found: {}", key.digits())).into_response(),
        Err(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
    }
}

async fn registered_entity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    describe(state, EntityKind::Organization, id, headers).await
}

async fn establishment_unit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    describe(state, EntityKind::Site, id, headers).await
}

fn legacy_redirect(state: &AppState, kind: EntityKind, id: &str, headers: &HeaderMap) -> Response {
    let key = match EntityKey::parse_legacy(kind, id) {
        Ok(key) => key,
        Err(e) => return bad_request(e),
    };
    let target = match accept(headers) {
        Negotiated::Html => state.html_page(&key),
        Negotiated::Rdf(_) => match kind {
            EntityKind::Organization => format!("/id/CbeRegisteredEntity/{}", key.digits()),
            EntityKind::Site => format!("/id/CbeEstablishmentUnit/{}", key.digits()),
        },
    };
    Redirect::to(&target).into_response()
}

async fn legacy_org(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    legacy_redirect(&state, EntityKind::Organization, &id, &headers)
}

async fn legacy_site(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    legacy_redirect(&state, EntityKind::Site, &id, &headers)
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cbe_lod",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/id/CbeRegisteredEntity/:id", get(registered_entity))
        .route("/id/CbeEstablishmentUnit/:id", get(establishment_unit))
        .route("/id/cbe/org/:id", get(legacy_org))
        .route("/id/cbe/site/:id", get(legacy_site))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Lookup service listening on http://{}", addr);
    Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiate() {
        assert_eq!(negotiate(None), Negotiated::Rdf(RdfFormat::NTriples));
        assert_eq!(
            negotiate(Some("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")),
            Negotiated::Html
        );
        assert_eq!(
            negotiate(Some("text/turtle;q=1.0, application/n-triples;q=0.5")),
            Negotiated::Rdf(RdfFormat::Turtle)
        );
        assert_eq!(
            negotiate(Some("application/json, application/rdf+xml")),
            Negotiated::Rdf(RdfFormat::RdfXml)
        );
        assert_eq!(
            negotiate(Some("application/json")),
            Negotiated::Rdf(RdfFormat::NTriples)
        );
    }

    #[test]
    fn test_turtle_uses_prefixes() {
        let triple = Triple::new(
            oxrdf::NamedNode::new_unchecked("http://org.belgif.be/id/cbe/org/0671_516_647"),
            crate::vocab::rov::LEGAL_NAME,
            oxrdf::Literal::new_simple_literal("FOD BOSA"),
        );
        let body = String::from_utf8(serialize(&[triple], RdfFormat::Turtle).unwrap()).unwrap();
        assert!(body.contains("@prefix rov: <http://www.w3.org/ns/regorg#>"));
        assert!(body.contains("rov:legalName"));
    }
}
