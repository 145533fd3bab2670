use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use chrono::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use caregate_adapters::config::AllowedOrigins;
use caregate_application::AuthenticationService;
use caregate_core::{
    CredentialStore, NotificationGateway, OtpStore, ProfileStore, TokenService,
};

use crate::routes::{complete_two_factor, initiate_two_factor, login, profile, refresh, register};
use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Identity and access service exposing the authentication routes.
pub struct IdentityService {
    router: Router,
}

impl IdentityService {
    /// Create a new IdentityService with the provided stores, gateway and
    /// token service.
    ///
    /// # Note on Architecture
    /// All routes share one `AuthenticationService` behind an Arc; stores
    /// that need mutation carry their own interior locking.
    pub fn new<C, P, O, N, K>(
        credential_store: C,
        profile_store: P,
        otp_store: O,
        notification_gateway: N,
        token_service: K,
        otp_ttl: Duration,
    ) -> Self
    where
        C: CredentialStore + 'static,
        P: ProfileStore + 'static,
        O: OtpStore + 'static,
        N: NotificationGateway + 'static,
        K: TokenService + 'static,
    {
        let service = Arc::new(AuthenticationService::new(
            credential_store,
            profile_store,
            otp_store,
            notification_gateway,
            token_service,
            otp_ttl,
        ));

        let router = Router::new()
            .route("/auth/register", post(register::<C, P, O, N, K>))
            .route("/auth/login", post(login::<C, P, O, N, K>))
            .route("/auth/refresh", post(refresh::<C, P, O, N, K>))
            .route("/auth/2fa/initiate", post(initiate_two_factor::<C, P, O, N, K>))
            .route("/auth/2fa/complete", post(complete_two_factor::<C, P, O, N, K>))
            .route("/auth/profile", get(profile::<C, P, O, N, K>))
            .with_state(service);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be nested into another
    /// application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the identity service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Identity service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
