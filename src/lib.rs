//! # Caregate - Identity & Access Library
//!
//! This is a facade crate that re-exports all public APIs from the identity
//! service components. Use this crate to get access to registration, login,
//! token and authorization functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! caregate = { path = "../caregate" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Account`, `Principal`, etc.
//! - **Repository traits**: `CredentialStore`, `ProfileStore`, `OtpStore`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresCredentialStore`, `RedisOtpStore`, `JwtTokenService`, etc.
//! - **Service**: `IdentityService` - The main entry point for the identity service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use caregate_core::*;
}

// Re-export most commonly used core types at the root level
pub use caregate_core::{
    AccessDecision, AccessPolicy, Account, AccountId, Email, EmailError, LoginOtpRequest, OtpCode,
    OtpCodeError, OtpCodeHash, OtpRequestId, Password, PasswordError, Principal, Role, RoleError,
    UserProfile,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use caregate_core::{
        CredentialStore, CredentialStoreError, OtpStore, OtpStoreError, ProfileStore,
        ProfileStoreError,
    };
}

// Re-export port traits at root level
pub use caregate_core::{
    CredentialStore, CredentialStoreError, NotificationGateway, OtpStore, OtpStoreError,
    ProfileStore, ProfileStoreError, TokenService, TokenServiceError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use caregate_application::*;
}

// Re-export use cases at root level
pub use caregate_application::{
    AuthFailure, AuthResult, AuthenticationService, CompleteTwoFactorUseCase,
    InitiateTwoFactorUseCase, LoginUseCase, RefreshTokenUseCase, RegisterRequest, RegisterUseCase,
    StepUpError,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use caregate_adapters::persistence::*;
    }

    /// Notification gateway implementations
    pub mod notification {
        pub use caregate_adapters::notification::*;
    }

    /// Token service implementations
    pub mod token {
        pub use caregate_adapters::token::*;
    }

    /// Configuration
    pub mod config {
        pub use caregate_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use caregate_adapters::{
    HashMapCredentialStore, HashMapOtpStore, HashMapProfileStore, JwtConfig, JwtTokenService,
    MockNotificationGateway, PostgresCredentialStore, PostgresProfileStore,
    PostmarkNotificationGateway, RedisOtpStore,
};

// ============================================================================
// Identity Service (Main Entry Point)
// ============================================================================

/// Main identity service
pub use caregate_service::{ApiError, IdentityService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
