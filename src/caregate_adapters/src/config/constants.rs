pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "CAREGATE_JWT__SECRET";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "CAREGATE_SERVER__ALLOWED_ORIGINS";
    pub const DATABASE_URL_ENV_VAR: &str = "CAREGATE_POSTGRES__URL";
    pub const REDIS_URL_ENV_VAR: &str = "CAREGATE_REDIS__URL";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "CAREGATE_NOTIFICATIONS__AUTH_TOKEN";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
