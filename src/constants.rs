// ABOUTME: Application constants shared across modules
// ABOUTME: Centralizes limits, service names, and user-facing error messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Formulation Designer

//! Application constants and shared messages

/// Numeric limits and defaults
pub mod limits {
    /// Minimum accepted password length (after trimming)
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// bcrypt cost factor for password hashing
    pub const BCRYPT_COST: u32 = 12;

    /// Default JWT session lifetime in hours
    pub const DEFAULT_SESSION_HOURS: i64 = 24;

    /// Default HTTP port for the API server
    pub const DEFAULT_HTTP_PORT: u16 = 8081;

    /// Default quantity in grams assigned when an ingredient is added to a recipe
    pub const DEFAULT_QUANTITY_G: u32 = 100;
}

/// Service identity strings
pub mod service_names {
    /// Service name for logging and configuration
    pub const FORMULATION_SERVER: &str = "formulation-server";

    /// JWT audience claim for tokens issued by this server
    pub const JWT_AUDIENCE: &str = "formulation-api";
}

/// User-facing error messages
pub mod error_messages {
    /// Email failed format validation
    pub const INVALID_EMAIL_FORMAT: &str = "Invalid input. A valid email address is required.";

    /// Password failed the minimum-length rule
    pub const PASSWORD_TOO_WEAK: &str =
        "Invalid input. Password must be at least 8 characters.";

    /// Account type was not one of the accepted values
    pub const INVALID_USER_TYPE: &str = "Invalid user type.";

    /// Registration attempted with an email that is already taken
    pub const USER_ALREADY_EXISTS: &str = "User with this email already exists.";

    /// Login failed; deliberately does not reveal which part was wrong
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

    /// Login attempted against a deactivated account
    pub const ACCOUNT_DISABLED: &str = "This account has been deactivated";
}
