use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, MessageResponse, RequestPasswordResetDto, RequestVerificationDto,
    ResetPasswordDto, TokenResponse, VerifyEmailDto,
};
use crate::modules::deliveries::model::{
    CreateDeliveryDto, Delivery, DeliveryResponse, UpdateDeliveryDto,
};
use crate::modules::users::model::{CreateUserDto, ShowUser, UpdateUserDto, User, UserResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::request_verification,
        crate::modules::auth::controller::verify_email_get,
        crate::modules::auth::controller::verify_email_post,
        crate::modules::auth::controller::request_password_reset,
        crate::modules::auth::controller::reset_password_get,
        crate::modules::auth::controller::reset_password_post,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::show_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::deliveries::controller::show_delivery,
        crate::modules::deliveries::controller::create_delivery,
        crate::modules::deliveries::controller::update_delivery,
        crate::modules::deliveries::controller::delete_delivery,
    ),
    components(
        schemas(
            User,
            ShowUser,
            CreateUserDto,
            UpdateUserDto,
            UserResponse,
            Delivery,
            CreateDeliveryDto,
            UpdateDeliveryDto,
            DeliveryResponse,
            LoginRequest,
            TokenResponse,
            RequestVerificationDto,
            VerifyEmailDto,
            RequestPasswordResetDto,
            ResetPasswordDto,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, email verification, and password reset"),
        (name = "Users", description = "User account management"),
        (name = "Deliveries", description = "Delivery tracking endpoints")
    ),
    info(
        title = "Parceltrack API",
        version = "0.1.0",
        description = "A delivery tracking REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
