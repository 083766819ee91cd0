pub mod auth_dto;

pub use auth_dto::{
    AuthTokensResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserProfileResponse,
};
