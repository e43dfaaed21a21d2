pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

pub use api::{
    admin::{
        admin::{delete_any_note, list_all_notes, list_users},
        admin_note_dto::AdminNoteDto,
        admin_note_list_response::AdminNoteListResponse,
        user_list_response::UserListResponse,
    },
    auth::{
        auth::{google_login, login, request_otp, send_login_otp, verify_registration},
        auth_response::AuthResponse,
        google_login_request::GoogleLoginRequest,
        login_otp_request::LoginOtpRequest,
        login_request::LoginRequest,
        message_response::MessageResponse,
        request_otp_request::RequestOtpRequest,
        user_dto::UserDto,
        verify_registration_request::VerifyRegistrationRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::AuthUser,
    notes::{
        create_note_request::CreateNoteRequest,
        note_dto::NoteDto,
        note_list_response::NoteListResponse,
        notes::{create_note, delete_note, list_notes, update_note},
        update_note_request::UpdateNoteRequest,
    },
};

pub use crate::app_state::AppState;
pub use crate::routes::build_router;
