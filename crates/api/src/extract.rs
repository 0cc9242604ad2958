//! Extractors that report rejections through [`AppError`].
//!
//! Axum's stock `Json` and `Path` rejections answer with plain text (and
//! `422` for well-formed JSON of the wrong shape). Wrapping them keeps
//! every client error a `400` with the standard JSON error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with malformed or mistyped bodies mapped to `400 BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with unparsable segments mapped to `400 BAD_REQUEST`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
