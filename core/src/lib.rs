//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and layers a controller on
//! top that owns the local todo collection, the draft form and the error
//! slot. The host executes each outgoing request and reports the result back,
//! making the whole core deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `TodoApp` is the only owner of mutable state. Every mutation goes
//!   through one of its operations or through `TodoApp::complete`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod app;
pub mod client;
pub mod error;
pub mod form;
pub mod http;
pub mod types;
pub mod view;

pub use app::{Outgoing, Ticket, TodoApp};
pub use client::TodoClient;
pub use error::{ApiError, AppError};
pub use form::DraftForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Timestamp, Todo, TodoId, UpdateTodo};
pub use view::ListView;
