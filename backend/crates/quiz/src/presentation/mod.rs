//! Presentation Layer
//!
//! HTTP handlers, DTOs, and routers.

pub mod admin_handlers;
pub mod dto;
pub mod public_handlers;
pub mod router;

pub use router::{QuizAppState, admin_quiz_router, public_quiz_router};
