//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random tokens, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Redis-or-memory cache
//! - Transactional email dispatch

pub mod cache;
pub mod crypto;
pub mod mailer;
pub mod password;
