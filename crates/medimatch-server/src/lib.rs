pub mod auth;
pub mod config;
pub mod error;
pub mod mailer;
pub mod matcher;
pub mod seed;
pub mod state;
pub mod web;
