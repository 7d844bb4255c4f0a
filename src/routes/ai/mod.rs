//! AI routes

pub mod chat;
