//! media-pulse-actions: conversational actions for the Media Pulse bot, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
