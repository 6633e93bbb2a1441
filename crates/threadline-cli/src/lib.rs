//! Terminal front end for story threads
//!
//! Block sequences produced by `threadline-core` are rendered here: the
//! [`blocks`] module turns a sequence into a view, [`chat`] and [`feed`]
//! hold the two message lists that display them, and [`source`] is where
//! threads come from.

pub mod actions;
pub mod blocks;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod feed;
pub mod source;
