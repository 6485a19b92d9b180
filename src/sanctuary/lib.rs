//! # Sanctuary Architecture
//!
//! Sanctuary is a **library of curated learning resources** (videos, books,
//! articles, courses, tools) with tags, search, and a YouTube submission flow.
//! The `sanctuary` binary is one client of it; nothing below the CLI assumes a
//! terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves tag names to tag ids                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Drives the stores, returns `CmdResult`                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (app.rs, reducers/, tags/, filter.rs)          │
//! │  - Pure reducers, one authoritative tag store               │
//! │  - Derived views computed by the filter functions           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (storage/)                                   │
//! │  - StorageBackend port: FsBackend, MemBackend               │
//! │  - Persistence adapter: JSON, failures logged not raised    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Videos come from a [`remote::VideoSource`] instead of storage: the remote
//! API or a local `videos.json`, as configured.
//!
//! ## State flow
//!
//! Every change is an action. The owning store runs the pure reducer, then
//! performs the side effects the action implies (persisting the resource
//! collection, mutating the tag store) and notifies subscribers. Lists shown
//! to the user are always derived from current state through [`filter`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Operations behind the facade
//! - [`app`]: Store wiring and the video page
//! - [`reducers`]: Video, resource and tag state transitions
//! - [`tags`]: The tag store
//! - [`filter`]: Derived views over resources, tags and videos
//! - [`model`]: Core data types (`Resource`, `Tag`, `Video`, ...)
//! - [`validation`]: Required-field predicates
//! - [`storage`]: Storage port, backends and the persistence adapter
//! - [`remote`]: Video sources
//! - [`submit`]: The add-video form
//! - [`youtube`]: YouTube URL parsing
//! - [`events`]: Subscription lists
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod model;
pub mod reducers;
pub mod remote;
pub mod storage;
pub mod submit;
pub mod tags;
pub mod validation;
pub mod youtube;
