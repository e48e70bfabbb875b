//! # bitext-align
//!
//! A web service that mines parallel sentence pairs from two texts in
//! (possibly) different languages by comparing their sentence embeddings.
//! Used as a translation-memory mining backend: given two sentence lists,
//! it returns ranked cross-lingual pairs with margin-corrected confidence
//! scores plus the leftover unmatched sentences from each side.
//!
//! ## Architecture
//!
//! The alignment pipeline is symmetric in the two input sides:
//!
//! ```text
//!      ┌────────────┐                  ┌────────────┐
//!      │  src text   │                  │  trg text   │
//!      └─────┬──────┘                  └─────┬──────┘
//!            │ encoder (HTTP)                │ encoder (HTTP)
//!            ▼                               ▼
//!   ┌─────────────────┐             ┌─────────────────┐
//!   │ dedup + L2 norm  │             │ dedup + L2 norm  │
//!   └───────┬─────────┘             └───────┬─────────┘
//!           │                               │
//!           ▼                               ▼
//!   ┌─────────────────┐             ┌─────────────────┐
//!   │ exact knn        │             │ exact knn        │
//!   │ src → trg, k=4   │             │ trg → src, k=4   │
//!   └───────┬─────────┘             └───────┬─────────┘
//!           │ top-k sims + means            │ top-k sims + means
//!           └───────────────┬───────────────┘
//!                           ▼
//!              ┌─────────────────────────┐
//!              │ ratio margin scoring     │
//!              │ sim / avg(local means)   │
//!              └────────────┬────────────┘
//!                           ▼
//!              ┌─────────────────────────┐
//!              │ greedy 1:1 matching      │
//!              │ best-first, score > 0    │
//!              └────────────┬────────────┘
//!                           ▼
//!              ┌─────────────────────────┐
//!              │ ranked pairs + leftovers │
//!              └─────────────────────────┘
//! ```
//!
//! The neighbor search is exact (no approximate index) and memory-bounded:
//! large reference sets are scanned in blocks sized by a byte budget, with
//! per-block top-k results merged and re-sorted into the global top-k.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server, encoder,
//!   and search
//! - [`models`] - Request/response types
//! - [`error`] - Typed error kinds for the alignment core
//! - [`encoder`] - External sentence-encoder collaborator (LASER sidecar or
//!   OpenAI-compatible API)
//! - [`align::prepare`] - Embedding dedup and L2 normalization
//! - [`align::knn`] - Memory-bounded exact nearest-neighbor search
//! - [`align::margin`] - Hubness-corrected margin scoring
//! - [`align::mine`] - Bidirectional greedy one-to-one alignment
//! - [`api`] - Axum HTTP handlers for alignment and runtime config
//! - [`state`] - Shared application state

pub mod align;
pub mod api;
pub mod config;
pub mod encoder;
pub mod error;
pub mod models;
pub mod state;
