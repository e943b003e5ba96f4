//! tsfix-rules: The rewrite rule sets tsfix applies
//!
//! Targets, in run order:
//! - components/Controls.tsx: generic change handlers, void event handlers, icon prop type
//! - App.tsx: void callbacks, catch suppression, province/town lookups
//! - components/Map2D.tsx: void cleanups, sphere cast, cell and pixel lookups
//! - services/gemini.ts: loreLevel fallback, faction JSON type, province name lookups
//! - types.ts: geoJson record type

pub mod app;
pub mod common;
pub mod controls;
pub mod gemini;
pub mod map2d;
pub mod registry;
pub mod types;

pub use registry::{RuleInfo, RuleSetRegistry, TargetInfo};
