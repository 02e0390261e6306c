//! Generated TypeScript bindings live in `generated/`; see `build.rs`.
