//! sample-packer CLI library.
//!
//! Command implementations behind the `sample-packer` binary: building
//! device packs from manifests, validating manifests, and inspecting the
//! containers the packer writes.

pub mod commands;
