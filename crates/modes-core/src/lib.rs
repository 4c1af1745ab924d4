//! Normal-mode physics engine for coupled mass-spring systems.
//!
//! Two engines share one design: a one-dimensional chain and a
//! two-dimensional lattice, both fixed to walls by virtual boundary masses.
//! Free motion is evaluated exactly from a modal (amplitude/phase/frequency)
//! representation; while the pointer holds a mass the engines integrate
//! numerically with Velocity Verlet, and releasing the mass projects the
//! state back onto the modal basis.
//!
//! The crate is platform-neutral; the browser boundary lives in `modes-wasm`.

pub mod clock;
pub mod config;
pub mod error;
pub mod mass;
pub mod modes;
pub mod one_dimension;
pub mod spring;
pub mod two_dimensions;
