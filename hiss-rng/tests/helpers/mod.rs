//! Test helper modules for hiss-rng integration tests
//!
//! - audio_generator: write deterministic WAV fixtures with hound

#![allow(dead_code)]

pub mod audio_generator;

pub use audio_generator::{
    noise_i16, write_mono_f32, write_mono_i16, write_mono_i24, write_mono_i8, write_stereo_i16,
};
