//! End-to-end protocol scenarios run through the call envelope.

mod burn;
mod members;
mod pause;
mod properties;
