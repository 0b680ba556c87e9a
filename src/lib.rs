//! # Green Doctor
//!
//! A plant health check for leaf photos. The photo is normalized (alpha
//! dropped, shrunk to fit 800x800, re-encoded as JPEG) and sent with a fixed
//! instruction to a Gemini vision model, whose free-text report is returned
//! as-is. Nothing is classified locally.
//!
//! ## Example
//!
//! ```no_run
//! use green_doctor::{image, Config, Doctor, SecretStore};
//!
//! # fn main() -> green_doctor::Result<()> {
//! let credential = SecretStore::discover(None).credential()?;
//! let doctor = Doctor::new(Config::default(), credential)?;
//!
//! let photo = image::load_image("leaf.jpg")?;
//! println!("{}", doctor.examine(photo).diagnosis);
//! # Ok(())
//! # }
//! ```

pub mod diagnosis;
pub mod doctor;
pub mod error;
pub mod image;
pub mod report;
pub mod secrets;

pub use diagnosis::{Diagnosis, FailureKind, GeminiClient, InferenceClient};
pub use doctor::{Config, Doctor, Examination};
pub use error::{Error, Result};
pub use secrets::{Credential, SecretStore};
