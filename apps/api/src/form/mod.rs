// Questionnaire front-end plumbing: form state, panel cycle, endpoint client.

pub mod client;
pub mod controller;

pub use client::{ApiClient, ClientError};
pub use controller::{FormController, FormError, FormState, Panel, Question};
