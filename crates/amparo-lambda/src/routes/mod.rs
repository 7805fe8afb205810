pub mod ads;
pub mod assessments;
pub mod companion;
pub mod crisis;
pub mod flows;
pub mod health;
pub mod instruments;
pub mod sos;
pub mod therapists;
pub mod triage;
