pub mod action;
pub mod assessment;
pub mod eea;
pub mod flag;
pub mod interaction;
pub mod risk;
pub mod score;
pub mod session;
pub mod therapist;
pub mod triage;
