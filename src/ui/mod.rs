//! egui rendering: side panel filters, top bar, metric cards, charts and the
//! records table. Everything here reads [`crate::state::AppState`]; only the
//! side panel and top bar mutate it.

pub mod donut;
pub mod metrics;
pub mod panels;
pub mod plot;
pub mod table;
